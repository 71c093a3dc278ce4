//! Caption retrieval policy
//!
//! Wraps a [`CaptionProvider`] in the language fallback chain and the
//! bounded connectivity retry loop. English first, then the fixed list of
//! secondary languages, then the provider default; first success wins.

use std::time::Duration;

use super::CaptionProvider;
use crate::config::CaptionConfig;
use crate::error::CaptionError;
use crate::video_id::VideoId;

/// Languages tried after English, in order.
const FALLBACK_LANGUAGES: [&str; 8] = ["zh", "zh-cn", "zh-tw", "es", "fr", "de", "ja", "ko"];

/// Notice returned when retrieval keeps failing in unexpected ways.
pub const DEGRADED_NOTICE: &str = "无法获取视频字幕，请尝试其他视频或稍后再试。";

/// Outcome of caption retrieval.
///
/// `Degraded` replaces the failure-as-text convention some caption backends
/// use: the retry budget is spent but the condition is not a plain
/// "no captions exist", so callers get a human-readable notice they can
/// surface without treating it as a transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caption {
    /// Trimmed, non-empty transcript text.
    Text(String),
    /// Retrieval kept failing; carries the notice to show the user.
    Degraded(String),
}

/// Fetch the transcript for a video, applying language fallback and the
/// bounded retry policy.
///
/// Retry decisions are per error variant: `NotAvailable` is final and
/// returned immediately, `Connectivity` re-runs the whole language sequence
/// after a fixed backoff, and `Provider` failures consume the same budget
/// but degrade to [`Caption::Degraded`] once it is spent.
pub async fn fetch_transcript(
    provider: &dyn CaptionProvider,
    config: &CaptionConfig,
    video_id: &VideoId,
) -> Result<Caption, CaptionError> {
    let backoff = Duration::from_secs(config.retry_backoff_secs);
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        tracing::debug!(%video_id, attempt, "尝试获取字幕");
        match attempt_languages(provider, video_id).await {
            Ok(text) => {
                tracing::info!(%video_id, length = text.len(), "成功获取字幕");
                return Ok(Caption::Text(text));
            }
            Err(CaptionError::NotAvailable) => {
                tracing::warn!(%video_id, "无法获取任何语言的字幕");
                return Err(CaptionError::NotAvailable);
            }
            Err(CaptionError::Connectivity(msg)) => {
                if attempt >= config.max_attempts {
                    return Err(CaptionError::Connectivity(msg));
                }
                tracing::warn!(%video_id, attempt, error = %msg, "连接错误，正在重试");
                tokio::time::sleep(backoff).await;
            }
            Err(CaptionError::Provider(msg)) => {
                if attempt >= config.max_attempts {
                    tracing::warn!(%video_id, error = %msg, "达到重试上限，降级返回");
                    return Ok(Caption::Degraded(DEGRADED_NOTICE.to_string()));
                }
                tracing::warn!(%video_id, attempt, error = %msg, "获取字幕时出错，正在重试");
                tokio::time::sleep(backoff).await;
            }
        }
    }
}

/// Run through the language preference chain once.
async fn attempt_languages(
    provider: &dyn CaptionProvider,
    video_id: &VideoId,
) -> Result<String, CaptionError> {
    match try_language(provider, video_id, Some("en")).await {
        Ok(text) => {
            tracing::debug!(%video_id, "成功获取英文字幕");
            return Ok(text);
        }
        Err(CaptionError::NotAvailable) => {}
        Err(e) => return Err(e),
    }

    for lang in FALLBACK_LANGUAGES {
        match try_language(provider, video_id, Some(lang)).await {
            Ok(text) => {
                tracing::debug!(%video_id, lang, "成功获取 {} 语言字幕", lang);
                return Ok(text);
            }
            Err(CaptionError::NotAvailable) => continue,
            Err(e) => return Err(e),
        }
    }

    // Last resort: whatever track the provider considers default.
    try_language(provider, video_id, None).await
}

/// Single provider call. An empty or whitespace-only track is as good as
/// no track at all.
async fn try_language(
    provider: &dyn CaptionProvider,
    video_id: &VideoId,
    language: Option<&str>,
) -> Result<String, CaptionError> {
    let text = provider.get_captions(video_id, language).await?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(CaptionError::NotAvailable)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tokio::time::Instant;

    use crate::video_id::extract_video_id;

    fn test_video_id() -> VideoId {
        extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap()
    }

    fn test_config() -> CaptionConfig {
        CaptionConfig::default()
    }

    /// Scripted provider: answers per requested language and records the
    /// order of requests.
    struct ScriptedProvider {
        responses: Vec<(Option<&'static str>, Result<String, CaptionError>)>,
        calls: Mutex<Vec<Option<String>>>,
    }

    impl ScriptedProvider {
        fn new(responses: Vec<(Option<&'static str>, Result<String, CaptionError>)>) -> Self {
            Self {
                responses,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Option<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CaptionProvider for ScriptedProvider {
        async fn get_captions(
            &self,
            _video_id: &VideoId,
            language: Option<&str>,
        ) -> Result<String, CaptionError> {
            self.calls
                .lock()
                .unwrap()
                .push(language.map(|l| l.to_string()));
            for (lang, response) in &self.responses {
                if *lang == language {
                    return match response {
                        Ok(text) => Ok(text.clone()),
                        Err(CaptionError::NotAvailable) => Err(CaptionError::NotAvailable),
                        Err(CaptionError::Connectivity(m)) => {
                            Err(CaptionError::Connectivity(m.clone()))
                        }
                        Err(CaptionError::Provider(m)) => Err(CaptionError::Provider(m.clone())),
                    };
                }
            }
            Err(CaptionError::NotAvailable)
        }
    }

    /// Provider that always fails the same way.
    struct FailingProvider {
        error: fn() -> CaptionError,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl CaptionProvider for FailingProvider {
        async fn get_captions(
            &self,
            _video_id: &VideoId,
            _language: Option<&str>,
        ) -> Result<String, CaptionError> {
            *self.calls.lock().unwrap() += 1;
            Err((self.error)())
        }
    }

    #[tokio::test]
    async fn test_english_success_skips_fallback() {
        let provider =
            ScriptedProvider::new(vec![(Some("en"), Ok("hello world".to_string()))]);
        let result = fetch_transcript(&provider, &test_config(), &test_video_id())
            .await
            .unwrap();
        assert_eq!(result, Caption::Text("hello world".to_string()));
        assert_eq!(provider.calls(), vec![Some("en".to_string())]);
    }

    #[tokio::test]
    async fn test_fallback_stops_at_first_success() {
        let provider = ScriptedProvider::new(vec![
            (Some("en"), Err(CaptionError::NotAvailable)),
            (Some("zh"), Ok("中文字幕".to_string())),
            (Some("zh-cn"), Ok("不应该请求".to_string())),
        ]);
        let result = fetch_transcript(&provider, &test_config(), &test_video_id())
            .await
            .unwrap();
        assert_eq!(result, Caption::Text("中文字幕".to_string()));
        assert_eq!(
            provider.calls(),
            vec![Some("en".to_string()), Some("zh".to_string())]
        );
    }

    #[tokio::test]
    async fn test_all_not_available_is_final() {
        // No scripted entries: everything answers NotAvailable.
        let provider = ScriptedProvider::new(vec![]);
        let err = fetch_transcript(&provider, &test_config(), &test_video_id())
            .await
            .unwrap_err();
        assert!(matches!(err, CaptionError::NotAvailable));
        // en + 8 fallbacks + default, exactly once; not retried.
        let calls = provider.calls();
        assert_eq!(calls.len(), 10);
        assert_eq!(calls[0], Some("en".to_string()));
        assert_eq!(calls[9], None);
    }

    #[tokio::test]
    async fn test_empty_caption_treated_as_unavailable() {
        let provider = ScriptedProvider::new(vec![(Some("en"), Ok("   \n ".to_string()))]);
        let err = fetch_transcript(&provider, &test_config(), &test_video_id())
            .await
            .unwrap_err();
        assert!(matches!(err, CaptionError::NotAvailable));
        assert_eq!(provider.calls().len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connectivity_retries_with_backoff() {
        let provider = FailingProvider {
            error: || CaptionError::Connectivity("connection refused".to_string()),
            calls: Mutex::new(0),
        };
        let started = Instant::now();
        let err = fetch_transcript(&provider, &test_config(), &test_video_id())
            .await
            .unwrap_err();
        assert!(matches!(err, CaptionError::Connectivity(_)));
        // Connectivity aborts each sequence at the first call; three
        // attempts with two 2s backoffs in between.
        assert_eq!(*provider.calls.lock().unwrap(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unexpected_failures_degrade() {
        let provider = FailingProvider {
            error: || CaptionError::Provider("parse error".to_string()),
            calls: Mutex::new(0),
        };
        let result = fetch_transcript(&provider, &test_config(), &test_video_id())
            .await
            .unwrap();
        assert_eq!(result, Caption::Degraded(DEGRADED_NOTICE.to_string()));
        assert_eq!(*provider.calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_result_is_trimmed() {
        let provider =
            ScriptedProvider::new(vec![(Some("en"), Ok("  hello world \n".to_string()))]);
        let result = fetch_transcript(&provider, &test_config(), &test_video_id())
            .await
            .unwrap();
        assert_eq!(result, Caption::Text("hello world".to_string()));
    }
}
