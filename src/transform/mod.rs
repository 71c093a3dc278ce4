//! Content transformation
//!
//! Builds the mode-specific prompts and makes the single-shot LLM call for
//! each of the three operations: analyze, format, translate. All prompts
//! and degraded-mode notices are part of the external contract and stay
//! byte-identical across releases.

use crate::captions::Caption;
use crate::error::LlmError;
use crate::llm::{ChatRequest, LlmHandle};

/// Returned (as a success) when the LLM credential is missing.
pub const SERVICE_UNAVAILABLE_NOTICE: &str = "服务暂时不可用：缺少必要的API配置。请联系管理员。";

/// Returned (as the analysis) when the caption could not be retrieved, so
/// no LLM quota is spent on unusable input.
pub const CAPTION_MISSING_NOTICE: &str = "很抱歉，无法获取此视频的字幕内容。可能的原因：\n\n\
    1. 视频没有提供字幕\n2. 字幕访问受到限制\n3. 网络连接问题\n\n请尝试其他视频，或稍后再试。";

const ANALYZE_SYSTEM: &str = "你是一个专业的内容分析助手，擅长总结和分析文本内容。请用中文回答。";

const FORMAT_SYSTEM: &str = "你是一个专业的文本格式化助手。请将输入的字幕文本进行合理的分句、分行和分段处理，\
    使其更易于阅读和理解。保持原文内容不变，只调整格式和结构。直接输出格式化后的文本，不要添加任何说明或前缀。";

const TRANSLATE_SYSTEM: &str = "你是一个专业的翻译助手。请将用户提供的文本翻译成中文。保持原文的格式和结构，\
    只进行语言翻译，不要添加任何解释或说明。如果原文已经是中文，请直接返回原文。";

/// Summarize a transcript.
///
/// Short-circuits on an unconfigured handle or a degraded caption; only a
/// real transcript reaches the LLM. `max_tokens` 5000.
pub async fn analyze(llm: &LlmHandle, caption: &Caption) -> Result<String, LlmError> {
    let LlmHandle::Configured(chat) = llm else {
        return Ok(SERVICE_UNAVAILABLE_NOTICE.to_string());
    };
    let text = match caption {
        Caption::Degraded(_) => return Ok(CAPTION_MISSING_NOTICE.to_string()),
        Caption::Text(text) => text,
    };

    tracing::info!("开始使用 AI 分析内容");
    let analysis = chat
        .chat(ChatRequest {
            system: ANALYZE_SYSTEM.to_string(),
            user: format!(
                "以下是一个YouTube视频的字幕内容，请分析并总结其主要内容、关键点和核心信息。\
                 请以清晰的结构呈现，使用简洁的中文。字幕内容：\n\n{}",
                text
            ),
            max_tokens: 5000,
            temperature: None,
        })
        .await?;
    tracing::info!("AI 分析完成");
    Ok(analysis)
}

/// Re-segment a transcript into readable sentences and paragraphs.
///
/// A chat failure degrades in-band to a "格式化失败" message; the caller
/// still gets an HTTP 200 with the original transcript alongside.
/// `max_tokens` 8000.
pub async fn format_transcript(llm: &LlmHandle, text: &str) -> String {
    let LlmHandle::Configured(chat) = llm else {
        return SERVICE_UNAVAILABLE_NOTICE.to_string();
    };

    tracing::info!("开始使用 AI 格式化字幕");
    let result = chat
        .chat(ChatRequest {
            system: FORMAT_SYSTEM.to_string(),
            user: format!(
                "请将以下字幕文本进行格式化处理，合理分句分行分段，使其更清晰易读。\
                 请保持原文内容完整，只优化格式，直接输出结果：\n\n{}",
                text
            ),
            max_tokens: 8000,
            temperature: None,
        })
        .await;
    match result {
        Ok(formatted) => {
            let formatted = formatted.trim().to_string();
            tracing::info!(length = formatted.len(), "字幕格式化完成");
            formatted
        }
        Err(e) => {
            tracing::error!(error = %e, "格式化字幕时出错");
            format!("格式化失败: {}", e)
        }
    }
}

/// Translate text into Chinese, preserving structure. Text already in
/// Chinese passes through unchanged (the instruction is part of the system
/// prompt). Lower temperature for deterministic output. `max_tokens` 4000.
pub async fn translate(llm: &LlmHandle, text: &str) -> Result<String, LlmError> {
    let LlmHandle::Configured(chat) = llm else {
        return Err(LlmError::Unconfigured);
    };

    let translated = chat
        .chat(ChatRequest {
            system: TRANSLATE_SYSTEM.to_string(),
            user: format!("请将以下文本翻译成中文：\n\n{}", text),
            max_tokens: 4000,
            temperature: Some(0.3),
        })
        .await?;
    Ok(translated.trim().to_string())
}
