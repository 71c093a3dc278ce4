//! HTTP request handlers
//!
//! One handler per endpoint. Each follows the same shape: validate input,
//! extract the video id, fetch captions, optionally transform, assemble
//! the JSON envelope. The field names, messages, and status codes are the
//! external contract and must not drift.
//!
//! Two envelope families coexist, matching what clients already parse:
//! `/api/transcript` and `/api/analyze` report failures as
//! `{"error": true, "message": ...}`, while `/api/format-transcript` and
//! `/api/translate` put the message string directly in `"error"`.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::captions::{fetch_transcript, Caption};
use crate::state::AppState;
use crate::transform;
use crate::video_id::extract_video_id;

#[derive(Deserialize)]
pub struct UrlRequest {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    text: Option<String>,
}

/// `{"error": true, "message": ...}` failure envelope.
fn error_message(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({"error": true, "message": message.into()})),
    )
        .into_response()
}

/// Service index
/// GET /
pub async fn root_index() -> Json<serde_json::Value> {
    Json(json!({
        "message": "EasyYoutube API Server",
        "status": "running",
        "endpoints": {
            "health": "/api/health",
            "transcript": "/api/transcript",
            "analyze": "/api/analyze",
            "format": "/api/format-transcript",
            "translate": "/api/translate",
        }
    }))
}

/// Liveness probe
/// GET /api/health
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({"status": "ok"}))
}

/// Raw transcript endpoint
/// POST /api/transcript with `{"url": ...}`
pub async fn video_transcript(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UrlRequest>,
) -> Response {
    let Some(url) = req.url.filter(|u| !u.is_empty()) else {
        return error_message(StatusCode::BAD_REQUEST, "请提供YouTube视频URL");
    };
    let Some(video_id) = extract_video_id(&url) else {
        return error_message(StatusCode::BAD_REQUEST, "无效的YouTube视频URL");
    };

    tracing::info!(%video_id, "正在获取视频字幕");
    match fetch_transcript(state.captions.as_ref(), &state.config.captions, &video_id).await {
        Ok(caption) => {
            // A degraded result still ships as the transcript body; the
            // notice text tells the user what happened.
            let transcript = match caption {
                Caption::Text(text) | Caption::Degraded(text) => text,
            };
            Json(json!({
                "error": false,
                "transcript": transcript,
                "video_id": video_id.as_str(),
                "url": url,
            }))
            .into_response()
        }
        Err(e) => {
            tracing::error!(%video_id, error = %e, "获取字幕时出错");
            error_message(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Analysis endpoint
/// POST /api/analyze with `{"url": ...}`
pub async fn analyze_video(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UrlRequest>,
) -> Response {
    let Some(url) = req.url.filter(|u| !u.is_empty()) else {
        return error_message(StatusCode::BAD_REQUEST, "请提供YouTube视频URL");
    };
    let Some(video_id) = extract_video_id(&url) else {
        return error_message(StatusCode::BAD_REQUEST, "无效的YouTube视频URL");
    };

    tracing::info!(%video_id, "正在处理视频");
    let caption =
        match fetch_transcript(state.captions.as_ref(), &state.config.captions, &video_id).await {
            Ok(caption) => caption,
            Err(e) => {
                tracing::error!(%video_id, error = %e, "处理视频时出错");
                return error_message(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
            }
        };

    match transform::analyze(&state.llm, &caption).await {
        Ok(analysis) => Json(json!({"error": false, "analysis": analysis})).into_response(),
        Err(e) => {
            tracing::error!(%video_id, error = %e, "分析内容时出错");
            error_message(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("分析内容时出错: {}", e),
            )
        }
    }
}

/// Formatted transcript endpoint
/// POST /api/format-transcript with `{"url": ...}`
pub async fn format_video_transcript(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UrlRequest>,
) -> Response {
    let Some(url) = req.url.filter(|u| !u.is_empty()) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "缺少URL参数"}))).into_response();
    };
    let Some(video_id) = extract_video_id(&url) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "无效的YouTube URL"})),
        )
            .into_response();
    };

    tracing::info!(%video_id, "收到格式化字幕请求");
    let transcript =
        match fetch_transcript(state.captions.as_ref(), &state.config.captions, &video_id).await {
            Ok(Caption::Text(text)) => text,
            Ok(Caption::Degraded(_)) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "无法获取视频字幕"})),
                )
                    .into_response();
            }
            Err(e) => {
                tracing::error!(%video_id, error = %e, "处理格式化字幕请求时出错");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": e.to_string()})),
                )
                    .into_response();
            }
        };

    let formatted = transform::format_transcript(&state.llm, &transcript).await;
    Json(json!({
        "formatted_transcript": formatted,
        "original_transcript": transcript,
        "video_id": video_id.as_str(),
        "url": url,
    }))
    .into_response()
}

/// Translation endpoint
/// POST /api/translate with `{"text": ...}`
pub async fn translate_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TranslateRequest>,
) -> Response {
    // Checked before input validation; this endpoint alone reports a
    // missing credential as a hard 500.
    if !state.llm.is_configured() {
        return error_message(
            StatusCode::INTERNAL_SERVER_ERROR,
            "服务暂时不可用：缺少必要的API配置",
        );
    }
    let Some(text) = req.text.filter(|t| !t.is_empty()) else {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "缺少文本参数"}))).into_response();
    };

    match transform::translate(&state.llm, &text).await {
        Ok(translated) => Json(json!({
            "translated_text": translated,
            "original_text": text,
        }))
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "翻译错误");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": format!("翻译失败: {}", e)})),
            )
                .into_response()
        }
    }
}
