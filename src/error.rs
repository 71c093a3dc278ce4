use thiserror::Error;

/// Top-level error type for server startup paths.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Caption client error: {0}")]
    Captions(#[from] CaptionError),

    #[error("LLM client error: {0}")]
    Llm(#[from] LlmError),
}

/// Caption retrieval errors.
///
/// The retriever branches on these variants: `NotAvailable` aborts the
/// language fallback chain, `Connectivity` re-enters the retry loop, and
/// `Provider` consumes a retry before degrading.
#[derive(Error, Debug)]
pub enum CaptionError {
    /// No caption track exists for this video in any attempted language.
    #[error("无法获取视频字幕: 无法获取任何语言的字幕")]
    NotAvailable,

    /// The caption provider could not be reached (connect/timeout failure).
    #[error("获取字幕失败，连接错误: {0}")]
    Connectivity(String),

    /// Any other upstream failure: bad HTTP status, malformed payload.
    #[error("获取字幕时出错: {0}")]
    Provider(String),
}

/// LLM chat-completion errors.
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API credential was configured at startup.
    #[error("服务暂时不可用：缺少必要的API配置")]
    Unconfigured,

    /// The LLM endpoint could not be reached (connect/timeout failure).
    #[error("无法连接AI服务: {0}")]
    Connectivity(String),

    /// The endpoint answered with an error status (auth, quota, server error).
    #[error("AI服务返回错误: {0}")]
    Api(String),

    /// The endpoint answered 200 but the body was not a usable completion.
    #[error("AI服务响应格式异常: {0}")]
    Malformed(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ServerError>;
