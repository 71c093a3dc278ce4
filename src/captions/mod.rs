//! Caption retrieval
//!
//! The [`CaptionProvider`] trait is the seam between the retry/fallback
//! logic in [`retriever`] and the actual YouTube client in [`innertube`].

pub mod innertube;
pub mod retriever;

pub use innertube::InnertubeClient;
pub use retriever::{fetch_transcript, Caption};

use async_trait::async_trait;

use crate::error::CaptionError;
use crate::video_id::VideoId;

/// An upstream source of caption text.
///
/// `language` is a BCP-47-ish code ("en", "zh-cn"); `None` asks for the
/// provider's default track. Failure variants distinguish "no such track"
/// from connectivity trouble so the retriever can decide whether to fall
/// back or retry.
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    async fn get_captions(
        &self,
        video_id: &VideoId,
        language: Option<&str>,
    ) -> Result<String, CaptionError>;
}
