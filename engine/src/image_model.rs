use std::pin::Pin;

use bytes::Bytes;
use color_eyre::Result;

pub mod personalize;
pub use personalize::Personalize;

use crate::{GenerationError, GenerationResult, SelectedImage};

pub type GenerationFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerationResult, GenerationError>> + Send + 'a>>;

/// A remote service turning a photo into a stylized image
pub trait ImageModel {
    fn generate(&self, image: SelectedImage) -> GenerationFuture<'static>;
}

/// Downloads the image a generation result points at
pub async fn fetch_image(client: &reqwest::Client, url: &str) -> Result<Bytes> {
    Ok(client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?)
}
