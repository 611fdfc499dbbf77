use log::{debug, info};

use crate::{
    SelectedImage,
    image_model::{GenerationFuture, ImageModel},
};

pub mod personalize_api;

/// Client for a backend exposing `POST /api/personalize`
#[derive(Clone)]
pub struct Personalize {
    base_url: String,
    client: reqwest::Client,
}

impl Personalize {
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            client,
        }
    }}

impl ImageModel for Personalize {
    fn generate(&self, image: SelectedImage) -> GenerationFuture<'static> {
        let this = self.clone();
        Box::pin(async move {
            info!(
                "Submitting {} ({}, {} bytes) to {}",
                image.file_name,
                image.content_type,
                image.data.len(),
                this.base_url
            );
            let result = personalize_api::query(image, &this.base_url, &this.client).await;
            debug!("Personalize result: {result:#?}");
            result
        })
    }
}
