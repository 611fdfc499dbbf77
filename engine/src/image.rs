use std::path::Path;

use bytes::Bytes;
use color_eyre::{
    Result,
    eyre::{WrapErr as _, ensure},
};
use mime::Mime;

/// A photo picked by the user, kept in memory until it is replaced or cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub data: Bytes,
    pub file_name: String,
    pub content_type: Mime,
}

impl SelectedImage {
    pub fn new(data: impl Into<Bytes>, file_name: impl Into<String>, content_type: Mime) -> Self {
        Self {
            data: data.into(),
            file_name: file_name.into(),
            content_type,
        }
    }

    /// Reads an image file, guessing its content type from the extension.
    /// Anything that doesn't look like an image is rejected.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content_type = mime_guess::from_path(path).first_or_octet_stream();
        ensure!(
            content_type.type_() == mime::IMAGE,
            "{} is not an image ({content_type})",
            path.display()
        );

        let data = tokio::fs::read(path)
            .await
            .wrap_err_with(|| format!("Couldn't read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".into());

        Ok(Self::new(data, file_name, content_type))
    }
}

/// Locator of a generated image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub url: String,
}

impl GenerationResult {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// A submission of the current selection. `epoch` identifies the selection it was built from.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub epoch: u64,
    pub image: SelectedImage,
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::Builder;

    use super::*;

    #[tokio::test]
    async fn load_png() -> Result<()> {
        let mut file = Builder::new().suffix(".png").tempfile()?;
        file.write_all(&[0x89, b'P', b'N', b'G'])?;

        let img = SelectedImage::load(file.path()).await?;
        assert_eq!(img.content_type, mime::IMAGE_PNG);
        assert_eq!(img.data.as_ref(), &[0x89, b'P', b'N', b'G']);
        assert!(img.file_name.ends_with(".png"));
        Ok(())
    }

    #[tokio::test]
    async fn reject_non_image() -> Result<()> {
        let mut file = Builder::new().suffix(".txt").tempfile()?;
        file.write_all(b"hello")?;

        let err = SelectedImage::load(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("is not an image"));
        Ok(())
    }
}
