use std::path::PathBuf;

use color_eyre::{Result, eyre::eyre};
use engine::{Config, ImageModel, ImgModBox, Personalize, SelectedImage, Session, fetch_image};
use iced::{Task, widget::image::Handle as ImgHandle};
use log::{info, warn};

use crate::{
    StringError,
    message::{ContextMessage, Message},
};

pub const DOWNLOAD_FILE_NAME: &str = "portrait-ai.png";
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

pub struct Context {
    pub config: Config,
    pub session: Session,
    /// Shown in the drop zone. Replaced or dropped together with the selection.
    pub preview: Option<ImgHandle>,
    /// Rendered result image. `None` while the fetch is running, `Err` if it failed.
    pub result_image: Option<Result<ImgHandle, String>>,
    /// A dropped file is being read. Further drops are ignored until it is done.
    drop_pending: bool,
    model: ImgModBox,
    client: reqwest::Client,
}

impl Context {
    pub fn from_config(config: Config) -> Self {
        let client = reqwest::Client::new();
        let model = Box::new(Personalize::with_client(
            config.api_url.clone(),
            client.clone(),
        ));
        Self::with_model(config, model, client)
    }

    pub fn with_model(config: Config, model: ImgModBox, client: reqwest::Client) -> Self {
        Self {
            config,
            session: Session::new(),
            preview: None,
            result_image: None,
            drop_pending: false,
            model,
            client,
        }
    }

    pub fn update(&mut self, message: ContextMessage) -> Result<Task<Message>> {
        use ContextMessage::*;
        match message {
            ImagePicked(image) => {
                if let Some(image) = image? {
                    self.select(image);
                }
                Ok(Task::none())
            }

            DropLoaded(image) => {
                self.drop_pending = false;
                self.select(image?);
                Ok(Task::none())
            }

            GenerationFinished(epoch, outcome) => {
                self.session.complete_generation(epoch, outcome);
                match self.session.result() {
                    Some(result) if epoch == self.session.epoch() => {
                        Ok(self.fetch_result_image(result.url.clone()))
                    }
                    _ => Ok(Task::none()),
                }
            }

            ResultImageFetched(url, handle) => {
                if self.session.result().is_some_and(|r| r.url == url) {
                    if let Err(e) = &handle {
                        warn!("Couldn't fetch {url} for display: {e}");
                    }
                    self.result_image = Some(handle.map_err(|e| e.to_string()));
                }
                Ok(Task::none())
            }

            DownloadSaved(path) => {
                if let Some(path) = path? {
                    info!("Saved result to {}", path.display());
                }
                Ok(Task::none())
            }
        }
    }

    pub fn select(&mut self, image: SelectedImage) {
        self.preview = Some(ImgHandle::from_bytes(image.data.clone()));
        self.result_image = None;
        self.session.select(image);
    }

    pub fn clear(&mut self) {
        self.preview = None;
        self.result_image = None;
        self.session.clear();
    }

    pub fn pick_image(&self) -> Task<Message> {
        Task::perform(
            async { pick_image().await.map_err(StringError::from) },
            |res| ContextMessage::ImagePicked(res).into(),
        )
    }

    /// Only the first of several dropped files is taken. Returns `None` for the others.
    pub fn load_dropped(&mut self, path: PathBuf) -> Option<Task<Message>> {
        self.session.drag_left();
        if self.drop_pending {
            info!("Ignoring drop of {} while reading another file", path.display());
            return None;
        }
        self.drop_pending = true;
        Some(Task::perform(
            async move { SelectedImage::load(path).await.map_err(StringError::from) },
            |res| ContextMessage::DropLoaded(res).into(),
        ))
    }

    /// Does nothing if there is no selection or a generation is already running
    pub fn generate(&mut self) -> Task<Message> {
        let Some(request) = self.session.begin_generation() else {
            return Task::none();
        };
        self.result_image = None;
        let epoch = request.epoch;
        Task::perform(self.model.generate(request.image), move |res| {
            ContextMessage::GenerationFinished(epoch, res).into()
        })
    }

    pub fn download(&self) -> Result<Task<Message>> {
        let url = self
            .session
            .result()
            .ok_or(eyre!("Nothing to download yet"))?
            .url
            .clone();
        let client = self.client.clone();
        Ok(Task::perform(
            async move {
                save_result(client, url)
                    .await
                    .map_err(StringError::from)
            },
            |res| ContextMessage::DownloadSaved(res).into(),
        ))
    }

    fn fetch_result_image(&self, url: String) -> Task<Message> {
        let client = self.client.clone();
        let fetch_url = url.clone();
        Task::perform(
            async move {
                fetch_image(&client, &fetch_url)
                    .await
                    .map(|bytes| ImgHandle::from_bytes(bytes))
                    .map_err(StringError::from)
            },
            move |res| ContextMessage::ResultImageFetched(url, res).into(),
        )
    }
}

async fn pick_image() -> Result<Option<SelectedImage>> {
    let Some(handle) = rfd::AsyncFileDialog::new()
        .add_filter("Image", IMAGE_EXTENSIONS)
        .pick_file()
        .await
    else {
        return Ok(None);
    };
    Ok(Some(SelectedImage::load(handle.path()).await?))
}

async fn save_result(client: reqwest::Client, url: String) -> Result<Option<PathBuf>> {
    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_file_name(DOWNLOAD_FILE_NAME)
        .save_file()
        .await
    else {
        return Ok(None);
    };
    let bytes = fetch_image(&client, &url).await?;
    let path = handle.path().to_path_buf();
    tokio::fs::write(&path, &bytes).await?;
    Ok(Some(path))
}
