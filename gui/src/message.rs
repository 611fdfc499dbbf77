use std::path::PathBuf;

use derive_more::{From, TryInto};
use engine::{GenerationError, GenerationResult, SelectedImage};
use iced::widget::image::Handle as ImgHandle;

use crate::StringError;

#[derive(Debug, Clone, From)]
pub enum Message {
    Ui(UiMessage),
    Context(ContextMessage),
}

#[derive(Debug, Clone, From, TryInto)]
pub enum UiMessage {
    Portrait(ui_messages::Portrait),
    ErrorModal(ui_messages::ErrorModal),
}

/// Completions of background work, handled by the context
#[derive(Debug, Clone)]
pub enum ContextMessage {
    /// `None` if the file dialog was dismissed
    ImagePicked(Result<Option<SelectedImage>, StringError>),
    DropLoaded(Result<SelectedImage, StringError>),
    GenerationFinished(u64, Result<GenerationResult, GenerationError>),
    ResultImageFetched(String, Result<ImgHandle, StringError>),
    DownloadSaved(Result<Option<PathBuf>, StringError>),
}

pub mod ui_messages {
    use std::path::PathBuf;

    use iced::widget::text_editor;

    #[derive(Debug, Clone)]
    pub enum Portrait {
        BrowsePressed,
        DragEntered,
        DragLeft,
        FileDropped(PathBuf),
        ClearPressed,
        GeneratePressed,
        DownloadPressed,
    }

    #[derive(Debug, Clone)]
    pub enum ErrorModal {
        Dismiss,
        EditAction(text_editor::Action),
    }
}

impl From<ui_messages::Portrait> for Message {
    fn from(m: ui_messages::Portrait) -> Self {
        Message::Ui(m.into())
    }
}
