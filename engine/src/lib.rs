pub use image_model::ImageModel;
pub use mime;

pub mod config;
pub mod error;
pub mod image;
pub mod image_model;
pub mod session;

pub use config::Config;
pub use error::{ErrorNotice, GenerationError};
pub use image::{GenerationRequest, GenerationResult, SelectedImage};
pub use image_model::{Personalize, fetch_image};
pub use session::{Session, UiStatus};

pub type ImgModBox = Box<dyn ImageModel + Send>;
