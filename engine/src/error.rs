use thiserror::Error;

pub const PAYMENT_REQUIRED: &str = "PAYMENT_REQUIRED";
pub const INVALID_RESPONSE_FORMAT: &str = "Invalid response format";

const GENERATION_FAILED_TITLE: &str = "Generation Failed";
const INSUFFICIENT_CREDITS_TITLE: &str = "Insufficient Credits";
const INSUFFICIENT_CREDITS_MESSAGE: &str = "The AI model requires credits to run. Please add a payment method to your Replicate account.";
const FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors returned by a generation attempt
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// Network, DNS or body decoding failure
    #[error("{0}")]
    Transport(String),

    #[error("Invalid response format")]
    InvalidResponseFormat,

    #[error("PAYMENT_REQUIRED")]
    PaymentRequired,
}

/// The (title, message) pair shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub title: String,
    pub message: String,
}

impl GenerationError {
    /// Classifies a raw failure detail. The upstream signals missing credits with a bare token.
    pub fn from_detail(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        match detail.trim() {
            PAYMENT_REQUIRED => Self::PaymentRequired,
            _ => Self::Transport(detail),
        }
    }

    pub fn notice(&self) -> ErrorNotice {
        match self {
            Self::PaymentRequired => ErrorNotice {
                title: INSUFFICIENT_CREDITS_TITLE.into(),
                message: INSUFFICIENT_CREDITS_MESSAGE.into(),
            },
            Self::InvalidResponseFormat => ErrorNotice {
                title: GENERATION_FAILED_TITLE.into(),
                message: INVALID_RESPONSE_FORMAT.into(),
            },
            Self::Transport(detail) => ErrorNotice {
                title: GENERATION_FAILED_TITLE.into(),
                message: if detail.trim().is_empty() {
                    FALLBACK_MESSAGE.into()
                } else {
                    detail.clone()
                },
            },
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        Self::from_detail(e.to_string())
    }
}
