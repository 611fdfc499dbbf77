use reqwest::{
    Client, StatusCode,
    multipart::{Form, Part},
};
use serde_json::Value;

use crate::{GenerationError, GenerationResult, SelectedImage, error::PAYMENT_REQUIRED};

pub const PERSONALIZE_PATH: &str = "/api/personalize";
pub const IMAGE_FIELD: &str = "image";

pub fn endpoint(base_url: &str) -> String {
    format!("{}{PERSONALIZE_PATH}", base_url.trim_end_matches('/'))
}

/// Posts the image as multipart form data and interprets the answer
pub async fn query(
    image: SelectedImage,
    base_url: &str,
    client: &Client,
) -> Result<GenerationResult, GenerationError> {
    let SelectedImage {
        data,
        file_name,
        content_type,
    } = image;

    let part = Part::bytes(data.to_vec())
        .file_name(file_name)
        .mime_str(content_type.as_ref())?;
    let form = Form::new().part(IMAGE_FIELD, part);

    let resp = client.post(endpoint(base_url)).multipart(form).send().await?;

    let status = resp.status();
    let body = resp.text().await?;
    interpret(status, &body)
}

/// The status code is only consulted for the payment signal. Everything else is decided by the body.
pub fn interpret(status: StatusCode, body: &str) -> Result<GenerationResult, GenerationError> {
    if status == StatusCode::PAYMENT_REQUIRED {
        return Err(GenerationError::PaymentRequired);
    }

    let value = serde_json::from_str::<Value>(body)
        .map_err(|e| GenerationError::from_detail(decode_failure_detail(body, e)))?;

    if value.get("error").and_then(Value::as_str) == Some(PAYMENT_REQUIRED) {
        return Err(GenerationError::PaymentRequired);
    }

    interpret_value(&value)
}

pub fn interpret_value(value: &Value) -> Result<GenerationResult, GenerationError> {
    let url = match value.get("result") {
        Some(Value::Array(items)) => items.first().and_then(Value::as_str),
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    };

    url.filter(|u| !u.is_empty())
        .map(GenerationResult::new)
        .ok_or(GenerationError::InvalidResponseFormat)
}

// a bare PAYMENT_REQUIRED body isn't json, but must still be recognized
fn decode_failure_detail(body: &str, e: serde_json::Error) -> String {
    if body.trim() == PAYMENT_REQUIRED {
        PAYMENT_REQUIRED.into()
    } else {
        format!("Couldn't decode response: {e}")
    }
}
