//! Seam between the request handlers and the external generative model.
//!
//! Handlers only see [`GenerativeModel`]; the Gemini implementation lives in
//! [`crate::gemini`].

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Response blocked: {0}")]
    Blocked(String),
}

/// A decoded file sent alongside the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    /// Decode a base64 payload as sent by the browser.
    ///
    /// Accepts either bare base64 or a `data:<mime>;base64,` URL. Line breaks
    /// and other ASCII whitespace inside the payload are ignored.
    pub fn from_base64(mime_type: &str, encoded: &str) -> Result<Self, base64::DecodeError> {
        let encoded = encoded.trim();
        let payload = match encoded.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => encoded,
        };
        let payload: Vec<u8> = payload
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.decode(payload)?,
        })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// Given a prompt and optional attachments, returns the model's raw text.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, prompt: &str, attachments: &[Attachment])
        -> Result<String, ModelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base64() {
        let attachment = Attachment::from_base64("image/png", "aGVsbG8=").unwrap();
        assert_eq!(attachment.mime_type, "image/png");
        assert_eq!(attachment.data, b"hello");
        assert_eq!(attachment.to_base64(), "aGVsbG8=");
    }

    #[test]
    fn test_from_data_url() {
        let attachment =
            Attachment::from_base64("application/pdf", "data:application/pdf;base64,aGVsbG8=")
                .unwrap();
        assert_eq!(attachment.data, b"hello");
    }

    #[test]
    fn test_from_base64_ignores_line_breaks() {
        let attachment = Attachment::from_base64("image/png", "aGVs\nbG8=").unwrap();
        assert_eq!(attachment.data, b"hello");

        let attachment = Attachment::from_base64("image/png", "aGVs\r\n bG8=\n").unwrap();
        assert_eq!(attachment.data, b"hello");
    }

    #[test]
    fn test_from_base64_rejects_garbage() {
        assert!(Attachment::from_base64("image/png", "not base64!!").is_err());
    }
}
