use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;

/// Current QR code for a company. Older backend builds name the image
/// field `image_base64`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QrPayload {
    pub company_id: Option<i64>,
    pub qr_image: Option<String>,
    pub image_base64: Option<String>,
}

impl QrPayload {
    pub fn image_data(&self) -> Option<&str> {
        self.qr_image
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.image_base64.as_deref().filter(|s| !s.is_empty()))
    }

    /// Decoded image bytes, accepting both bare base64 and `data:` URLs.
    pub fn decode_image(&self) -> Option<Result<Vec<u8>, base64::DecodeError>> {
        let data = self.image_data()?;
        let data = match data.split_once(";base64,") {
            Some((prefix, rest)) if prefix.starts_with("data:") => rest,
            _ => data,
        };
        Some(STANDARD.decode(data.trim()))
    }
}
