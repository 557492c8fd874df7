//! Embedded image payloads returned by the AI service
//!
//! The service answers with base64 images in several shapes: full data URLs,
//! bare base64, or base64 with a dangling `base64,` prefix. Everything is
//! turned into a data URL; unknown shapes fall back to PNG and are logged.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

const PNG_SIGNATURE: &str = "iVBORw0KGgo";
const JPEG_SIGNATURE: &str = "/9j/";
/// Characters inspected by the base64 charset check
const CHARSET_SAMPLE: usize = 100;

/// Image format inferred from a payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadFormat {
    Png,
    Jpeg,
    /// Already a data URL; the MIME type is kept as sent
    DataUrl,
}

/// A displayable embedded image
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedImage {
    pub format: PayloadFormat,
    /// `data:image/...;base64,...` reference
    pub data_url: String,
    /// False when the format had to be guessed
    pub recognized: bool,
}

impl EncodedImage {
    /// MIME type from the data URL header
    pub fn mime(&self) -> &str {
        self.data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split([';', ',']).next())
            .unwrap_or("image/png")
    }

    /// Raw image bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        let body = self
            .data_url
            .split_once(',')
            .map(|(_, body)| body)
            .unwrap_or(&self.data_url);
        BASE64.decode(body)
    }

    /// File extension matching the MIME type
    pub fn extension(&self) -> &'static str {
        match self.mime() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

fn looks_like_base64(s: &str) -> bool {
    let head: String = s.chars().take(CHARSET_SAMPLE).collect();
    let body = head.trim_end_matches('=');
    !body.is_empty()
        && body
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Classify a base64 payload and turn it into a data URL
pub fn sniff(raw: &str) -> EncodedImage {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.starts_with("data:image/") {
        return EncodedImage {
            format: PayloadFormat::DataUrl,
            data_url: cleaned,
            recognized: true,
        };
    }

    let (format, recognized) = if cleaned.starts_with(JPEG_SIGNATURE) {
        (PayloadFormat::Jpeg, true)
    } else if cleaned.starts_with(PNG_SIGNATURE) {
        (PayloadFormat::Png, true)
    } else {
        (PayloadFormat::Png, false)
    };

    if looks_like_base64(&cleaned) {
        if !recognized {
            log::warn!(
                "Unrecognized image signature {:?}, assuming PNG",
                cleaned.chars().take(12).collect::<String>()
            );
        }
        let mime = match format {
            PayloadFormat::Jpeg => "jpeg",
            _ => "png",
        };
        return EncodedImage {
            format,
            data_url: format!("data:image/{mime};base64,{cleaned}"),
            recognized,
        };
    }

    if cleaned.starts_with("base64,") {
        log::debug!("Payload carries a bare base64 prefix, completing as PNG");
        return EncodedImage {
            format: PayloadFormat::Png,
            data_url: format!("data:image/png;{cleaned}"),
            recognized: true,
        };
    }

    log::warn!(
        "Unknown image payload ({} chars), trying PNG",
        cleaned.len()
    );
    EncodedImage {
        format: PayloadFormat::Png,
        data_url: format!("data:image/png;base64,{cleaned}"),
        recognized: false,
    }
}
