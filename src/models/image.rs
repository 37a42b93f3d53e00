use crate::models::variation::Variation;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";
pub const OUTPUT_MIME_TYPE: &str = "image/png";

/// Uploaded photo split into MIME type and base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub mime_type: String,
    pub data: String,
}

impl SourceImage {
    /// Accepts either a `data:image/<type>;base64,<payload>` URL or a bare
    /// base64 payload, which is assumed to be JPEG.
    pub fn parse(encoded: &str) -> Self {
        match split_data_url(encoded) {
            Some((mime_type, data)) => SourceImage {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            },
            None => SourceImage {
                mime_type: DEFAULT_MIME_TYPE.to_string(),
                data: encoded.to_string(),
            },
        }
    }

    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        SourceImage {
            mime_type: mime_type.into(),
            data: general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

/// Returns `(mime_type, payload)` when `encoded` carries an image data URL prefix.
fn split_data_url(encoded: &str) -> Option<(&str, &str)> {
    let rest = encoded.strip_prefix("data:")?;
    let (mime_type, payload) = rest.split_once(";base64,")?;
    let subtype = mime_type.strip_prefix("image/")?;
    let valid = !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'));
    valid.then_some((mime_type, payload))
}

/// One generated headshot, always re-wrapped as a PNG data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub variation: Variation,
    pub data_url: String,
}

impl GeneratedImage {
    pub fn from_payload(variation: Variation, payload: &str) -> Self {
        GeneratedImage {
            variation,
            data_url: format!("data:{};base64,{}", OUTPUT_MIME_TYPE, payload),
        }
    }

    pub fn payload(&self) -> &str {
        self.data_url
            .split_once(";base64,")
            .map(|(_, payload)| payload)
            .unwrap_or(&self.data_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_png_data_url() {
        let image = SourceImage::parse("data:image/png;base64,XYZ");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "XYZ");
    }

    #[test]
    fn test_parse_plain_payload_defaults_to_jpeg() {
        let image = SourceImage::parse("iVBORw0KGgo=");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "iVBORw0KGgo=");
    }

    #[test]
    fn test_parse_subtype_with_symbols() {
        let image = SourceImage::parse("data:image/svg+xml;base64,PHN2Zz4=");
        assert_eq!(image.mime_type, "image/svg+xml");
        assert_eq!(image.data, "PHN2Zz4=");
    }

    #[test]
    fn test_parse_non_image_prefix_is_kept_verbatim() {
        let raw = "data:text/plain;base64,aGVsbG8=";
        let image = SourceImage::parse(raw);
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, raw);
    }

    #[test]
    fn test_from_bytes() {
        let image = SourceImage::from_bytes(b"abc", "image/webp");
        assert_eq!(image.data, "YWJj");
        assert_eq!(image.to_data_url(), "data:image/webp;base64,YWJj");
    }

    #[test]
    fn test_generated_image_is_png() {
        let image = GeneratedImage::from_payload(Variation::Elevated, "QUJD");
        assert_eq!(image.data_url, "data:image/png;base64,QUJD");
        assert_eq!(image.payload(), "QUJD");
    }
}
