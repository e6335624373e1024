//! Data-URI images embedded in game files

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// A decoded `data:<mime>;base64,<payload>` image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    /// Parse a base64 data URI. Returns a human-readable reason on failure.
    pub fn parse(uri: &str) -> Result<Self, String> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| "missing `data:` prefix".to_string())?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| "missing `,` separator".to_string())?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| "only base64 data URIs are supported".to_string())?;
        let bytes = STANDARD.decode(payload).map_err(|e| e.to_string())?;

        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    /// Whether the mime type is an image type
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    pub fn encode(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_png() {
        let uri = DataUri::parse("data:image/png;base64,iVBORw==").unwrap();
        assert_eq!(uri.mime, "image/png");
        assert_eq!(uri.bytes, vec![0x89, b'P', b'N', b'G']);
        assert!(uri.is_image());
        assert_eq!(uri.encode(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_rejects_non_data_uri() {
        assert!(DataUri::parse("https://example.com/a.png").is_err());
        assert!(DataUri::parse("data:image/png,plain").is_err());
        assert!(DataUri::parse("data:image/png;base64").is_err());
        assert!(DataUri::parse("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn test_text_mime_is_not_image() {
        let uri = DataUri::parse("data:text/plain;base64,aGk=").unwrap();
        assert!(!uri.is_image());
        assert_eq!(uri.bytes, b"hi");
    }
}
