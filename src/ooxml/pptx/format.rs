//! Format types for PPTX presentations.

use crate::ooxml::opc::constants::content_type as ct;

/// Image formats a picture part may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Get the content type for this image format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => ct::PNG,
            Self::Jpeg => ct::JPEG,
            Self::Gif => ct::GIF,
            Self::Bmp => ct::BMP,
            Self::Tiff => ct::TIFF,
        }
    }

    /// Get the file extension used for media parts of this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Detect image format from bytes (magic number detection).
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PNG: 89 50 4E 47
        if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(Self::Png);
        }

        // JPEG: FF D8 FF
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(Self::Jpeg);
        }

        // GIF: GIF8
        if bytes.starts_with(b"GIF8") {
            return Some(Self::Gif);
        }

        // BMP: BM
        if bytes.starts_with(b"BM") {
            return Some(Self::Bmp);
        }

        // TIFF: II*\0 (little-endian) or MM\0* (big-endian)
        if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return Some(Self::Tiff);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_known_signatures() {
        let cases: [(&[u8], ImageFormat); 6] = [
            (b"\x89PNG\r\n\x1a\n", ImageFormat::Png),
            (&[0xFF, 0xD8, 0xFF, 0xE0], ImageFormat::Jpeg),
            (b"GIF89a", ImageFormat::Gif),
            (b"BM\x00\x00\x00\x00", ImageFormat::Bmp),
            (b"II*\x00\x08", ImageFormat::Tiff),
            (b"MM\x00*\x00", ImageFormat::Tiff),
        ];
        for (bytes, expected) in cases {
            assert_eq!(ImageFormat::detect_from_bytes(bytes), Some(expected));
        }
    }

    #[test]
    fn test_rejects_unknown_or_short_input() {
        assert_eq!(ImageFormat::detect_from_bytes(b"PNG"), None);
        assert_eq!(ImageFormat::detect_from_bytes(b"<svg xmlns="), None);
        assert_eq!(ImageFormat::detect_from_bytes(&[]), None);
    }

    #[test]
    fn test_media_naming() {
        assert_eq!(ImageFormat::Jpeg.extension(), "jpeg");
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }
}
