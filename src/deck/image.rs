//! Image inputs for image slides.

use crate::common::{Error, Result};
use crate::ooxml::pptx::ImageFormat;
use std::path::PathBuf;

/// Where an image slide's picture comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A file, read when the slide is appended
    Path(PathBuf),
    /// Encoded image bytes
    Bytes(Vec<u8>),
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&std::path::Path> for ImageSource {
    fn from(path: &std::path::Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(data: Vec<u8>) -> Self {
        ImageSource::Bytes(data)
    }
}

impl ImageSource {
    /// Load the image bytes and detect their format.
    ///
    /// # Errors
    /// `InvalidInput` for an unreadable path, empty data, or data that is not
    /// PNG, JPEG, GIF, BMP or TIFF.
    pub(crate) fn load(self) -> Result<(Vec<u8>, ImageFormat)> {
        let data = match self {
            ImageSource::Path(path) => std::fs::read(&path).map_err(|e| {
                Error::invalid(format!("Cannot read image {}: {}", path.display(), e))
            })?,
            ImageSource::Bytes(data) => data,
        };
        if data.is_empty() {
            return Err(Error::invalid("Image data is empty"));
        }
        let format = ImageFormat::detect_from_bytes(&data)
            .ok_or_else(|| Error::invalid("Unrecognised image format"))?;
        Ok((data, format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00";

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(GIF).unwrap();
        let (data, format) = ImageSource::from(file.path()).load().unwrap();
        assert_eq!(format, ImageFormat::Gif);
        assert_eq!(data, GIF);
    }

    #[test]
    fn test_load_failures_are_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ImageSource::Path(dir.path().join("missing.png"));
        assert!(missing.load().unwrap_err().is_invalid_input());
        assert!(ImageSource::Bytes(Vec::new()).load().unwrap_err().is_invalid_input());
        assert!(
            ImageSource::Bytes(b"plain text".to_vec())
                .load()
                .unwrap_err()
                .is_invalid_input()
        );
    }
}
