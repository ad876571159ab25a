//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from internal
//! error types to the unified Error type.

use super::types::Error;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::error::OpcError;

impl From<OpcError> for Error {
    fn from(err: OpcError) -> Self {
        match err {
            OpcError::IoError(e) => Error::Io(e),
            OpcError::ZipError(e) => Error::Zip(e.to_string()),
            OpcError::XmlError(s) => Error::Xml(s),
            other => Error::Xml(other.to_string()),
        }
    }
}

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        match err {
            OoxmlError::Opc(e) => Error::from(e),
            OoxmlError::Io(e) => Error::Io(e),
            OoxmlError::Xml(s) => Error::Xml(s),
            OoxmlError::InvalidFormat(s) => Error::InvalidInput(s),
            other => Error::Xml(other.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_format_maps_to_invalid_input() {
        let err: Error = OoxmlError::InvalidFormat("Unknown image format".to_string()).into();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_opc_io_error_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only sink");
        let err: Error = OpcError::IoError(io).into();
        assert!(matches!(err, Error::Io(_)));
    }
}
