//! Office Open XML (OOXML) presentation support.
//!
//! The module is organized into layers:
//!
//! 1. **OPC Layer** (`opc`): package handling (ZIP, parts, relationships)
//! 2. **Charts** (`charts`): DrawingML chart parts
//! 3. **PresentationML** (`pptx`): slides, layouts, master and the reader
pub mod charts;
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
