/// Open Packaging Conventions (OPC) implementation.
///
/// The container layer shared by every Office Open XML document:
///
/// - Package structure (parts, relationships)
/// - Content type management
/// - ZIP-based physical packaging, with byte-stable output
/// - A read-only view of serialized packages

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgreader;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use error::OpcError;
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part};
pub use pkgreader::PackageReader;
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
