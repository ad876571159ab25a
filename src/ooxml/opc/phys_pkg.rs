//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! Reading loads every member eagerly into memory; produced presentations are
//! small and the inspector touches most of their parts anyway.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PackURI};
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Physical package reader that provides access to parts in a ZIP-based OPC package.
pub struct PhysPkgReader {
    /// Decompressed member contents keyed by membername
    members: HashMap<String, Vec<u8>>,
}

impl PhysPkgReader {
    /// Read a package from bytes.
    ///
    /// # Errors
    /// Returns an error if the bytes aren't a valid ZIP archive.
    pub fn new(data: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut members = HashMap::with_capacity(archive.len());

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            let mut blob = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut blob)?;
            members.insert(file.name().to_string(), blob);
        }

        Ok(Self { members })
    }

    /// Get the binary content for a part by its PackURI.
    pub fn blob_for(&self, pack_uri: &PackURI) -> Result<&[u8]> {
        self.members
            .get(pack_uri.membername())
            .map(Vec::as_slice)
            .ok_or_else(|| OpcError::PartNotFound(pack_uri.to_string()))
    }

    /// Get the [Content_Types].xml content.
    pub fn content_types_xml(&self) -> Result<&[u8]> {
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        self.blob_for(&content_types_uri)
    }

    /// Get the relationships XML for a specific source URI.
    ///
    /// Returns None if the source has no relationships file.
    pub fn rels_xml_for(&self, source_uri: &PackURI) -> Result<Option<&[u8]>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        Ok(self.members.get(rels_uri.membername()).map(Vec::as_slice))
    }

    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.members.contains_key(pack_uri.membername())
    }
}

/// Physical package writer for creating OPC packages.
///
/// Every entry is deflated and stamped with the DOS epoch so the same
/// parts always produce the same archive bytes.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new() -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default());
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
            options,
        }
    }

    /// Write a part to the package with Deflate compression.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.archive.start_file(pack_uri.membername(), self.options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.archive.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut writer = PhysPkgWriter::new();
        let pack_uri = PackURI::new("/test.txt").unwrap();
        writer.write(&pack_uri, b"Hello, World!").unwrap();
        let zip_data = writer.finish().unwrap();

        let reader = PhysPkgReader::new(&zip_data).unwrap();
        assert_eq!(reader.blob_for(&pack_uri).unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_multiple_parts() {
        let mut writer = PhysPkgWriter::new();

        let content_types = PackURI::new("/[Content_Types].xml").unwrap();
        let rels = PackURI::new("/_rels/.rels").unwrap();
        let presentation = PackURI::new("/ppt/presentation.xml").unwrap();

        writer.write(&content_types, b"<Types/>").unwrap();
        writer.write(&rels, b"<Relationships/>").unwrap();
        writer.write(&presentation, b"<p:presentation/>").unwrap();

        let zip_data = writer.finish().unwrap();
        let reader = PhysPkgReader::new(&zip_data).unwrap();

        assert!(reader.contains(&rels));
        assert!(reader.contains(&presentation));
        assert_eq!(reader.content_types_xml().unwrap(), b"<Types/>");
        assert!(reader.rels_xml_for(&presentation).unwrap().is_none());
    }

    #[test]
    fn test_output_is_deterministic() {
        let build = || {
            let mut writer = PhysPkgWriter::new();
            let uri = PackURI::new("/ppt/slides/slide1.xml").unwrap();
            writer.write(&uri, b"<p:sld/>").unwrap();
            writer.finish().unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_missing_part() {
        let zip_data = PhysPkgWriter::new().finish().unwrap();
        let reader = PhysPkgReader::new(&zip_data).unwrap();
        let uri = PackURI::new("/missing.xml").unwrap();
        assert!(matches!(reader.blob_for(&uri), Err(OpcError::PartNotFound(_))));
    }

    #[test]
    fn test_rejects_non_zip() {
        assert!(PhysPkgReader::new(b"not a zip archive").is_err());
    }
}
