//! Low-level, read-only view of a serialized OPC package.
//!
//! Parses `[Content_Types].xml` and `.rels` parts on demand; part contents
//! are served from the physical reader.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::{Relationship, Relationships};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;

/// Content type map for looking up content types by part name or extension.
struct ContentTypeMap {
    /// Maps file extensions to default content types
    defaults: HashMap<String, String>,

    /// Maps specific partnames to override content types
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Parse content types from [Content_Types].xml.
    fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self {
            defaults: HashMap::new(),
            overrides: HashMap::new(),
        };
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                    b"Default" => {
                        if let (Some(ext), Some(ct)) =
                            (attr_value(e, b"Extension")?, attr_value(e, b"ContentType")?)
                        {
                            map.defaults.insert(ext.to_lowercase(), ct);
                        }
                    },
                    b"Override" => {
                        if let (Some(pn), Some(ct)) =
                            (attr_value(e, b"PartName")?, attr_value(e, b"ContentType")?)
                        {
                            map.overrides.insert(pn, ct);
                        }
                    },
                    _ => {},
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(OpcError::XmlError(format!("Content types parse error: {}", e)));
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Override first, then the default for the partname's extension.
    fn get(&self, pack_uri: &PackURI) -> Option<&str> {
        self.overrides
            .get(pack_uri.as_str())
            .or_else(|| self.defaults.get(&pack_uri.ext().to_lowercase()))
            .map(String::as_str)
    }
}

/// Read one attribute by its (unprefixed) key.
fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| OpcError::XmlError(e.to_string()))?;
        if attr.key.local_name().as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| OpcError::XmlError(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parse the XML of a .rels part into a relationship collection.
fn parse_rels_xml(base_uri: &str, xml: &[u8]) -> Result<Relationships> {
    let mut rels = Relationships::new(base_uri.to_string());
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let r_id = attr_value(e, b"Id")?;
                let reltype = attr_value(e, b"Type")?;
                let target = attr_value(e, b"Target")?;
                if let (Some(r_id), Some(reltype), Some(target)) = (r_id, reltype, target) {
                    rels.load(Relationship::new(r_id, reltype, target));
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(OpcError::XmlError(format!("Relationships parse error: {}", e)));
            },
            _ => {},
        }
        buf.clear();
    }

    Ok(rels)
}

/// Read-only access to a serialized package: parts, content types and
/// relationships.
pub struct PackageReader {
    phys: PhysPkgReader,
    content_types: ContentTypeMap,
}

impl PackageReader {
    /// Open a package from its serialized bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let phys = PhysPkgReader::new(data)?;
        let content_types = ContentTypeMap::from_xml(phys.content_types_xml()?)?;
        Ok(Self {
            phys,
            content_types,
        })
    }

    /// Content type of a part, if the package declares one.
    pub fn content_type(&self, partname: &PackURI) -> Option<&str> {
        self.content_types.get(partname)
    }

    /// Raw content of a part.
    pub fn blob(&self, partname: &PackURI) -> Result<&[u8]> {
        self.phys.blob_for(partname)
    }

    /// Package-level relationships (`/_rels/.rels`).
    pub fn package_rels(&self) -> Result<Relationships> {
        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        self.rels_for(&package_uri)
    }

    /// Relationships whose source is `source`. A missing .rels part yields an
    /// empty collection.
    pub fn rels_for(&self, source: &PackURI) -> Result<Relationships> {
        match self.phys.rels_xml_for(source)? {
            Some(xml) => parse_rels_xml(source.base_uri(), xml),
            None => Ok(Relationships::new(source.base_uri().to_string())),
        }
    }

    /// Resolve a relationship of `rels` to the absolute partname of its target.
    pub fn target_partname(rels: &Relationships, r_id: &str) -> Result<PackURI> {
        let rel = rels
            .get(r_id)
            .ok_or_else(|| OpcError::RelationshipNotFound(format!("rId: {}", r_id)))?;
        PackURI::from_rel_ref(rels.base_uri(), rel.target_ref()).map_err(OpcError::InvalidPackUri)
    }

    pub fn contains(&self, partname: &PackURI) -> bool {
        self.phys.contains(partname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_map() {
        let xml = br#"<?xml version="1.0"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="png" ContentType="image/png"/>
  <Default Extension="XML" ContentType="application/xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="presentation"/>
</Types>"#;
        let map = ContentTypeMap::from_xml(xml).unwrap();
        let pres = PackURI::new("/ppt/presentation.xml").unwrap();
        let other = PackURI::new("/ppt/theme/theme1.xml").unwrap();
        let image = PackURI::new("/ppt/media/image1.png").unwrap();
        let unknown = PackURI::new("/ppt/media/image1.wdp").unwrap();
        assert_eq!(map.get(&pres), Some("presentation"));
        assert_eq!(map.get(&other), Some("application/xml"));
        assert_eq!(map.get(&image), Some("image/png"));
        assert_eq!(map.get(&unknown), None);
    }

    #[test]
    fn test_parse_rels_and_resolve_target() {
        let xml = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="layout" Target="../slideLayouts/slideLayout2.xml"/>
<Relationship Id="rId2" Type="chart" Target="../charts/chart1.xml"/>
</Relationships>"#;
        let rels = parse_rels_xml("/ppt/slides", xml).unwrap();
        assert_eq!(rels.len(), 2);
        let target = PackageReader::target_partname(&rels, "rId2").unwrap();
        assert_eq!(target.as_str(), "/ppt/charts/chart1.xml");
        assert!(matches!(
            PackageReader::target_partname(&rels, "rId9"),
            Err(OpcError::RelationshipNotFound(_))
        ));
    }
}
