/// Document property parts (`docProps/core.xml`, `docProps/app.xml`).
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as FmtWrite;

/// Name recorded as the producing application.
pub const APPLICATION: &str = "deckwright";

/// Core and extended properties of a generated presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentProperties {
    /// Document title
    pub title: Option<String>,
    /// Document author/creator
    pub creator: String,
    /// Creation (and last modification) time
    pub created: DateTime<Utc>,
}

impl DocumentProperties {
    pub fn new(created: DateTime<Utc>) -> Self {
        Self {
            title: None,
            creator: APPLICATION.to_string(),
            created,
        }
    }

    /// Generate `docProps/core.xml`.
    pub fn core_xml(&self) -> Result<String> {
        let timestamp = self.created.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(concat!(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
        ));
        if let Some(ref title) = self.title {
            write!(xml, "<dc:title>{}</dc:title>", escape_xml(title))?;
        }
        write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(&self.creator))?;
        write!(
            xml,
            "<cp:lastModifiedBy>{}</cp:lastModifiedBy>",
            escape_xml(&self.creator)
        )?;
        xml.push_str("<cp:revision>1</cp:revision>");
        write!(
            xml,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            timestamp
        )?;
        write!(
            xml,
            r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
            timestamp
        )?;
        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }

    /// Generate `docProps/app.xml`.
    pub fn app_xml(&self, slide_count: usize) -> Result<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(concat!(
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
        ));
        write!(xml, "<Application>{}</Application>", APPLICATION)?;
        xml.push_str("<PresentationFormat>On-screen Show (4:3)</PresentationFormat>");
        write!(xml, "<Slides>{}</Slides>", slide_count)?;
        write!(xml, "<AppVersion>{}</AppVersion>", app_version())?;
        xml.push_str("</Properties>");
        Ok(xml)
    }
}

/// `AppVersion` must look like "XX.YYYY".
fn app_version() -> String {
    let major: u32 = env!("CARGO_PKG_VERSION_MAJOR").parse().unwrap_or(0);
    let minor: u32 = env!("CARGO_PKG_VERSION_MINOR").parse().unwrap_or(0);
    format!("{:02}.{:04}", major, minor)
}
