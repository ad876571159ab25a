/// Presentation writer for PPTX.
use crate::common::unit::inches;
use crate::ooxml::error::Result;
use chrono::{DateTime, Utc};
use std::fmt::Write as FmtWrite;

use super::props::DocumentProperties;
use super::slide::{MutableSlide, SlideLayout};

/// A PowerPoint presentation being written.
///
/// Holds slides in order together with the slide size and document
/// properties.
#[derive(Debug)]
pub struct MutablePresentation {
    /// Slides in the presentation
    pub(crate) slides: Vec<MutableSlide>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
    /// Core/extended document properties
    pub(crate) properties: DocumentProperties,
}

impl MutablePresentation {
    /// Create a new empty presentation.
    ///
    /// Default size is 10" x 7.5" (standard 4:3 aspect ratio).
    pub fn new(created: DateTime<Utc>) -> Self {
        Self {
            slides: Vec::new(),
            slide_width: inches(10.0),
            slide_height: inches(7.5),
            properties: DocumentProperties::new(created),
        }
    }

    /// Add a new slide based on `layout`.
    pub fn add_slide(&mut self, layout: SlideLayout) -> &mut MutableSlide {
        let slide_id = (self.slides.len() + 256) as u32;
        let index = self.slides.len();
        self.slides.push(MutableSlide::new(slide_id, layout));
        &mut self.slides[index]
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[MutableSlide] {
        &self.slides
    }

    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Set the document title recorded in the core properties.
    pub fn set_title(&mut self, title: &str) {
        self.properties.title = Some(title.to_string());
    }

    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    /// Generate presentation.xml content.
    ///
    /// `master_rel_id` points at the slide master; `slide_rel_ids` holds one
    /// relationship ID per slide, in slide order.
    pub(crate) fn generate_presentation_xml_with_rels(
        &self,
        master_rel_id: &str,
        slide_rel_ids: &[String],
    ) -> Result<String> {
        let mut xml = String::with_capacity(1024 + self.slides.len() * 48);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(concat!(
            r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
            r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#
        ));

        xml.push_str("<p:sldMasterIdLst>");
        write!(
            xml,
            r#"<p:sldMasterId id="2147483648" r:id="{}"/>"#,
            master_rel_id
        )?;
        xml.push_str("</p:sldMasterIdLst>");

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(
                    xml,
                    r#"<p:sldId id="{}" r:id="{}"/>"#,
                    slide.slide_id(),
                    rel_id
                )?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}" type="screen4x3"/>"#,
            self.slide_width, self.slide_height
        )?;
        write!(
            xml,
            r#"<p:notesSz cx="{}" cy="{}"/>"#,
            self.slide_height, self.slide_width
        )?;
        xml.push_str("<p:defaultTextStyle>");
        xml.push_str(r#"<a:defPPr><a:defRPr lang="en-US"/></a:defPPr>"#);
        xml.push_str("</p:defaultTextStyle>");
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}
