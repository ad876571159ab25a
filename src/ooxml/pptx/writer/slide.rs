/// Slide model and XML generation for PPTX presentations.
use crate::common::xml::escape_xml;
use crate::ooxml::charts::Chart;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::format::ImageFormat;
use crate::ooxml::pptx::template::{TITLE_ONLY_LAYOUT, TITLE_SLIDE_LAYOUT};
use crate::ooxml::pptx::writer::relmap::RelationshipMapper;
use std::fmt::Write as FmtWrite;

use super::shape::{Frame, MutableShape, ShapeRelIds, ShapeType};

/// Which slide layout a slide is based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
    /// Centered title and subtitle placeholders
    TitleSlide,
    /// Title placeholder only
    TitleOnly,
}

impl SlideLayout {
    /// 1-based number of the layout part (`slideLayoutN.xml`).
    pub const fn layout_number(&self) -> usize {
        match self {
            Self::TitleSlide => TITLE_SLIDE_LAYOUT,
            Self::TitleOnly => TITLE_ONLY_LAYOUT,
        }
    }
}

/// A slide in a presentation being written.
#[derive(Debug, Clone)]
pub struct MutableSlide {
    /// Slide ID (unique identifier, 256 and up)
    pub(crate) slide_id: u32,
    /// Layout the slide is based on
    pub(crate) layout: SlideLayout,
    /// Slide title (stored in the title placeholder)
    pub(crate) title: Option<String>,
    /// Subtitle (title-slide layout only)
    pub(crate) subtitle: Option<String>,
    /// Shapes on the slide
    pub(crate) shapes: Vec<MutableShape>,
    /// Image data referenced by picture shapes
    pub(crate) images: Vec<(Vec<u8>, ImageFormat)>,
    /// Charts referenced by chart frames
    pub(crate) charts: Vec<Chart>,
}

impl MutableSlide {
    pub(crate) fn new(slide_id: u32, layout: SlideLayout) -> Self {
        Self {
            slide_id,
            layout,
            title: None,
            subtitle: None,
            shapes: Vec::new(),
            images: Vec::new(),
            charts: Vec::new(),
        }
    }

    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    pub fn layout(&self) -> SlideLayout {
        self.layout
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the subtitle. Only written on title-slide layouts.
    pub fn set_subtitle(&mut self, subtitle: &str) {
        self.subtitle = Some(subtitle.to_string());
    }

    /// IDs: 1=group, 2=title, 3=subtitle, 4+=content shapes.
    fn next_shape_id(&self) -> u32 {
        (self.shapes.len() + 4) as u32
    }

    /// Add a text box; each `\n`-separated line of `text` becomes a
    /// paragraph. A trailing `\n` yields a trailing empty paragraph and `\r`
    /// is kept as text.
    pub fn add_text_box(&mut self, text: &str, x: i64, y: i64, width: i64, height: i64) {
        let paragraphs = text.split('\n').map(str::to_string).collect();
        let shape = MutableShape::new(
            self.next_shape_id(),
            ShapeType::TextBox {
                paragraphs,
                frame: Frame::new(x, y, width, height),
            },
        );
        self.shapes.push(shape);
    }

    /// Add a text box with one bulleted paragraph per item.
    pub fn add_bullet_list(&mut self, items: &[String], x: i64, y: i64, width: i64, height: i64) {
        let shape = MutableShape::new(
            self.next_shape_id(),
            ShapeType::BulletList {
                items: items.to_vec(),
                frame: Frame::new(x, y, width, height),
            },
        );
        self.shapes.push(shape);
    }

    /// Add a picture to the slide from bytes.
    ///
    /// # Errors
    /// Returns `InvalidFormat` if the bytes aren't a recognised image.
    pub fn add_picture_from_bytes(
        &mut self,
        data: Vec<u8>,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: Option<String>,
    ) -> Result<()> {
        let format = ImageFormat::detect_from_bytes(&data)
            .ok_or_else(|| OoxmlError::InvalidFormat("Unknown image format".to_string()))?;

        let shape = MutableShape::new(
            self.next_shape_id(),
            ShapeType::Picture {
                media_idx: self.images.len(),
                frame: Frame::new(x, y, width, height),
                description: description.unwrap_or_else(|| "Picture".to_string()),
            },
        );
        self.images.push((data, format));
        self.shapes.push(shape);
        Ok(())
    }

    /// Add a table with a header row followed by `rows`.
    ///
    /// # Errors
    /// Returns `InvalidFormat` if a row's cell count differs from the header's.
    pub fn add_table(
        &mut self,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> Result<()> {
        if let Some(row) = rows.iter().find(|row| row.len() != headers.len()) {
            return Err(OoxmlError::InvalidFormat(format!(
                "Table row has {} cells, header has {}",
                row.len(),
                headers.len()
            )));
        }
        let shape = MutableShape::new(
            self.next_shape_id(),
            ShapeType::Table {
                headers,
                rows,
                frame: Frame::new(x, y, width, height),
            },
        );
        self.shapes.push(shape);
        Ok(())
    }

    /// Add a chart frame backed by its own chart part.
    pub fn add_chart(&mut self, chart: Chart, x: i64, y: i64, width: i64, height: i64) {
        let shape = MutableShape::new(
            self.next_shape_id(),
            ShapeType::Chart {
                chart_idx: self.charts.len(),
                frame: Frame::new(x, y, width, height),
            },
        );
        self.charts.push(chart);
        self.shapes.push(shape);
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Images in the order their picture shapes were added.
    pub(crate) fn collect_images(&self) -> impl Iterator<Item = (&[u8], ImageFormat)> {
        self.images
            .iter()
            .map(|(data, format)| (data.as_slice(), *format))
    }

    pub(crate) fn charts(&self) -> &[Chart] {
        &self.charts
    }

    /// Generate slide XML using the relationship IDs recorded for this slide.
    pub(crate) fn to_xml_with_rels(
        &self,
        slide_index: usize,
        rel_mapper: &RelationshipMapper,
    ) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        xml.push_str("<p:cSld>");
        xml.push_str("<p:spTree>");

        // Group shape properties (required)
        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/>"#);
        xml.push_str(r#"<a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/>"#);
        xml.push_str(r#"<a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        if let Some(ref title) = self.title {
            let ph_type = match self.layout {
                SlideLayout::TitleSlide => "ctrTitle",
                SlideLayout::TitleOnly => "title",
            };
            self.write_placeholder(&mut xml, 2, "Title 1", ph_type, None, title)?;
        }

        if self.layout == SlideLayout::TitleSlide
            && let Some(ref subtitle) = self.subtitle
        {
            self.write_placeholder(&mut xml, 3, "Subtitle 2", "subTitle", Some(1), subtitle)?;
        }

        for shape in &self.shapes {
            let rel_ids = match &shape.shape_type {
                ShapeType::Picture { media_idx, .. } => ShapeRelIds {
                    image_rel_id: rel_mapper.get_image_id(slide_index, *media_idx),
                    ..Default::default()
                },
                ShapeType::Chart { chart_idx, .. } => ShapeRelIds {
                    chart_rel_id: rel_mapper.get_chart_id(slide_index, *chart_idx),
                    ..Default::default()
                },
                _ => ShapeRelIds::default(),
            };

            shape.to_xml(&mut xml, rel_ids)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str(r#"<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>"#);
        xml.push_str("</p:sld>");

        Ok(xml)
    }

    /// Write a layout placeholder shape holding `text`, one paragraph per line.
    fn write_placeholder(
        &self,
        xml: &mut String,
        shape_id: u32,
        name: &str,
        ph_type: &str,
        idx: Option<u32>,
        text: &str,
    ) -> Result<()> {
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, shape_id, escape_xml(name))?;
        xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
        match idx {
            Some(idx) => write!(
                xml,
                r#"<p:nvPr><p:ph type="{}" idx="{}"/></p:nvPr>"#,
                ph_type, idx
            )?,
            None => write!(xml, r#"<p:nvPr><p:ph type="{}"/></p:nvPr>"#, ph_type)?,
        }
        xml.push_str("</p:nvSpPr>");

        xml.push_str("<p:spPr/>");

        xml.push_str("<p:txBody>");
        xml.push_str("<a:bodyPr/>");
        xml.push_str("<a:lstStyle/>");
        for line in text.split('\n') {
            xml.push_str("<a:p>");
            MutableShape::write_run(xml, line)?;
            xml.push_str("</a:p>");
        }
        xml.push_str("</p:txBody>");

        xml.push_str("</p:sp>");

        Ok(())
    }
}
