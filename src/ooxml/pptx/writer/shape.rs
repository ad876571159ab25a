/// Shape types and XML generation for PPTX slides.
use crate::common::xml::escape_xml;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

/// Built-in "Medium Style 2 - Accent 1" table style.
pub const TABLE_STYLE_ID: &str = "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}";

const TABLE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";
const CHART_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";

/// Position and extent of a shape, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Frame {
    #[inline]
    pub const fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// A shape on a slide (text box, picture, table or chart frame).
#[derive(Debug, Clone)]
pub struct MutableShape {
    /// Shape ID, unique within the slide
    pub(crate) shape_id: u32,
    /// Shape type
    pub(crate) shape_type: ShapeType,
}

#[derive(Debug, Clone)]
pub(crate) enum ShapeType {
    /// Free text; one paragraph per line
    TextBox { paragraphs: Vec<String>, frame: Frame },
    /// Bulleted paragraphs
    BulletList { items: Vec<String>, frame: Frame },
    /// Picture; `media_idx` indexes the slide's image list
    Picture {
        media_idx: usize,
        frame: Frame,
        description: String,
    },
    /// Table with a header row
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
        frame: Frame,
    },
    /// Chart frame; `chart_idx` indexes the slide's chart list
    Chart { chart_idx: usize, frame: Frame },
}

/// Relationship IDs a shape needs when it is written.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct ShapeRelIds<'a> {
    pub image_rel_id: Option<&'a str>,
    pub chart_rel_id: Option<&'a str>,
}

impl MutableShape {
    pub(crate) fn new(shape_id: u32, shape_type: ShapeType) -> Self {
        Self {
            shape_id,
            shape_type,
        }
    }

    /// Shape ID within its slide.
    #[inline]
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    /// Generate XML for this shape.
    ///
    /// Pictures and charts fail without their relationship ID.
    pub(crate) fn to_xml(&self, xml: &mut String, rel_ids: ShapeRelIds<'_>) -> Result<()> {
        match &self.shape_type {
            ShapeType::TextBox { paragraphs, frame } => {
                self.write_text_shape(xml, "Text Box", *frame, paragraphs, false)
            },
            ShapeType::BulletList { items, frame } => {
                self.write_text_shape(xml, "Bullet List", *frame, items, true)
            },
            ShapeType::Picture {
                frame, description, ..
            } => {
                let rid = rel_ids.image_rel_id.ok_or_else(|| {
                    OoxmlError::Xml(format!("Picture {} has no image relationship", self.shape_id))
                })?;
                self.write_picture(xml, *frame, description, rid)
            },
            ShapeType::Table {
                headers,
                rows,
                frame,
            } => self.write_table(xml, *frame, headers, rows),
            ShapeType::Chart { frame, .. } => {
                let rid = rel_ids.chart_rel_id.ok_or_else(|| {
                    OoxmlError::Xml(format!("Chart {} has no chart relationship", self.shape_id))
                })?;
                self.write_chart_frame(xml, *frame, rid)
            },
        }
    }

    fn write_xfrm(xml: &mut String, tag: &str, frame: Frame) -> Result<()> {
        write!(
            xml,
            r#"<{tag}><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></{tag}>"#,
            frame.x, frame.y, frame.width, frame.height
        )?;
        Ok(())
    }

    fn write_text_shape(
        &self,
        xml: &mut String,
        name: &str,
        frame: Frame,
        paragraphs: &[String],
        bulleted: bool,
    ) -> Result<()> {
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="{} {}"/>"#,
            self.shape_id, name, self.shape_id
        )?;
        xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvSpPr>");

        xml.push_str("<p:spPr>");
        Self::write_xfrm(xml, "a:xfrm", frame)?;
        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
        xml.push_str("<a:noFill/>");
        xml.push_str("</p:spPr>");

        xml.push_str("<p:txBody>");
        xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr>"#);
        xml.push_str("<a:lstStyle/>");
        if paragraphs.is_empty() {
            xml.push_str(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#);
        }
        for paragraph in paragraphs {
            xml.push_str("<a:p>");
            if bulleted {
                xml.push_str(r#"<a:pPr marL="342900" indent="-342900">"#);
                xml.push_str(r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#);
                xml.push_str("</a:pPr>");
            }
            Self::write_run(xml, paragraph)?;
            xml.push_str("</a:p>");
        }
        xml.push_str("</p:txBody>");

        xml.push_str("</p:sp>");
        Ok(())
    }

    /// One run, or an empty paragraph marker when there is no text.
    pub(crate) fn write_run(xml: &mut String, text: &str) -> Result<()> {
        if text.is_empty() {
            xml.push_str(r#"<a:endParaRPr lang="en-US" dirty="0"/>"#);
        } else {
            xml.push_str(r#"<a:r><a:rPr lang="en-US" dirty="0"/>"#);
            write!(xml, "<a:t>{}</a:t>", escape_xml(text))?;
            xml.push_str("</a:r>");
        }
        Ok(())
    }

    fn write_picture(
        &self,
        xml: &mut String,
        frame: Frame,
        description: &str,
        rel_id: &str,
    ) -> Result<()> {
        xml.push_str("<p:pic>");
        xml.push_str("<p:nvPicPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
            self.shape_id,
            self.shape_id,
            escape_xml(description)
        )?;
        xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvPicPr>");

        xml.push_str("<p:blipFill>");
        write!(xml, r#"<a:blip r:embed="{}"/>"#, rel_id)?;
        xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
        xml.push_str("</p:blipFill>");

        xml.push_str("<p:spPr>");
        Self::write_xfrm(xml, "a:xfrm", frame)?;
        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
        xml.push_str("</p:spPr>");
        xml.push_str("</p:pic>");
        Ok(())
    }

    fn write_graphic_frame_header(&self, xml: &mut String, name: &str, frame: Frame) -> Result<()> {
        xml.push_str("<p:graphicFrame>");
        xml.push_str("<p:nvGraphicFramePr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="{} {}"/>"#,
            self.shape_id, name, self.shape_id
        )?;
        xml.push_str(r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr>"#);
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGraphicFramePr>");
        Self::write_xfrm(xml, "p:xfrm", frame)
    }

    fn write_table(
        &self,
        xml: &mut String,
        frame: Frame,
        headers: &[String],
        rows: &[Vec<String>],
    ) -> Result<()> {
        let col_count = headers.len().max(1) as i64;
        let row_count = (rows.len() + 1) as i64;
        let col_width = frame.width / col_count;
        let row_height = frame.height / row_count;

        self.write_graphic_frame_header(xml, "Table", frame)?;
        xml.push_str("<a:graphic>");
        write!(xml, r#"<a:graphicData uri="{}">"#, TABLE_URI)?;
        xml.push_str("<a:tbl>");
        write!(
            xml,
            r#"<a:tblPr firstRow="1" bandRow="1"><a:tableStyleId>{}</a:tableStyleId></a:tblPr>"#,
            TABLE_STYLE_ID
        )?;

        xml.push_str("<a:tblGrid>");
        for col in 0..col_count {
            // last column absorbs the rounding remainder
            let width = if col == col_count - 1 {
                frame.width - col_width * (col_count - 1)
            } else {
                col_width
            };
            write!(xml, r#"<a:gridCol w="{}"/>"#, width)?;
        }
        xml.push_str("</a:tblGrid>");

        Self::write_table_row(xml, row_height, headers)?;
        for row in rows {
            Self::write_table_row(xml, row_height, row)?;
        }

        xml.push_str("</a:tbl>");
        xml.push_str("</a:graphicData>");
        xml.push_str("</a:graphic>");
        xml.push_str("</p:graphicFrame>");
        Ok(())
    }

    fn write_table_row(xml: &mut String, height: i64, cells: &[String]) -> Result<()> {
        write!(xml, r#"<a:tr h="{}">"#, height)?;
        for cell in cells {
            xml.push_str("<a:tc><a:txBody><a:bodyPr/><a:lstStyle/>");
            for line in cell.split('\n') {
                xml.push_str("<a:p>");
                Self::write_run(xml, line)?;
                xml.push_str("</a:p>");
            }
            xml.push_str("</a:txBody><a:tcPr/></a:tc>");
        }
        xml.push_str("</a:tr>");
        Ok(())
    }

    fn write_chart_frame(&self, xml: &mut String, frame: Frame, rel_id: &str) -> Result<()> {
        self.write_graphic_frame_header(xml, "Chart", frame)?;
        xml.push_str("<a:graphic>");
        write!(xml, r#"<a:graphicData uri="{}">"#, CHART_URI)?;
        write!(
            xml,
            r#"<c:chart xmlns:c="{}" r:id="{}"/>"#,
            CHART_URI, rel_id
        )?;
        xml.push_str("</a:graphicData>");
        xml.push_str("</a:graphic>");
        xml.push_str("</p:graphicFrame>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> Frame {
        Frame::new(914400, 1371600, 5486400, 3657600)
    }

    #[test]
    fn test_text_box_paragraphs_are_escaped() {
        let shape = MutableShape::new(
            3,
            ShapeType::TextBox {
                paragraphs: vec!["Tom & Jerry".to_string(), String::new()],
                frame: frame(),
            },
        );
        let mut xml = String::new();
        shape.to_xml(&mut xml, ShapeRelIds::default()).unwrap();
        assert!(xml.contains("<a:t>Tom &amp; Jerry</a:t>"));
        assert!(xml.contains(r#"<a:p><a:endParaRPr lang="en-US" dirty="0"/></a:p>"#));
        assert!(!xml.contains("buChar"));
    }

    #[test]
    fn test_bullets_carry_bullet_char() {
        let shape = MutableShape::new(
            3,
            ShapeType::BulletList {
                items: vec!["A".to_string(), "B".to_string()],
                frame: frame(),
            },
        );
        let mut xml = String::new();
        shape.to_xml(&mut xml, ShapeRelIds::default()).unwrap();
        assert_eq!(xml.matches("<a:buChar").count(), 2);
    }

    #[test]
    fn test_table_grid_spans_frame_width() {
        let shape = MutableShape::new(
            3,
            ShapeType::Table {
                headers: vec!["Plan".into(), "Price".into(), "Seats".into()],
                rows: vec![vec!["Pro".into(), "$10".into(), "5".into()]],
                frame: Frame::new(0, 0, 1000, 200),
            },
        );
        let mut xml = String::new();
        shape.to_xml(&mut xml, ShapeRelIds::default()).unwrap();
        assert!(xml.contains(r#"<a:gridCol w="333"/><a:gridCol w="333"/><a:gridCol w="334"/>"#));
        assert_eq!(xml.matches("<a:tr ").count(), 2);
        assert!(xml.contains(TABLE_STYLE_ID));
    }

    #[test]
    fn test_picture_requires_relationship() {
        let shape = MutableShape::new(
            3,
            ShapeType::Picture {
                media_idx: 0,
                frame: frame(),
                description: "logo".to_string(),
            },
        );
        let mut xml = String::new();
        assert!(shape.to_xml(&mut xml, ShapeRelIds::default()).is_err());

        let rel_ids = ShapeRelIds {
            image_rel_id: Some("rId2"),
            ..Default::default()
        };
        shape.to_xml(&mut xml, rel_ids).unwrap();
        assert!(xml.contains(r#"<a:blip r:embed="rId2"/>"#));
    }

    #[test]
    fn test_chart_frame_references_chart_part() {
        let shape = MutableShape::new(4, ShapeType::Chart { chart_idx: 0, frame: frame() });
        let mut xml = String::new();
        let rel_ids = ShapeRelIds {
            chart_rel_id: Some("rId3"),
            ..Default::default()
        };
        shape.to_xml(&mut xml, rel_ids).unwrap();
        assert!(xml.contains(r#"r:id="rId3""#));
        assert!(xml.contains("<p:graphicFrame>"));
    }
}
