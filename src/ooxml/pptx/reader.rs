//! Read-back of produced presentations.
//!
//! Walks `presentation.xml`'s slide list in order and classifies each slide
//! from its shape tree. Only the constructs the writer emits are recognised;
//! anything else on a slide is ignored.

use crate::common::xml::push_entity;
use crate::ooxml::charts::Chart;
use crate::ooxml::charts::reader::parse_chart;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::relationship_type as rt;
use crate::ooxml::opc::{PackURI, PackageReader, Relationships};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a slide as recognised from its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    Title,
    Chart,
    Table,
    TextBox,
    BulletList,
    Image,
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlideKind::Title => "title",
            SlideKind::Chart => "chart",
            SlideKind::Table => "table",
            SlideKind::TextBox => "text",
            SlideKind::BulletList => "bullets",
            SlideKind::Image => "image",
        };
        f.write_str(name)
    }
}

/// What the inspector found on one slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSummary {
    /// 1-based position in the presentation
    pub index: usize,
    /// Slide partname, e.g. `/ppt/slides/slide2.xml`
    pub partname: String,
    pub kind: SlideKind,
    /// Title placeholder text; empty when the slide has none
    pub title: String,
    pub subtitle: Option<String>,
    /// Paragraphs of non-placeholder text shapes
    pub paragraphs: Vec<String>,
    /// Table cells, header row first
    pub table: Vec<Vec<String>>,
    pub chart: Option<Chart>,
}

impl SlideSummary {
    /// Number of bullets on a bullet-list slide, zero otherwise.
    pub fn bullet_count(&self) -> usize {
        match self.kind {
            SlideKind::BulletList => self.paragraphs.len(),
            _ => 0,
        }
    }
}

/// Inspect a serialized presentation.
///
/// # Errors
/// Fails when the bytes are not a ZIP/OPC package, when the package has no
/// presentation part, or when a slide or chart part cannot be parsed.
pub fn inspect(data: &[u8]) -> Result<Vec<SlideSummary>> {
    let package = PackageReader::from_bytes(data)?;

    let package_rels = package.package_rels()?;
    let main_rel = package_rels
        .of_type(rt::OFFICE_DOCUMENT)
        .next()
        .ok_or_else(|| OoxmlError::InvalidFormat("Package has no main document".to_string()))?;
    let pres_uri = PackageReader::target_partname(&package_rels, main_rel.r_id())?;
    let pres_rels = package.rels_for(&pres_uri)?;

    let slide_rel_ids = slide_rel_ids(package.blob(&pres_uri)?)?;
    log::debug!("{} lists {} slides", pres_uri, slide_rel_ids.len());

    let mut summaries = Vec::with_capacity(slide_rel_ids.len());
    for (index, r_id) in slide_rel_ids.iter().enumerate() {
        let slide_uri = PackageReader::target_partname(&pres_rels, r_id)?;
        let scan = scan_slide(package.blob(&slide_uri)?)?;

        let chart = match scan.chart_rel_id {
            Some(ref chart_rid) => {
                let slide_rels = package.rels_for(&slide_uri)?;
                Some(load_chart(&package, &slide_rels, chart_rid)?)
            },
            None => None,
        };

        summaries.push(scan.into_summary(index + 1, slide_uri.to_string(), chart));
    }

    Ok(summaries)
}

fn load_chart(package: &PackageReader, rels: &Relationships, r_id: &str) -> Result<Chart> {
    let chart_uri: PackURI = PackageReader::target_partname(rels, r_id)?;
    parse_chart(package.blob(&chart_uri)?)
}

/// Value of the attribute whose qualified name is exactly `key`.
fn attr(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| OoxmlError::Xml(e.to_string()))?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|e| OoxmlError::Xml(e.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// The `r:id` of every `p:sldId`, in presentation order.
fn slide_rel_ids(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut ids = Vec::new();
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.local_name().as_ref() == b"sldId" =>
            {
                let r_id = attr(e, b"r:id")?.ok_or_else(|| {
                    OoxmlError::InvalidFormat("Slide id without relationship".to_string())
                })?;
                ids.push(r_id);
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(format!("Presentation parse error: {}", e))),
            _ => {},
        }
        buf.clear();
    }
    Ok(ids)
}

/// Text collected from one `p:sp`.
#[derive(Default)]
struct TextShape {
    placeholder: Option<String>,
    paragraphs: Vec<String>,
    bulleted: bool,
}

#[derive(Default)]
struct SlideScan {
    title_slide: bool,
    title: Option<String>,
    subtitle: Option<String>,
    paragraphs: Vec<String>,
    bulleted: bool,
    table: Vec<Vec<String>>,
    has_table: bool,
    has_picture: bool,
    chart_rel_id: Option<String>,
}

impl SlideScan {
    fn finish_shape(&mut self, shape: TextShape) {
        let TextShape {
            placeholder,
            paragraphs,
            bulleted,
        } = shape;
        match placeholder.as_deref() {
            Some("ctrTitle") => {
                self.title_slide = true;
                self.title = Some(paragraphs.join("\n"));
            },
            Some("title") => self.title = Some(paragraphs.join("\n")),
            Some("subTitle") => self.subtitle = Some(paragraphs.join("\n")),
            _ => {
                self.bulleted |= bulleted;
                self.paragraphs.extend(paragraphs);
            },
        }
    }

    fn kind(&self) -> SlideKind {
        if self.title_slide {
            SlideKind::Title
        } else if self.chart_rel_id.is_some() {
            SlideKind::Chart
        } else if self.has_table {
            SlideKind::Table
        } else if self.has_picture {
            SlideKind::Image
        } else if self.bulleted {
            SlideKind::BulletList
        } else {
            SlideKind::TextBox
        }
    }

    fn into_summary(self, index: usize, partname: String, chart: Option<Chart>) -> SlideSummary {
        SlideSummary {
            index,
            partname,
            kind: self.kind(),
            title: self.title.unwrap_or_default(),
            subtitle: self.subtitle,
            paragraphs: self.paragraphs,
            table: self.table,
            chart,
        }
    }
}

fn scan_slide(xml: &[u8]) -> Result<SlideScan> {
    // Text is kept verbatim, so no trimming here.
    let mut reader = Reader::from_reader(xml);

    let mut scan = SlideScan::default();
    let mut shape: Option<TextShape> = None;
    let mut cell: Option<Vec<String>> = None;
    let mut paragraph = String::new();
    let mut paragraph_bulleted = false;
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| OoxmlError::Xml(format!("Slide parse error: {}", e)))?;
        match event {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"sp" => shape = Some(TextShape::default()),
                b"ph" => {
                    if let Some(ref mut shape) = shape {
                        shape.placeholder =
                            Some(attr(e, b"type")?.unwrap_or_else(|| "body".to_string()));
                    }
                },
                b"p" => {
                    paragraph.clear();
                    paragraph_bulleted = false;
                },
                b"t" => in_text = true,
                b"tbl" => scan.has_table = true,
                b"tr" => scan.table.push(Vec::new()),
                b"tc" => cell = Some(Vec::new()),
                b"pic" => scan.has_picture = true,
                _ => {},
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"ph" => {
                    if let Some(ref mut shape) = shape {
                        shape.placeholder =
                            Some(attr(e, b"type")?.unwrap_or_else(|| "body".to_string()));
                    }
                },
                b"buChar" => paragraph_bulleted = true,
                b"chart" => {
                    if scan.chart_rel_id.is_none() {
                        scan.chart_rel_id = attr(e, b"r:id")?;
                    }
                },
                b"p" => {
                    if let Some(ref mut cell) = cell {
                        cell.push(String::new());
                    } else if let Some(ref mut shape) = shape {
                        shape.paragraphs.push(String::new());
                    }
                },
                _ => {},
            },
            Event::Text(ref t) if in_text => {
                let raw =
                    std::str::from_utf8(t.as_ref()).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                paragraph.push_str(raw);
            },
            Event::GeneralRef(ref r) if in_text => {
                let name =
                    std::str::from_utf8(r.as_ref()).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                push_entity(&mut paragraph, name);
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let text = std::mem::take(&mut paragraph);
                    if let Some(ref mut cell) = cell {
                        cell.push(text);
                    } else if let Some(ref mut shape) = shape {
                        shape.bulleted |= paragraph_bulleted;
                        shape.paragraphs.push(text);
                    }
                },
                b"tc" => {
                    if let (Some(lines), Some(row)) = (cell.take(), scan.table.last_mut()) {
                        row.push(lines.join("\n"));
                    }
                },
                b"sp" => {
                    if let Some(done) = shape.take() {
                        scan.finish_shape(done);
                    }
                },
                _ => {},
            },
            Event::Eof => break,
            _ => {},
        }
        buf.clear();
    }

    Ok(scan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::{ChartType, Series};
    use crate::ooxml::pptx::writer::{MutablePresentation, SlideLayout};
    use chrono::{TimeZone, Utc};

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

    fn presentation() -> MutablePresentation {
        MutablePresentation::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn test_inspect_classifies_each_kind() {
        let mut pres = presentation();
        let slide = pres.add_slide(SlideLayout::TitleSlide);
        slide.set_title("Deck <1>");
        slide.set_subtitle("by me");

        let slide = pres.add_slide(SlideLayout::TitleOnly);
        slide.set_title("Numbers");
        let series = Series::new(0)
            .with_categories(vec!["A".into(), "B".into()])
            .with_values(vec![1.0, 2.0]);
        slide.add_chart(Chart::pie(series), 0, 0, 100, 100);

        let slide = pres.add_slide(SlideLayout::TitleOnly);
        slide.set_title("Grid");
        slide
            .add_table(
                vec!["Plan".into(), "Price".into()],
                vec![vec!["Pro & Co".into(), "$10".into()]],
                0,
                0,
                100,
                100,
            )
            .unwrap();

        let slide = pres.add_slide(SlideLayout::TitleOnly);
        slide.set_title("Picture");
        slide
            .add_picture_from_bytes(PNG.to_vec(), 0, 0, 100, 100, None)
            .unwrap();

        let slide = pres.add_slide(SlideLayout::TitleOnly);
        slide.set_title("Points");
        slide.add_bullet_list(&["A".to_string(), "B".to_string()], 0, 0, 100, 100);

        let slide = pres.add_slide(SlideLayout::TitleOnly);
        slide.set_title("About");
        slide.add_text_box("line one\n\n  indented", 0, 0, 100, 100);

        let summaries = inspect(&pres.to_bytes().unwrap()).unwrap();
        let kinds: Vec<SlideKind> = summaries.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SlideKind::Title,
                SlideKind::Chart,
                SlideKind::Table,
                SlideKind::Image,
                SlideKind::BulletList,
                SlideKind::TextBox,
            ]
        );

        assert_eq!(summaries[0].title, "Deck <1>");
        assert_eq!(summaries[0].subtitle.as_deref(), Some("by me"));
        let chart = summaries[1].chart.as_ref().unwrap();
        assert_eq!(chart.chart_type, ChartType::Pie);
        assert_eq!(chart.series[0].values, vec![1.0, 2.0]);
        assert_eq!(summaries[2].table[1], vec!["Pro & Co", "$10"]);
        assert_eq!(summaries[4].bullet_count(), 2);
        assert_eq!(summaries[5].paragraphs, vec!["line one", "", "  indented"]);
        assert_eq!(summaries[5].bullet_count(), 0);
        assert_eq!(summaries[3].index, 4);
        assert_eq!(summaries[3].partname, "/ppt/slides/slide4.xml");
    }

    #[test]
    fn test_inspect_rejects_non_package() {
        assert!(inspect(b"not a zip").is_err());
    }
}
