//! Slide variants held by a [`Deck`](super::Deck).

use crate::ooxml::charts::ChartType;
use crate::ooxml::pptx::ImageFormat;

pub use crate::ooxml::pptx::reader::SlideKind;

/// One slide of a deck.
///
/// Every variant carries the slide title. Content is validated when the slide
/// is appended, so a `Slide` always renders.
#[derive(Debug, Clone, PartialEq)]
pub enum Slide {
    Title {
        title: String,
        subtitle: String,
    },
    Chart {
        title: String,
        chart_type: ChartType,
        series_name: String,
        categories: Vec<String>,
        values: Vec<f64>,
    },
    Table {
        title: String,
        /// Column names, in the key order of the first row
        headers: Vec<String>,
        /// Cells of each row, in header order
        rows: Vec<Vec<String>>,
    },
    TextBox {
        title: String,
        body: String,
    },
    BulletList {
        title: String,
        bullets: Vec<String>,
    },
    Image {
        title: String,
        data: Vec<u8>,
        format: ImageFormat,
        /// Display width in EMUs
        width: i64,
        /// Display height in EMUs
        height: i64,
    },
}

impl Slide {
    pub fn kind(&self) -> SlideKind {
        match self {
            Slide::Title { .. } => SlideKind::Title,
            Slide::Chart { .. } => SlideKind::Chart,
            Slide::Table { .. } => SlideKind::Table,
            Slide::TextBox { .. } => SlideKind::TextBox,
            Slide::BulletList { .. } => SlideKind::BulletList,
            Slide::Image { .. } => SlideKind::Image,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Slide::Title { title, .. }
            | Slide::Chart { title, .. }
            | Slide::Table { title, .. }
            | Slide::TextBox { title, .. }
            | Slide::BulletList { title, .. }
            | Slide::Image { title, .. } => title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_title() {
        let slide = Slide::BulletList {
            title: "Key Points".to_string(),
            bullets: vec!["A".to_string()],
        };
        assert_eq!(slide.kind(), SlideKind::BulletList);
        assert_eq!(slide.title(), "Key Points");
    }
}
