//! The in-memory deck and its append operations.

use super::bullets::split_bullets;
use super::image::ImageSource;
use super::slide::{Slide, SlideKind};
use super::table::{TableRow, normalize_rows};
use crate::common::unit::inches;
use crate::common::xml::is_restricted_char;
use crate::common::{Error, Result};
use crate::ooxml::charts::{Chart, ChartType, Series};
use crate::ooxml::pptx::writer::{MutablePresentation, SlideLayout};
use chrono::{DateTime, SubsecRound, Utc};
use std::io::Write;

/// Series name used when a chart is appended without one.
pub const DEFAULT_SERIES_NAME: &str = "Series 1";

/// An ordered sequence of slides, serializable as a `.pptx` document.
///
/// A deck is built by appending slides; each append validates its content
/// and fails without touching the deck. Serializing borrows the deck, so it
/// can be written any number of times and appended to afterwards.
///
/// # Example
///
/// ```
/// use deckwright::Deck;
/// use deckwright::deck::SlideKind;
///
/// let mut deck = Deck::new();
/// deck.add_title("Widgets", "Quarterly review")?;
/// deck.add_bar_chart("Sales", ["Q1", "Q2"], &[10.0, 12.5])?;
/// assert_eq!(deck.add_bullets("Key Points", "Cheap. Fast. Small")?, 3);
///
/// let bytes = deck.serialize()?;
/// assert!(bytes.starts_with(b"PK"));
/// assert_eq!(deck.kinds(), vec![SlideKind::Title, SlideKind::Chart, SlideKind::BulletList]);
/// # Ok::<(), deckwright::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    slides: Vec<Slide>,
    created: DateTime<Utc>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Create an empty deck stamped with the current time.
    pub fn new() -> Self {
        Self::with_created(Utc::now())
    }

    /// Create an empty deck with a fixed creation time.
    ///
    /// The time is recorded (to the second) in the document properties.
    pub fn with_created(created: DateTime<Utc>) -> Self {
        Self {
            slides: Vec::new(),
            created: created.trunc_subsecs(0),
        }
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn kinds(&self) -> Vec<SlideKind> {
        self.slides.iter().map(Slide::kind).collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.slides.iter().map(Slide::title).collect()
    }

    fn push(&mut self, slide: Slide) {
        log::debug!(
            "slide {}: {} {:?}",
            self.slides.len() + 1,
            slide.kind(),
            slide.title()
        );
        self.slides.push(slide);
    }

    /// Append a title slide. Both strings may be empty.
    pub fn add_title(&mut self, title: &str, subtitle: &str) -> Result<()> {
        check_text("Title", title)?;
        check_text("Subtitle", subtitle)?;
        self.push(Slide::Title {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        });
        Ok(())
    }

    /// Append a clustered column chart with its legend at the bottom.
    ///
    /// # Errors
    /// `InvalidInput` when the category and value counts differ or a value is
    /// not finite.
    pub fn add_bar_chart<I, S>(&mut self, title: &str, categories: I, values: &[f64]) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_chart(title, ChartType::Bar, DEFAULT_SERIES_NAME, categories, values)
    }

    /// Append a pie chart with its legend at the right.
    ///
    /// Values are relative weights and need not sum to 100.
    ///
    /// # Errors
    /// Same as [`Deck::add_bar_chart`].
    pub fn add_pie_chart<I, S>(&mut self, title: &str, categories: I, values: &[f64]) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_chart(title, ChartType::Pie, DEFAULT_SERIES_NAME, categories, values)
    }

    /// Append a chart slide with a named series.
    pub fn add_chart<I, S>(
        &mut self,
        title: &str,
        chart_type: ChartType,
        series_name: &str,
        categories: I,
        values: &[f64],
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        check_text("Title", title)?;
        check_text("Series name", series_name)?;
        let categories: Vec<String> = categories.into_iter().map(Into::into).collect();
        for category in &categories {
            check_text("Chart category", category)?;
        }
        if categories.len() != values.len() {
            return Err(Error::invalid(format!(
                "Chart {:?} has {} categories but {} values",
                title,
                categories.len(),
                values.len()
            )));
        }
        if let Some(value) = values.iter().find(|v| !v.is_finite()) {
            return Err(Error::invalid(format!(
                "Chart {:?} has a non-finite value: {}",
                title, value
            )));
        }

        self.push(Slide::Chart {
            title: title.to_string(),
            chart_type,
            series_name: series_name.to_string(),
            categories,
            values: values.to_vec(),
        });
        Ok(())
    }

    /// Append a table slide.
    ///
    /// Headers come from the first row's keys in insertion order; later rows
    /// are laid out in header order whatever their own key order.
    ///
    /// # Errors
    /// `InvalidInput` when `rows` is empty or any row's key set differs from
    /// the first row's.
    pub fn add_table(&mut self, title: &str, rows: &[TableRow]) -> Result<()> {
        check_text("Title", title)?;
        let (headers, rows) = normalize_rows(rows)?;
        for cell in headers.iter().chain(rows.iter().flatten()) {
            check_text("Table cell", cell)?;
        }
        self.push(Slide::Table {
            title: title.to_string(),
            headers,
            rows,
        });
        Ok(())
    }

    /// Append a text slide holding `body` verbatim.
    ///
    /// Line breaks (`\n`, `\r\n`) and tabs are kept.
    pub fn add_text(&mut self, title: &str, body: &str) -> Result<()> {
        check_text("Title", title)?;
        check_text("Body", body)?;
        self.push(Slide::TextBox {
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }

    /// Append a bullet-list slide split from `body`, returning the bullet
    /// count.
    ///
    /// A blank body yields no bullets and appends nothing.
    pub fn add_bullets(&mut self, title: &str, body: &str) -> Result<usize> {
        check_text("Title", title)?;
        check_text("Body", body)?;
        let bullets = split_bullets(body);
        let count = bullets.len();
        if count == 0 {
            log::debug!("no bullets for {:?}, slide skipped", title);
            return Ok(0);
        }
        self.push(Slide::BulletList {
            title: title.to_string(),
            bullets,
        });
        Ok(count)
    }

    /// Append an image slide. `width` and `height` are EMUs.
    ///
    /// The image is loaded now, so an unusable source fails here rather than
    /// at serialization.
    ///
    /// # Errors
    /// `InvalidInput` for an unreadable path, empty or unrecognised image
    /// data, or a non-positive size.
    pub fn add_image(
        &mut self,
        title: &str,
        source: impl Into<ImageSource>,
        width: i64,
        height: i64,
    ) -> Result<()> {
        check_text("Title", title)?;
        if width <= 0 || height <= 0 {
            return Err(Error::invalid(format!(
                "Image size must be positive, got {}x{}",
                width, height
            )));
        }
        let (data, format) = source.into().load()?;
        self.push(Slide::Image {
            title: title.to_string(),
            data,
            format,
            width,
            height,
        });
        Ok(())
    }

    /// Lay the deck out as a presentation.
    ///
    /// Chart legends are placed by the chart constructors: bottom for bar,
    /// right for pie.
    pub(crate) fn render(&self) -> Result<MutablePresentation> {
        let mut pres = MutablePresentation::new(self.created);
        if let Some(Slide::Title { title, .. }) = self.slides.first() {
            pres.set_title(title);
        }

        let left = inches(1.0);
        let top = inches(1.5);

        for slide in &self.slides {
            match slide {
                Slide::Title { title, subtitle } => {
                    let out = pres.add_slide(SlideLayout::TitleSlide);
                    out.set_title(title);
                    out.set_subtitle(subtitle);
                },
                Slide::Chart {
                    title,
                    chart_type,
                    series_name,
                    categories,
                    values,
                } => {
                    let series = Series::new(0)
                        .with_title(series_name.clone())
                        .with_categories(categories.clone())
                        .with_values(values.clone());
                    let chart = match chart_type {
                        ChartType::Bar => Chart::clustered_column(series),
                        ChartType::Pie => Chart::pie(series),
                    };

                    let out = pres.add_slide(SlideLayout::TitleOnly);
                    out.set_title(title);
                    out.add_chart(chart, left, top, inches(6.0), inches(4.5));
                },
                Slide::Table {
                    title,
                    headers,
                    rows,
                } => {
                    let height = inches(0.4) * (rows.len() as i64 + 1);
                    let out = pres.add_slide(SlideLayout::TitleOnly);
                    out.set_title(title);
                    out.add_table(
                        headers.clone(),
                        rows.clone(),
                        inches(0.5),
                        top,
                        inches(9.0),
                        height,
                    )?;
                },
                Slide::TextBox { title, body } => {
                    let out = pres.add_slide(SlideLayout::TitleOnly);
                    out.set_title(title);
                    out.add_text_box(body, left, top, inches(6.0), inches(4.0));
                },
                Slide::BulletList { title, bullets } => {
                    let out = pres.add_slide(SlideLayout::TitleOnly);
                    out.set_title(title);
                    out.add_bullet_list(bullets, left, top, inches(6.0), inches(4.0));
                },
                Slide::Image {
                    title,
                    data,
                    width,
                    height,
                    ..
                } => {
                    let out = pres.add_slide(SlideLayout::TitleOnly);
                    out.set_title(title);
                    out.add_picture_from_bytes(
                        data.clone(),
                        left,
                        top,
                        *width,
                        *height,
                        Some(title.clone()),
                    )?;
                },
            }
        }

        Ok(pres)
    }

    /// Serialize the deck as `.pptx` bytes.
    ///
    /// Two calls on an unchanged deck return identical bytes.
    ///
    /// # Errors
    /// `InvalidInput` for an empty deck.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        if self.slides.is_empty() {
            return Err(Error::invalid("Cannot serialize a deck without slides"));
        }
        let bytes = self.render()?.to_bytes()?;
        log::info!(
            "serialized deck: {} slides, {} bytes",
            self.slides.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Serialize the deck into `sink`.
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<()> {
        let bytes = self.serialize()?;
        sink.write_all(&bytes)?;
        sink.flush()?;
        Ok(())
    }
}

/// Reject control characters a presentation part cannot carry.
fn check_text(field: &str, text: &str) -> Result<()> {
    match text.chars().find(|c| is_restricted_char(*c)) {
        Some(c) => Err(Error::invalid(format!(
            "{} contains control character U+{:04X}",
            field, c as u32
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::LegendPosition;
    use crate::ooxml::pptx::reader::inspect;
    use indexmap::IndexMap;
    use proptest::prelude::*;

    #[test]
    fn test_bar_and_pie_legends() {
        let mut deck = Deck::new();
        deck.add_bar_chart("Bar", ["A"], &[1.0]).unwrap();
        deck.add_pie_chart("Pie", vec!["A".to_string()], &[1.0]).unwrap();
        let legends: Vec<_> = inspect(&deck.serialize().unwrap())
            .unwrap()
            .into_iter()
            .map(|s| s.chart.and_then(|c| c.legend).map(|l| l.position))
            .collect();
        assert_eq!(
            legends,
            vec![Some(LegendPosition::Bottom), Some(LegendPosition::Right)]
        );
    }

    #[test]
    fn test_control_characters_rejected() {
        let mut deck = Deck::new();
        assert!(deck.add_title("Line\u{b}break", "").unwrap_err().is_invalid_input());
        assert!(deck.add_title("T", "\u{0}").unwrap_err().is_invalid_input());
        assert!(deck.add_text("T", "form\u{c}feed").unwrap_err().is_invalid_input());
        assert!(deck.add_bullets("T", "One. \u{1b}Two").unwrap_err().is_invalid_input());
        assert!(
            deck.add_bar_chart("Bar", ["Q\u{7}1"], &[1.0])
                .unwrap_err()
                .is_invalid_input()
        );

        let mut row: TableRow = IndexMap::new();
        row.insert("Plan".to_string(), "Pro\u{b}".to_string());
        assert!(deck.add_table("Pricing", &[row]).unwrap_err().is_invalid_input());
        assert!(deck.is_empty());

        deck.add_text("Tabs", "a\tb\r\nc").unwrap();
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_non_finite_chart_value_rejected() {
        let mut deck = Deck::new();
        let err = deck.add_bar_chart("Bar", ["A"], &[f64::NAN]).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(deck.is_empty());
    }

    #[test]
    fn test_bullets_counts() {
        let mut deck = Deck::new();
        assert_eq!(deck.add_bullets("T", "A. B. C").unwrap(), 3);
        assert_eq!(deck.add_bullets("T", "").unwrap(), 0);
        assert_eq!(deck.add_bullets("T", "Just one sentence").unwrap(), 1);
        assert_eq!(deck.len(), 2);
        match &deck.slides()[0] {
            Slide::BulletList { bullets, .. } => assert_eq!(bullets, &["A", "B", "C"]),
            other => panic!("unexpected slide {:?}", other),
        }
    }

    #[test]
    fn test_image_size_must_be_positive() {
        let mut deck = Deck::new();
        let png = b"\x89PNG\r\n\x1a\n".to_vec();
        assert!(
            deck.add_image("I", png.clone(), 0, 10)
                .unwrap_err()
                .is_invalid_input()
        );
        assert!(
            deck.add_image("I", png, 10, -1)
                .unwrap_err()
                .is_invalid_input()
        );
        assert!(deck.is_empty());
    }

    #[test]
    fn test_empty_deck_does_not_serialize() {
        let deck = Deck::new();
        assert!(deck.serialize().unwrap_err().is_invalid_input());
        assert!(deck.write_to(Vec::<u8>::new()).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_write_to_sink_matches_serialize() {
        let mut deck = Deck::new();
        deck.add_title("T", "S").unwrap();
        let mut sink = Vec::new();
        deck.write_to(&mut sink).unwrap();
        assert_eq!(sink, deck.serialize().unwrap());
    }

    proptest! {
        #[test]
        fn prop_chart_length_mismatch_rejected(n in 0usize..20, m in 0usize..20) {
            prop_assume!(n != m);
            let categories: Vec<String> = (0..n).map(|i| format!("C{}", i)).collect();
            let values: Vec<f64> = (0..m).map(|i| i as f64).collect();
            let mut deck = Deck::new();
            prop_assert!(deck.add_bar_chart("Bar", categories.clone(), &values).unwrap_err().is_invalid_input());
            prop_assert!(deck.add_pie_chart("Pie", categories, &values).unwrap_err().is_invalid_input());
            prop_assert!(deck.is_empty());
        }

        #[test]
        fn prop_chart_equal_lengths_accepted(values in prop::collection::vec(-1e9f64..1e9, 0..20)) {
            let categories: Vec<String> = (0..values.len()).map(|i| format!("C{}", i)).collect();
            let mut deck = Deck::new();
            prop_assert!(deck.add_bar_chart("Bar", categories, &values).is_ok());
            prop_assert_eq!(deck.len(), 1);
        }
    }
}
