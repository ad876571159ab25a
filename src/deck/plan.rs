//! Deck plans: which optional sections a generated deck carries.
//!
//! A plan is plain configuration, loadable from YAML with every field
//! defaulted:
//!
//! ```yaml
//! subtitle: Prepared for the board
//! chart:
//!   title: Revenue
//!   categories: [Q1, Q2, Q3]
//!   values: [1.5, 2.0, 2.75]
//! pie_chart: {}
//! bullets: false
//! image:
//!   width: 4.0
//!   height: 3.0
//! ```
//!
//! [`compose`] turns a plan plus the caller's content into a [`Deck`] in a
//! fixed section order.

use super::builder::{DEFAULT_SERIES_NAME, Deck};
use super::image::ImageSource;
use super::table::TableRow;
use crate::collab::pricing::{PricingEntry, parse_price};
use crate::common::unit::inches;
use crate::common::{Error, Result};
use crate::ooxml::charts::ChartType;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_SUBTITLE: &str = "Generated with deckwright";
pub const DEFAULT_CHART_TITLE: &str = "Sample Chart";
pub const DEFAULT_PIE_TITLE: &str = "Distribution";
pub const PRICING_CHART_TITLE: &str = "Plan Prices";
pub const BULLETS_TITLE: &str = "Key Points";
pub const TABLE_TITLE: &str = "Pricing Plans";
pub const IMAGE_TITLE: &str = "Image";

/// Data for a chart section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartSection {
    /// Slide title; each chart kind has its own default
    pub title: Option<String>,
    pub series_name: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            title: None,
            series_name: DEFAULT_SERIES_NAME.to_string(),
            categories: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            values: vec![10.0, 20.0, 30.0],
        }
    }
}

/// Display size of the image section, in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImageSection {
    pub width: f64,
    pub height: f64,
}

impl Default for ImageSection {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 4.5,
        }
    }
}

/// Which sections to include, and how to title them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckPlan {
    pub subtitle: String,
    /// Bar chart section; `null` drops it
    pub chart: Option<ChartSection>,
    /// Pie chart section, off unless given
    pub pie_chart: Option<ChartSection>,
    /// "About {topic}" text slide from the body
    pub text: bool,
    /// "Key Points" bullets split from the body
    pub bullets: bool,
    /// Pricing table, when pricing entries are supplied
    pub table: bool,
    pub image: ImageSection,
    /// Chart the parsed pricing entries instead of the chart section's data
    pub pricing_chart: bool,
}

impl Default for DeckPlan {
    fn default() -> Self {
        Self {
            subtitle: DEFAULT_SUBTITLE.to_string(),
            chart: Some(ChartSection::default()),
            pie_chart: None,
            text: true,
            bullets: true,
            table: true,
            image: ImageSection::default(),
            pricing_chart: false,
        }
    }
}

impl DeckPlan {
    /// Parse a plan from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| Error::Config(format!("Invalid deck plan: {}", e)))
    }

    /// Read a plan from a YAML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Cannot serialize deck plan: {}", e)))
    }
}

/// Content supplied by the caller for one deck.
#[derive(Debug, Clone, Default)]
pub struct DeckContent {
    pub topic: String,
    /// Narrative body for the text and bullet slides
    pub body: Option<String>,
    pub pricing: Vec<PricingEntry>,
    pub image: Option<ImageSource>,
}

impl DeckContent {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Default::default()
        }
    }
}

/// Table rows for pricing entries: `Plan`, `Description`, `Price`, and
/// `Features` when any entry lists features.
pub fn pricing_rows(entries: &[PricingEntry]) -> Vec<TableRow> {
    let with_features = entries.iter().any(|e| !e.features.is_empty());
    entries
        .iter()
        .map(|entry| {
            let mut row = TableRow::new();
            row.insert("Plan".to_string(), entry.plan.clone());
            row.insert("Description".to_string(), entry.description.clone());
            row.insert("Price".to_string(), entry.price.clone());
            if with_features {
                row.insert("Features".to_string(), entry.features.join("\n"));
            }
            row
        })
        .collect()
}

/// Chart data from pricing entries whose price parses. Entries that do not
/// parse are skipped with a warning.
fn pricing_series(entries: &[PricingEntry]) -> (Vec<String>, Vec<f64>) {
    let mut categories = Vec::new();
    let mut values = Vec::new();
    for entry in entries {
        match parse_price(&entry.price) {
            Some(value) => {
                categories.push(entry.plan.clone());
                values.push(value);
            },
            None => log::warn!(
                "price {:?} of plan {:?} is not numeric, left out of the chart",
                entry.price,
                entry.plan
            ),
        }
    }
    (categories, values)
}

/// Build a deck from a plan and the caller's content.
///
/// Sections are emitted in a fixed order: title, bar chart, pie chart, text,
/// bullets, pricing table, image. Sections whose content is missing are
/// skipped.
pub fn compose(plan: &DeckPlan, content: DeckContent) -> Result<Deck> {
    compose_into(Deck::new(), plan, content)
}

/// [`compose`] onto an existing (usually empty) deck.
pub fn compose_into(mut deck: Deck, plan: &DeckPlan, content: DeckContent) -> Result<Deck> {
    let DeckContent {
        topic,
        body,
        pricing,
        image,
    } = content;

    deck.add_title(&topic, &plan.subtitle)?;

    if let Some(ref chart) = plan.chart {
        let title = chart.title.as_deref().unwrap_or(DEFAULT_CHART_TITLE);
        let priced = if plan.pricing_chart {
            Some(pricing_series(&pricing)).filter(|(categories, _)| !categories.is_empty())
        } else {
            None
        };
        match priced {
            Some((categories, values)) => deck.add_chart(
                PRICING_CHART_TITLE,
                ChartType::Bar,
                "Price",
                categories,
                &values,
            )?,
            None => deck.add_chart(
                title,
                ChartType::Bar,
                &chart.series_name,
                chart.categories.iter().cloned(),
                &chart.values,
            )?,
        }
    }

    if let Some(ref pie) = plan.pie_chart {
        let title = pie.title.as_deref().unwrap_or(DEFAULT_PIE_TITLE);
        deck.add_chart(
            title,
            ChartType::Pie,
            &pie.series_name,
            pie.categories.iter().cloned(),
            &pie.values,
        )?;
    }

    if let Some(ref body) = body {
        if plan.text {
            deck.add_text(&format!("About {}", topic), body)?;
        }
        if plan.bullets {
            deck.add_bullets(BULLETS_TITLE, body)?;
        }
    }

    if plan.table && !pricing.is_empty() {
        deck.add_table(TABLE_TITLE, &pricing_rows(&pricing))?;
    }

    if let Some(image) = image {
        deck.add_image(
            IMAGE_TITLE,
            image,
            inches(plan.image.width),
            inches(plan.image.height),
        )?;
    }

    Ok(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::SlideKind;

    fn entry(plan: &str, price: &str, features: &[&str]) -> PricingEntry {
        PricingEntry {
            plan: plan.to_string(),
            description: format!("{} plan", plan),
            price: price.to_string(),
            features: features.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_default_plan_title_and_chart_only() {
        let deck = compose(&DeckPlan::default(), DeckContent::new("Rust")).unwrap();
        assert_eq!(deck.kinds(), vec![SlideKind::Title, SlideKind::Chart]);
        assert_eq!(deck.titles(), vec!["Rust", DEFAULT_CHART_TITLE]);
    }

    #[test]
    fn test_full_plan_order() {
        let plan = DeckPlan {
            pie_chart: Some(ChartSection::default()),
            ..Default::default()
        };
        let content = DeckContent {
            body: Some("Safe. Fast".to_string()),
            pricing: vec![entry("Free", "Free", &[]), entry("Pro", "$10", &["SSO"])],
            image: Some(ImageSource::Bytes(b"GIF89a\x01\x00".to_vec())),
            ..DeckContent::new("Rust")
        };
        let deck = compose(&plan, content).unwrap();
        assert_eq!(
            deck.kinds(),
            vec![
                SlideKind::Title,
                SlideKind::Chart,
                SlideKind::Chart,
                SlideKind::TextBox,
                SlideKind::BulletList,
                SlideKind::Table,
                SlideKind::Image,
            ]
        );
        assert_eq!(deck.titles()[2], DEFAULT_PIE_TITLE);
        assert_eq!(deck.titles()[3], "About Rust");
    }

    #[test]
    fn test_pricing_rows_include_features_column_when_present() {
        let rows = pricing_rows(&[entry("Free", "Free", &[]), entry("Pro", "$10", &["SSO", "Audit"])]);
        let keys: Vec<&String> = rows[0].keys().collect();
        assert_eq!(keys, vec!["Plan", "Description", "Price", "Features"]);
        assert_eq!(rows[1]["Features"], "SSO\nAudit");

        let rows = pricing_rows(&[entry("Free", "Free", &[])]);
        assert!(!rows[0].contains_key("Features"));
    }

    #[test]
    fn test_pricing_chart_skips_unparseable_prices() {
        let plan = DeckPlan {
            pricing_chart: true,
            table: false,
            ..Default::default()
        };
        let content = DeckContent {
            pricing: vec![entry("Free", "Free", &[]), entry("Pro", "$12.50/mo", &[]), entry("Ent", "Contact us", &[])],
            ..DeckContent::new("SaaS")
        };
        let deck = compose(&plan, content).unwrap();
        match &deck.slides()[1] {
            crate::deck::Slide::Chart {
                title,
                categories,
                values,
                ..
            } => {
                assert_eq!(title, PRICING_CHART_TITLE);
                assert_eq!(categories, &["Free", "Pro"]);
                assert_eq!(values, &[0.0, 12.5]);
            },
            other => panic!("unexpected slide {:?}", other),
        }
    }

    #[test]
    fn test_plan_from_yaml() {
        let plan = DeckPlan::from_yaml_str(
            "subtitle: Board\nchart: null\npie_chart:\n  title: Share\nimage:\n  width: 4.0\n",
        )
        .unwrap();
        assert_eq!(plan.subtitle, "Board");
        assert!(plan.chart.is_none());
        let pie = plan.pie_chart.unwrap();
        assert_eq!(pie.title.as_deref(), Some("Share"));
        assert_eq!(pie.values, vec![10.0, 20.0, 30.0]);
        assert_eq!(plan.image.width, 4.0);
        assert_eq!(plan.image.height, 4.5);
        assert!(plan.text);
    }

    #[test]
    fn test_plan_rejects_unknown_fields() {
        let err = DeckPlan::from_yaml_str("colour: red\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_plan_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.yaml");
        std::fs::write(&path, "bullets: false\n").unwrap();
        assert!(!DeckPlan::from_path(&path).unwrap().bullets);
        assert!(matches!(
            DeckPlan::from_path(dir.path().join("absent.yaml")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_mismatched_chart_section_is_invalid_input() {
        let plan = DeckPlan {
            chart: Some(ChartSection {
                values: vec![1.0],
                ..Default::default()
            }),
            ..Default::default()
        };
        let err = compose(&plan, DeckContent::new("x")).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
