//! Pricing collaborators and price parsing.

use super::error::CollabError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One pricing plan as reported by a pricing source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingEntry {
    pub plan: String,
    #[serde(default)]
    pub description: String,
    /// Display price, e.g. `$10/mo` or `Free`
    pub price: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

/// Result of a successful pricing fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingOutcome {
    Entries(Vec<PricingEntry>),
    /// The source was reachable but listed no plans
    NoResults,
}

impl PricingOutcome {
    fn from_entries(entries: Vec<PricingEntry>) -> Self {
        if entries.is_empty() {
            PricingOutcome::NoResults
        } else {
            PricingOutcome::Entries(entries)
        }
    }

    pub fn into_entries(self) -> Vec<PricingEntry> {
        match self {
            PricingOutcome::Entries(entries) => entries,
            PricingOutcome::NoResults => Vec::new(),
        }
    }
}

/// Supplies pricing plans.
pub trait PricingSource {
    fn fetch(&self) -> Result<PricingOutcome, CollabError>;
}

/// A fixed list of plans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPricing(pub Vec<PricingEntry>);

impl PricingSource for StaticPricing {
    fn fetch(&self) -> Result<PricingOutcome, CollabError> {
        Ok(PricingOutcome::from_entries(self.0.clone()))
    }
}

/// Plans read from a YAML (or JSON) file holding a list of entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingFile {
    path: PathBuf,
}

impl PricingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PricingSource for PricingFile {
    fn fetch(&self) -> Result<PricingOutcome, CollabError> {
        let text = std::fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(PricingOutcome::NoResults);
        }
        let entries: Vec<PricingEntry> = serde_saphyr::from_str(&text)
            .map_err(|e| CollabError::Malformed(format!("{}: {}", self.path.display(), e)))?;
        log::debug!("{} lists {} plans", self.path.display(), entries.len());
        Ok(PricingOutcome::from_entries(entries))
    }
}

/// Fetch plans, treating a failed fetch as no plans.
pub fn entries_or_empty<S: PricingSource + ?Sized>(source: &S) -> Vec<PricingEntry> {
    match source.fetch() {
        Ok(outcome) => outcome.into_entries(),
        Err(e) => {
            log::warn!("pricing unavailable ({}), deck built without pricing", e);
            Vec::new()
        },
    }
}

/// Numeric value of a display price.
///
/// `Free` is zero. Otherwise the first number in the text is taken, ignoring
/// currency symbols and thousands separators; text without a number yields
/// `None`.
///
/// ```
/// use deckwright::collab::parse_price;
///
/// assert_eq!(parse_price("Free"), Some(0.0));
/// assert_eq!(parse_price("$1,299.00 / year"), Some(1299.0));
/// assert_eq!(parse_price("Contact sales"), None);
/// ```
pub fn parse_price(price: &str) -> Option<f64> {
    let price = price.trim();
    if price.eq_ignore_ascii_case("free") {
        return Some(0.0);
    }

    let start = price.find(|c: char| c.is_ascii_digit())?;
    let number: String = price[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .filter(|c| *c != ',')
        .collect();
    let number = number.trim_end_matches('.');
    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_forms() {
        assert_eq!(parse_price(" FREE "), Some(0.0));
        assert_eq!(parse_price("$10/mo"), Some(10.0));
        assert_eq!(parse_price("€12.50"), Some(12.5));
        assert_eq!(parse_price("Starts at 5."), Some(5.0));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("Custom"), None);
    }

    #[test]
    fn test_pricing_file_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("plans.yaml");
        std::fs::write(
            &yaml,
            "- plan: Free\n  price: Free\n- plan: Pro\n  description: For teams\n  price: $10\n  features: [SSO]\n",
        )
        .unwrap();
        let entries = PricingFile::new(&yaml).fetch().unwrap().into_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].features, vec!["SSO"]);
        assert_eq!(entries[0].description, "");

        let json = dir.path().join("plans.json");
        std::fs::write(&json, r#"[{"plan": "Basic", "price": "$5"}]"#).unwrap();
        let entries = PricingFile::new(&json).fetch().unwrap().into_entries();
        assert_eq!(entries[0].plan, "Basic");
    }

    #[test]
    fn test_no_results_differs_from_failure() {
        let dir = tempfile::tempdir().unwrap();
        let empty = dir.path().join("empty.yaml");
        std::fs::write(&empty, "[]\n").unwrap();
        assert_eq!(PricingFile::new(&empty).fetch().unwrap(), PricingOutcome::NoResults);
        assert_eq!(StaticPricing::default().fetch().unwrap(), PricingOutcome::NoResults);

        let missing = PricingFile::new(dir.path().join("missing.yaml"));
        assert!(matches!(missing.fetch(), Err(CollabError::Io(_))));
        assert!(entries_or_empty(&missing).is_empty());

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "plan: [unterminated\n").unwrap();
        assert!(matches!(
            PricingFile::new(&broken).fetch(),
            Err(CollabError::Malformed(_))
        ));
    }
}
