//! Deckwright - slide-deck assembly and `.pptx` serialization
//!
//! Builds presentations from a topic, an optional narrative body, optional
//! pricing data and an optional image, and writes them as Office Open XML
//! presentations that PowerPoint, Keynote and LibreOffice open.
//!
//! # Features
//!
//! - **Deck builder**: title, bar/pie chart, table, text, bullet-list and
//!   image slides, validated on append
//! - **Deck plans**: YAML-configurable section selection via [`deck::DeckPlan`]
//! - **Deterministic output**: serializing an unchanged deck twice yields the
//!   same bytes
//! - **Inspection**: read a produced `.pptx` back into per-slide summaries
//! - **Collaborator traits**: text generation and pricing lookups stay
//!   outside the crate behind [`collab::TextGenerator`] and
//!   [`collab::PricingSource`]
//!
//! # Example
//!
//! ```
//! use deckwright::{Deck, inspect};
//! use deckwright::deck::{SlideKind, TableRow};
//!
//! let mut deck = Deck::new();
//! deck.add_title("Acme Cloud", "Plans and pricing")?;
//! deck.add_pie_chart("Customers by plan", ["Free", "Pro"], &[70.0, 30.0])?;
//!
//! let mut row = TableRow::new();
//! row.insert("Plan".to_string(), "Pro".to_string());
//! row.insert("Price".to_string(), "$10".to_string());
//! deck.add_table("Pricing Plans", &[row])?;
//!
//! let bytes = deck.serialize()?;
//! let slides = inspect(&bytes)?;
//! assert_eq!(slides[2].kind, SlideKind::Table);
//! assert_eq!(slides[2].title, "Pricing Plans");
//! # Ok::<(), deckwright::Error>(())
//! ```

/// External collaborators (text generation, pricing)
pub mod collab;

/// Shared error type, units and XML helpers
pub mod common;

/// Deck model, builder operations and plans
pub mod deck;

/// OOXML (Office Open XML) package, chart and presentation parts
pub mod ooxml;

pub use common::{Error, Result};
pub use deck::{Deck, DeckPlan, ImageSource, Slide, SlideKind};
pub use ooxml::pptx::reader::SlideSummary;

/// Inspect a serialized presentation, one summary per slide in order.
///
/// # Errors
/// `InvalidInput` for bytes that are not a readable presentation.
pub fn inspect(data: &[u8]) -> Result<Vec<SlideSummary>> {
    ooxml::pptx::reader::inspect(data).map_err(|e| match Error::from(e) {
        Error::Zip(msg) | Error::Xml(msg) => Error::InvalidInput(msg),
        other => other,
    })
}
