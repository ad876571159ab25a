//! Deck assembly.
//!
//! A [`Deck`] is an ordered list of [`Slide`]s built through append
//! operations and serialized to `.pptx` bytes. [`plan::compose`] builds a
//! whole deck from a [`DeckPlan`] and the caller's content.
//!
//! # Example
//!
//! ```
//! use deckwright::deck::{compose, DeckContent, DeckPlan, SlideKind};
//! use deckwright::inspect;
//!
//! let content = DeckContent {
//!     body: Some("Memory safe. Fast. Productive".to_string()),
//!     ..DeckContent::new("Rust")
//! };
//! let deck = compose(&DeckPlan::default(), content)?;
//!
//! let slides = inspect(&deck.serialize()?)?;
//! assert_eq!(slides.len(), 4);
//! assert_eq!(slides[3].kind, SlideKind::BulletList);
//! assert_eq!(slides[3].bullet_count(), 3);
//! # Ok::<(), deckwright::Error>(())
//! ```

// Submodule declarations
mod builder;
mod bullets;
mod image;
pub mod plan;
mod slide;
mod table;

#[cfg(test)]
mod tests;

// Re-exports
pub use builder::{DEFAULT_SERIES_NAME, Deck};
pub use bullets::split_bullets;
pub use image::ImageSource;
pub use plan::{ChartSection, DeckContent, DeckPlan, ImageSection, compose};
pub use slide::{Slide, SlideKind};
pub use table::TableRow;
