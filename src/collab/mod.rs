//! External collaborators.
//!
//! Text generation and pricing lookups live outside this crate. They are
//! reached through the [`TextGenerator`] and [`PricingSource`] traits, which
//! callers implement; the file-backed and fixed implementations here cover
//! offline use. Failures are resolved by the caller before a deck is built.

pub mod error;
pub mod pricing;
pub mod text;

pub use error::CollabError;
pub use pricing::{
    PricingEntry, PricingFile, PricingOutcome, PricingSource, StaticPricing, entries_or_empty,
    parse_price,
};
pub use text::{FixedText, PLACEHOLDER_BODY, TextGenerator, body_or_placeholder, description_prompt};
