//! Unified error types for deckwright.
//!
//! This module provides the error type surfaced by every public operation,
//! folding package-layer and OOXML-layer failures into one enum.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
