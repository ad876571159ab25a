//! Presentation writer components for PPTX.

pub mod package;
pub mod pres;
pub mod props;
pub(crate) mod relmap;
pub mod shape;
pub mod slide;

// Re-export main types
pub use pres::MutablePresentation;
pub use props::DocumentProperties;
pub use shape::{Frame, MutableShape};
pub use slide::{MutableSlide, SlideLayout};
