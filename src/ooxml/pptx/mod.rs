//! PowerPoint (.pptx) presentation support.
//!
//! - `writer`: in-memory presentation model and its serialization into an
//!   OPC package
//! - `reader`: read-back of produced presentations (slide kinds, titles,
//!   chart data)
//! - `template`: fixed master, layout and theme parts every presentation
//!   carries
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use deckwright::ooxml::pptx::reader::{inspect, SlideKind};
//! use deckwright::ooxml::pptx::writer::{MutablePresentation, SlideLayout};
//!
//! let mut pres = MutablePresentation::new(Utc::now());
//! pres.add_slide(SlideLayout::TitleSlide).set_title("Quarterly review");
//!
//! let bytes = pres.to_bytes()?;
//! let slides = inspect(&bytes)?;
//! assert_eq!(slides[0].kind, SlideKind::Title);
//! # Ok::<(), deckwright::ooxml::OoxmlError>(())
//! ```

pub mod format;
pub mod reader;
pub mod template;
pub mod writer;

pub use format::ImageFormat;
pub use reader::{SlideKind, SlideSummary, inspect};
pub use writer::{MutablePresentation, MutableSlide, SlideLayout};
