//! DrawingML chart parts.
//!
//! A small chart model (bar and pie plots with literal data), the XML
//! writer that renders it as a `chartN.xml` part, and a reader for the same
//! subset.
//!
//! # Example
//!
//! ```
//! use deckwright::ooxml::charts::{Chart, Series};
//! use deckwright::ooxml::charts::writer::chart_to_xml;
//!
//! let series = Series::new(0)
//!     .with_title("Series 1")
//!     .with_categories(vec!["A".into(), "B".into()])
//!     .with_values(vec![10.0, 20.0]);
//! let xml = chart_to_xml(&Chart::clustered_column(series))?;
//! assert!(xml.contains("<c:barChart>"));
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod chart;
pub mod legend;
pub mod reader;
pub mod series;
pub mod types;
pub mod writer;

pub use chart::Chart;
pub use legend::Legend;
pub use series::Series;
pub use types::{BarDirection, BarGrouping, ChartType, LegendPosition};
