//! Core chart enumerations.
//!
//! Chart kinds, bar layout options, axis and legend positions, each with the
//! attribute value DrawingML uses for it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chart type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Bar chart (clustered columns by default)
    Bar,
    /// Pie chart
    Pie,
}

impl ChartType {
    /// Returns the XML element name for this chart type.
    #[inline]
    pub const fn xml_element_name(&self) -> &'static str {
        match self {
            Self::Bar => "barChart",
            Self::Pie => "pieChart",
        }
    }

    /// Map a plot-area element name back to a chart type.
    pub fn from_xml_element_name(name: &[u8]) -> Option<Self> {
        match name {
            b"barChart" | b"bar3DChart" => Some(Self::Bar),
            b"pieChart" | b"pie3DChart" | b"ofPieChart" => Some(Self::Pie),
            _ => None,
        }
    }

    /// Returns true if this chart type is drawn against category/value axes.
    #[inline]
    pub const fn has_axes(&self) -> bool {
        matches!(self, Self::Bar)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bar => f.write_str("bar"),
            Self::Pie => f.write_str("pie"),
        }
    }
}

/// Axis position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Bottom,
    Left,
}

impl AxisPosition {
    /// Returns the XML value for this position.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Bottom => "b",
            Self::Left => "l",
        }
    }
}

/// Bar direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarDirection {
    /// Vertical bars (columns)
    Column,
}

impl BarDirection {
    /// Returns the XML value for this direction.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Column => "col",
        }
    }
}

/// Bar grouping type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarGrouping {
    /// Clustered bars
    Clustered,
    /// Standard grouping
    Standard,
}

impl BarGrouping {
    /// Returns the XML value for this grouping.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Clustered => "clustered",
            Self::Standard => "standard",
        }
    }
}

/// Legend position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Bottom,
    Left,
    Right,
    Top,
}

impl LegendPosition {
    /// Returns the XML value for this position.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Bottom => "b",
            Self::Left => "l",
            Self::Right => "r",
            Self::Top => "t",
        }
    }

    /// Parse a `c:legendPos` value.
    pub fn from_xml_value(value: &str) -> Option<Self> {
        match value {
            "b" => Some(Self::Bottom),
            "l" => Some(Self::Left),
            "r" => Some(Self::Right),
            "t" => Some(Self::Top),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_type_element_names() {
        for kind in [ChartType::Bar, ChartType::Pie] {
            let name = kind.xml_element_name();
            assert_eq!(ChartType::from_xml_element_name(name.as_bytes()), Some(kind));
        }
        assert_eq!(ChartType::from_xml_element_name(b"lineChart"), None);
    }

    #[test]
    fn test_legend_position_values() {
        assert_eq!(LegendPosition::Bottom.xml_value(), "b");
        assert_eq!(LegendPosition::from_xml_value("r"), Some(LegendPosition::Right));
        assert_eq!(LegendPosition::from_xml_value("tr"), None);
    }
}
