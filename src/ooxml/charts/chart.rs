//! Chart model.

use crate::ooxml::charts::legend::Legend;
use crate::ooxml::charts::series::Series;
use crate::ooxml::charts::types::{BarDirection, BarGrouping, ChartType, LegendPosition};

/// A chart part: one plot (bar or pie), its series and an optional legend.
///
/// The chart title is left to the hosting slide, so `autoTitleDeleted` is
/// always set.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// Kind of plot
    pub chart_type: ChartType,
    /// Bar direction (bar charts only)
    pub bar_direction: BarDirection,
    /// Bar grouping (bar charts only)
    pub grouping: BarGrouping,
    /// Vary colors by point
    pub vary_colors: bool,
    /// Series in plot order
    pub series: Vec<Series>,
    /// Legend, if shown
    pub legend: Option<Legend>,
}

impl Chart {
    /// A clustered column chart with the legend at the bottom.
    pub fn clustered_column(series: Series) -> Self {
        Self {
            chart_type: ChartType::Bar,
            bar_direction: BarDirection::Column,
            grouping: BarGrouping::Clustered,
            vary_colors: false,
            series: vec![series],
            legend: Some(Legend::new(LegendPosition::Bottom)),
        }
    }

    /// A pie chart with the legend at the right.
    pub fn pie(series: Series) -> Self {
        Self {
            chart_type: ChartType::Pie,
            bar_direction: BarDirection::Column,
            grouping: BarGrouping::Standard,
            vary_colors: true,
            series: vec![series],
            legend: Some(Legend::new(LegendPosition::Right)),
        }
    }

    #[inline]
    pub fn with_legend(mut self, legend: Option<Legend>) -> Self {
        self.legend = legend;
        self
    }
}
