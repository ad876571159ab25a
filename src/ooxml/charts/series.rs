//! Chart series model.

/// One data series: a name plus parallel category labels and values.
///
/// Data is written as literals (`c:strLit`/`c:numLit`); no worksheet backs
/// the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Series index
    pub index: u32,
    /// Plot order
    pub order: u32,
    /// Series name shown in the legend of bar charts
    pub title: Option<String>,
    /// Category labels
    pub categories: Vec<String>,
    /// Values, one per category
    pub values: Vec<f64>,
}

impl Series {
    /// Create an empty series at `index`, plotted in the same order.
    #[inline]
    pub fn new(index: u32) -> Self {
        Self {
            index,
            order: index,
            title: None,
            categories: Vec::new(),
            values: Vec::new(),
        }
    }

    #[inline]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[inline]
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    #[inline]
    pub fn with_values(mut self, values: Vec<f64>) -> Self {
        self.values = values;
        self
    }
}
