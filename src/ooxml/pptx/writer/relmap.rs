/// Relationship ID mapper for tracking relationships during presentation generation.
///
/// Relationships are created first; the mapper then hands the real rIds to
/// the slide XML writer.
use std::collections::HashMap;

/// Maps slide elements to their relationship IDs.
///
/// Organized per slide, as each slide has its own set of relationships.
#[derive(Debug, Default)]
pub struct RelationshipMapper {
    /// Maps (slide_index, image_index_in_slide) to relationship ID
    image_ids: HashMap<(usize, usize), String>,
    /// Maps (slide_index, chart_index_in_slide) to relationship ID
    chart_ids: HashMap<(usize, usize), String>,
}

impl RelationshipMapper {
    /// Create a new empty relationship mapper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the relationship of an image within a slide (both 0-based).
    pub fn add_image(&mut self, slide_index: usize, image_index_in_slide: usize, rel_id: String) {
        self.image_ids
            .insert((slide_index, image_index_in_slide), rel_id);
    }

    /// Record the relationship of a chart within a slide (both 0-based).
    pub fn add_chart(&mut self, slide_index: usize, chart_index_in_slide: usize, rel_id: String) {
        self.chart_ids
            .insert((slide_index, chart_index_in_slide), rel_id);
    }

    pub fn get_image_id(&self, slide_index: usize, image_index_in_slide: usize) -> Option<&str> {
        self.image_ids
            .get(&(slide_index, image_index_in_slide))
            .map(|s| s.as_str())
    }

    pub fn get_chart_id(&self, slide_index: usize, chart_index_in_slide: usize) -> Option<&str> {
        self.chart_ids
            .get(&(slide_index, chart_index_in_slide))
            .map(|s| s.as_str())
    }
}
