//! Narrative text collaborators.

use super::error::CollabError;

/// Body used when no narrative text could be generated.
pub const PLACEHOLDER_BODY: &str = "Content could not be generated for this topic.";

/// Produces narrative text for a prompt.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, CollabError>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    fn generate(&self, prompt: &str) -> Result<String, CollabError> {
        (**self).generate(prompt)
    }
}

/// A generator that always answers with the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedText(pub String);

impl FixedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl TextGenerator for FixedText {
    fn generate(&self, _prompt: &str) -> Result<String, CollabError> {
        Ok(self.0.clone())
    }
}

/// Prompt asking for a short description of `topic`.
pub fn description_prompt(topic: &str) -> String {
    format!("Write a short, factual description of {} in a few sentences.", topic)
}

/// Generate a body, falling back to [`PLACEHOLDER_BODY`] when the generator
/// fails or returns blank text.
pub fn body_or_placeholder<G: TextGenerator + ?Sized>(generator: &G, prompt: &str) -> String {
    match generator.generate(prompt) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            log::warn!("text generator returned nothing, using placeholder body");
            PLACEHOLDER_BODY.to_string()
        },
        Err(e) => {
            log::warn!("text generation failed ({}), using placeholder body", e);
            PLACEHOLDER_BODY.to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Offline;

    impl TextGenerator for Offline {
        fn generate(&self, _prompt: &str) -> Result<String, CollabError> {
            Err(CollabError::Unavailable("no network".to_string()))
        }
    }

    #[test]
    fn test_fixed_text_passes_through() {
        let generator = FixedText::new("Rust is a language.");
        assert_eq!(
            body_or_placeholder(&generator, &description_prompt("Rust")),
            "Rust is a language."
        );
    }

    #[test]
    fn test_failures_degrade_to_placeholder() {
        assert_eq!(body_or_placeholder(&Offline, "x"), PLACEHOLDER_BODY);
        assert_eq!(body_or_placeholder(&FixedText::new("  \n"), "x"), PLACEHOLDER_BODY);

        let dynamic: &dyn TextGenerator = &Offline;
        assert_eq!(body_or_placeholder(dynamic, "x"), PLACEHOLDER_BODY);
    }
}
