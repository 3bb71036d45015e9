//! Boundary to an external advice generator.
//!
//! A scene description goes in, advice text comes out. No provider is wired
//! up; [`DisabledAdvice`] answers every request with `None` and the API
//! returns the rendered prompt alone.

use std::fmt::Debug;
use std::sync::Arc;

pub trait AdviceSource: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Advice for a rendered scene description, if the source produced any.
    fn advise(&self, scene: &str) -> Option<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledAdvice;

impl AdviceSource for DisabledAdvice {
    fn name(&self) -> &str {
        "disabled"
    }

    fn advise(&self, _scene: &str) -> Option<String> {
        None
    }
}

/// Factory for advice sources by name.
///
/// Unknown names fall back to [`DisabledAdvice`] instead of failing, so a
/// misconfigured server still serves prompts.
pub fn create_advice_source(name: &str) -> Arc<dyn AdviceSource> {
    match name {
        "disabled" | "" => Arc::new(DisabledAdvice),
        other => {
            tracing::warn!(source = other, "unknown advice source, advice disabled");
            Arc::new(DisabledAdvice)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_source_never_answers() {
        let source = DisabledAdvice;
        assert_eq!(source.name(), "disabled");
        assert_eq!(source.advise("Table (small blind first):"), None);
    }

    #[test]
    fn unknown_names_fall_back_to_disabled() {
        assert_eq!(create_advice_source("remote-llm").name(), "disabled");
        assert_eq!(create_advice_source("").name(), "disabled");
    }
}
