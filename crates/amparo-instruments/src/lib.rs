//! amparo-instruments
//!
//! Psychometric instrument definitions. Pure data and arithmetic, no storage
//! dependency. Defines the items, subscales, and scoring rules for each
//! supported questionnaire.

pub mod error;
pub mod instruments;
pub mod scoring;

use scoring::{Domain, Item, ScoreRange, ValidationError};

/// Trait implemented by each self-report questionnaire.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "dass21").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "DASS-21").
    fn name(&self) -> &str;

    /// The questionnaire items, in presentation order.
    fn items(&self) -> &[Item];

    /// The subscales this instrument measures.
    fn domains(&self) -> &[Domain];

    /// Valid range for a single item response.
    fn response_range(&self) -> ScoreRange;

    /// Check response count and per-item range.
    fn validate_responses(&self, responses: &[i32]) -> Result<(), ValidationError> {
        let expected = self.items().len();
        if responses.len() != expected {
            return Err(ValidationError {
                item: None,
                value: None,
                expected_range: None,
                message: format!(
                    "{}: expected {expected} responses, got {}",
                    self.name(),
                    responses.len()
                ),
            });
        }

        let range = self.response_range();
        if let Some((index, &value)) = responses
            .iter()
            .enumerate()
            .find(|(_, v)| !range.contains(i64::from(**v)))
        {
            return Err(ValidationError {
                item: Some(index),
                value: Some(i64::from(value)),
                expected_range: Some(range),
                message: format!(
                    "{}: item {index} response {value} is outside range [{}, {}]",
                    self.name(),
                    range.min,
                    range.max,
                ),
            });
        }
        Ok(())
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![Box::new(instruments::dass21::Dass21)]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}
