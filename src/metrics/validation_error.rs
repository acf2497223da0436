use thiserror::Error;

/// A produced metric set does not meet an expected postcondition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("could not find metric {name} ({tag_match})")]
    MissingMetric { name: String, tag_match: String },

    #[error("check for metric {name} ({tag_match}) failed with value {value:.6}")]
    CheckFailed { name: String, tag_match: String, value: f64 },

    #[error("missing tags for {entity}: {name} has {found} tags, expected {expected}")]
    IncompleteTags {
        name: String,
        entity: String,
        found: usize,
        expected: usize,
    },
}
