use thiserror::Error;

/// The source could not be reached or did not answer with a success status.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
}

/// The source answered, but the document no longer has the shape we extract from.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not find {0:?}")]
    MissingFragment(&'static str),

    #[error("no {0} found in document")]
    NoMatches(&'static str),

    #[error("could not find variable {0:?}")]
    MissingVariable(String),

    #[error("could not find {0} of array")]
    MissingBracket(&'static str),

    #[error("expected a JSON response but got content type {0:?}")]
    NotJson(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected table layout: {0}")]
    Layout(String),
}

/// Anything that can go wrong while extracting facts from a single source.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Aggregate(#[from] AggregationError),
}

impl ExtractError {
    /// Returns `true` if the source was unreachable rather than misshapen.
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// Returns `true` if the source answered with a document we could not parse.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Several independent parts of one extraction failed at once.
///
/// Messages are kept flat and joined for display rather than nested.
#[derive(Debug, Error)]
#[error("{}", .messages.join(" "))]
pub struct AggregationError {
    messages: Vec<String>,
}

impl AggregationError {
    /// Combine the errors of independent sub-extractions.
    ///
    /// Returns `None` when nothing failed and the single error untouched when exactly one did.
    #[must_use]
    pub fn combine(errors: Vec<ExtractError>) -> Option<ExtractError> {
        match errors.len() {
            0 => None,
            1 => errors.into_iter().next(),
            _ => Some(ExtractError::Aggregate(Self {
                messages: errors.iter().map(ToString::to_string).collect(),
            })),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}
