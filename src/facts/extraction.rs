use super::error::ParseError;

/// One way of pulling typed facts out of a fetched document.
///
/// Each upstream document shape gets its own implementation so that a layout change on one page
/// is absorbed by one strategy, never by the providers or the health checks built on top.
pub trait Extraction {
    type Output;

    /// Extract from the raw document text.
    fn extract(&self, document: &str) -> Result<Self::Output, ParseError>;
}
