use crate::facts::http::extract_array;
use crate::facts::{Extraction, ParseError};
use regex::Regex;
use serde::Deserialize;

/// One `{"label": ..., "y": ...}` entry of a chart data array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LabelledValue {
    #[serde(alias = "Label")]
    pub label: String,

    #[serde(alias = "Y")]
    pub y: u64,
}

/// A JSON array of [`LabelledValue`] embedded in script text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelledArray;

impl Extraction for LabelledArray {
    type Output = Vec<LabelledValue>;

    fn extract(&self, document: &str) -> Result<Self::Output, ParseError> {
        Ok(serde_json::from_str(extract_array(document)?)?)
    }
}

/// The first integer assigned to a script variable, as in `Erkrankungen = 1234;`.
#[derive(Debug, Clone, Copy)]
pub struct JsVariable(pub &'static str);

impl Extraction for JsVariable {
    type Output = u64;

    fn extract(&self, document: &str) -> Result<Self::Output, ParseError> {
        let name = self.0;
        assignment_regex(name)
            .captures(document)
            .and_then(|captures| captures.get(1)?.as_str().parse().ok())
            .ok_or_else(|| ParseError::MissingVariable(name.to_string()))
    }
}

fn assignment_regex(name: &str) -> Regex {
    Regex::new(&format!(r"{}\s*=\s*([0-9]+)", regex::escape(name))).expect("invalid regex")
}
