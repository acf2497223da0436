//! The health ministry's dashboard scripts.
//!
//! Chart data is published as small script files: `Bezirke.js`, `Bundesland.js`,
//! `Altersverteilung.js` and `Geschlechtsverteilung.js` each embed a JSON array of
//! `{"label": ..., "y": ...}` entries, and `SimpleData.js` assigns the confirmed total to a
//! variable. Province labels are abbreviations (`W`, `NÖ`, ...) mapped to full names.

mod labelled;
mod province;
mod provider;

pub use labelled::{JsVariable, LabelledArray, LabelledValue};
pub use province::{Province, province_name};
pub use provider::{NAME, Provider};
