//! Text exposition of metrics, one line per metric.
//!
//! `name{k1="v1",k2="v2"} value` for tagged metrics, `name value` otherwise. Values are printed
//! with six decimals; backslashes, quotes and newlines in tag values are escaped.

use super::{Metric, Metrics};
use core::fmt::Write as _;
use std::io::{self, Write};

/// Render one metric as a newline-terminated line.
#[must_use]
pub fn format_metric(metric: &Metric) -> String {
    let mut line = metric.name.clone();

    if let Some(tags) = metric.tags.as_ref().filter(|tags| !tags.is_empty()) {
        line.push('{');
        for (index, (key, value)) in tags.iter().enumerate() {
            if index > 0 {
                line.push(',');
            }
            let _ = write!(line, "{key}=\"{}\"", escape_value(value));
        }
        line.push('}');
    }

    let _ = writeln!(line, " {:.6}", metric.value);
    line
}

fn escape_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Write every metric of the collection, in order.
pub fn write_metrics<W: Write>(metrics: &Metrics, mut writer: W) -> io::Result<()> {
    for metric in metrics {
        writer.write_all(format_metric(metric).as_bytes())?;
    }

    writer.flush()
}
