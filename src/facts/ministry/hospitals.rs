use crate::facts::html::body_rows;
use crate::facts::numeric::parse_count;
use crate::facts::{Extraction, ParseError, RawStat, RawStats};

/// Hospital occupancy per province plus the national total.
#[derive(Debug, Clone, Default)]
pub struct HospitalStats {
    pub provinces: RawStats,

    /// The table's final row.
    pub total: RawStat,
}

/// The hospitalization table: province, hospitalized, intensive care; the last row is the total.
#[derive(Debug, Clone, Copy, Default)]
pub struct HospitalTable;

impl Extraction for HospitalTable {
    type Output = HospitalStats;

    fn extract(&self, document: &str) -> Result<Self::Output, ParseError> {
        let mut rows = body_rows(document);
        let total = rows.pop().ok_or(ParseError::NoMatches("hospitalization rows"))?;

        let mut provinces = RawStats::new();
        for row in &rows {
            let stat = hospital_stat(row)?;
            let entry = provinces.entry(&stat.location_key);
            entry.hospitalized = stat.hospitalized;
            entry.intensive_care = stat.intensive_care;
        }

        Ok(HospitalStats {
            provinces,
            total: hospital_stat(&total)?,
        })
    }
}

fn hospital_stat(row: &[String]) -> Result<RawStat, ParseError> {
    let [province, hospitalized, intensive_care, ..] = row else {
        return Err(ParseError::Layout(format!(
            "expected at least 3 cells in a hospitalization row, found {}",
            row.len()
        )));
    };

    Ok(RawStat {
        hospitalized: parse_count(hospitalized),
        intensive_care: parse_count(intensive_care),
        ..RawStat::new(province.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r"
        <table>
          <thead><tr><th>Bundesland</th><th>Hospitalisierung</th><th>Intensivstation</th></tr></thead>
          <tbody>
            <tr><td>Burgenland</td><td>10</td><td>2</td></tr>
            <tr><td>Wien</td><td>1.012</td><td>87</td></tr>
            <tr><td>Österreich gesamt</td><td>1.022</td><td>89</td></tr>
          </tbody>
        </table>";

    #[test]
    fn test_rows_and_total() {
        let stats = HospitalTable.extract(TABLE).unwrap();

        assert_eq!(stats.provinces.len(), 2);
        let wien = stats.provinces.get("Wien").unwrap();
        assert_eq!(wien.hospitalized, 1012);
        assert_eq!(wien.intensive_care, 87);
        assert_eq!(wien.infected, 0);

        assert_eq!(stats.total.hospitalized, 1022);
        assert_eq!(stats.total.intensive_care, 89);
    }

    #[test]
    fn test_no_rows() {
        let err = HospitalTable.extract("<html></html>").unwrap_err();
        assert!(matches!(err, ParseError::NoMatches(_)));
    }

    #[test]
    fn test_short_row_is_layout_error() {
        let html = "<table><tbody><tr><td>Wien</td><td>12</td></tr><tr><td>Total</td><td>12</td><td>1</td></tr></tbody></table>";
        let err = HospitalTable.extract(html).unwrap_err();
        assert!(matches!(err, ParseError::Layout(_)));
    }
}
