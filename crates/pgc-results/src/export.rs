//! CSV export of recorded runs.

use crate::types::{TimeseriesRecord, VARIABLES};
use crate::{ResultsError, ResultsResult};
use std::fmt::Write;

/// Two-column CSV of one variable against time.
pub fn series_csv(records: &[TimeseriesRecord], variable: &str) -> ResultsResult<String> {
    if variable != "time_s" && !VARIABLES.contains(&variable) {
        return Err(ResultsError::UnknownVariable {
            name: variable.to_string(),
        });
    }
    let mut csv = format!("time_s,{variable}\n");
    for record in records {
        let value = record.value(variable).unwrap_or(f64::NAN);
        let _ = writeln!(csv, "{},{}", record.time_s, value);
    }
    Ok(csv)
}

/// Every recorded variable, one row per record.
pub fn trace_csv(records: &[TimeseriesRecord]) -> String {
    let mut csv = String::from("time_s");
    for name in VARIABLES {
        csv.push(',');
        csv.push_str(name);
    }
    csv.push_str(",over_temperature\n");

    for record in records {
        let _ = write!(csv, "{}", record.time_s);
        for name in VARIABLES {
            let _ = write!(csv, ",{}", record.value(name).unwrap_or(f64::NAN));
        }
        let _ = writeln!(csv, ",{}", u8::from(record.performance.over_temperature));
    }
    csv
}
