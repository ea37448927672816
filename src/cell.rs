use std::fmt;

use calamine::Data;
use chrono::{NaiveDate, NaiveDateTime};

/// Text of a stringified missing value; older exports leave it in the ID column.
pub const ABSENT_TEXT: &str = "None";

/// Cell value as shown in the report.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Absent,
    Text(String),
    Int(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    Duration(String),
    Bool(bool),
    Error(String),
}

impl CellValue {
    pub fn from_data(cell: Option<&Data>) -> Self {
        match cell {
            None | Some(Data::Empty) => CellValue::Absent,
            Some(Data::String(s)) => CellValue::Text(s.clone()),
            Some(Data::Float(n)) => float_value(*n),
            Some(Data::Int(n)) => CellValue::Int(*n),
            Some(Data::Bool(b)) => CellValue::Bool(*b),
            Some(Data::Error(e)) => CellValue::Error(e.to_string()),
            Some(Data::DateTime(dt)) => match dt.as_datetime() {
                Some(value) => CellValue::DateTime(value),
                None => float_value(dt.as_f64()),
            },
            Some(Data::DateTimeIso(s)) => match parse_iso_datetime(s) {
                Some(value) => CellValue::DateTime(value),
                None => CellValue::Text(s.clone()),
            },
            Some(Data::DurationIso(s)) => CellValue::Duration(s.clone()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Absent => "none",
            CellValue::Text(_) => "text",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::DateTime(_) => "datetime",
            CellValue::Duration(_) => "duration",
            CellValue::Bool(_) => "bool",
            CellValue::Error(_) => "error",
        }
    }

    /// `'<value>' (type: <type>)`, or `None` for an absent cell.
    pub fn describe(&self) -> String {
        if self.is_absent() {
            ABSENT_TEXT.to_string()
        } else {
            format!("'{}' (type: {})", self, self.type_name())
        }
    }

    /// Trimmed identifier text; empty for an absent cell.
    pub fn identifier_text(&self) -> String {
        if self.is_absent() {
            String::new()
        } else {
            self.to_string().trim().to_string()
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Absent => f.write_str(ABSENT_TEXT),
            CellValue::Text(s) | CellValue::Duration(s) | CellValue::Error(s) => f.write_str(s),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(n) => write!(f, "{n}"),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Bool(true) => f.write_str("True"),
            CellValue::Bool(false) => f.write_str("False"),
        }
    }
}

/// Whether a column 1 incident ID is usable: trimmed, it is neither empty nor `None`.
pub fn is_valid_identifier(cell: &CellValue) -> bool {
    let id = cell.to_string();
    let id = id.trim();
    !(id.is_empty() || id == ABSENT_TEXT)
}

// whole-number floats display as ints, like spreadsheet tools show them
fn float_value(n: f64) -> CellValue {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        CellValue::Int(n as i64)
    } else {
        CellValue::Float(n)
    }
}

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
