//! Result rows returned by stored procedures.
//!
//! Columns are addressed by name everywhere. MySQL column names are
//! case-insensitive, so lookups are too.

use crate::error::DecodeError;
use crate::procedure::SqlValue;

/// One row of a procedure result set, columns in select order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    columns: Vec<(String, SqlValue)>,
}

/// Types decodable from a single result row.
pub trait FromResultRow: Sized {
    fn from_row(row: &ResultRow) -> Result<Self, DecodeError>;
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style column append.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<SqlValue>) {
        self.columns.push((name.into(), value.into()));
    }

    pub fn value(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(column))
            .map(|(_, value)| value)
    }

    fn require(&self, column: &str) -> Result<&SqlValue, DecodeError> {
        self.value(column).ok_or_else(|| DecodeError::MissingColumn {
            column: column.to_string(),
        })
    }

    /// Value of `column`, or of the only column when the row has exactly one.
    ///
    /// Single-value procedures often select an expression such as
    /// `LAST_INSERT_ID()`, whose generated column name is not stable.
    fn require_scalar(&self, column: &str) -> Result<&SqlValue, DecodeError> {
        match (self.value(column), self.columns.as_slice()) {
            (Some(value), _) => Ok(value),
            (None, [(_, only)]) => Ok(only),
            (None, _) => Err(DecodeError::MissingColumn {
                column: column.to_string(),
            }),
        }
    }

    pub fn get_i64(&self, column: &str) -> Result<i64, DecodeError> {
        as_i64(column, self.require(column)?)
    }

    pub fn get_i32(&self, column: &str) -> Result<i32, DecodeError> {
        narrow_i32(column, self.get_i64(column)?)
    }

    /// Boolean column; MySQL `BOOLEAN` is `TINYINT(1)`, so integers count.
    pub fn get_bool(&self, column: &str) -> Result<bool, DecodeError> {
        match self.require(column)? {
            SqlValue::Bool(value) => Ok(*value),
            SqlValue::Int(value) => Ok(*value != 0),
            other => Err(mismatch(column, "boolean", other)),
        }
    }

    pub fn get_string(&self, column: &str) -> Result<String, DecodeError> {
        as_string(column, self.require(column)?)
    }

    pub fn scalar_i32(&self, column: &str) -> Result<i32, DecodeError> {
        narrow_i32(column, as_i64(column, self.require_scalar(column)?)?)
    }

    pub fn scalar_string(&self, column: &str) -> Result<String, DecodeError> {
        as_string(column, self.require_scalar(column)?)
    }
}

fn as_i64(column: &str, value: &SqlValue) -> Result<i64, DecodeError> {
    match value {
        SqlValue::Int(value) => Ok(*value),
        other => Err(mismatch(column, "integer", other)),
    }
}

fn as_string(column: &str, value: &SqlValue) -> Result<String, DecodeError> {
    match value {
        SqlValue::Text(value) => Ok(value.clone()),
        other => Err(mismatch(column, "text", other)),
    }
}

fn narrow_i32(column: &str, value: i64) -> Result<i32, DecodeError> {
    i32::try_from(value).map_err(|_| DecodeError::OutOfRange {
        column: column.to_string(),
        value,
        target: "i32",
    })
}

fn mismatch(column: &str, expected: &'static str, found: &SqlValue) -> DecodeError {
    DecodeError::TypeMismatch {
        column: column.to_string(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let row = ResultRow::new().with("UserId", 42);
        assert_eq!(row.get_i32("userid"), Ok(42));
    }

    #[test]
    fn test_missing_column() {
        let row = ResultRow::new().with("ID", 1).with("Learnt", true);
        assert_eq!(
            row.get_string("KnownLanguage-Word"),
            Err(DecodeError::MissingColumn {
                column: "KnownLanguage-Word".to_string()
            })
        );
    }

    #[test]
    fn test_bool_accepts_tinyint() {
        let row = ResultRow::new().with("Learnt", 1).with("Other", 0);
        assert_eq!(row.get_bool("Learnt"), Ok(true));
        assert_eq!(row.get_bool("Other"), Ok(false));
    }

    #[test]
    fn test_null_is_a_type_mismatch() {
        let row = ResultRow::new().with("Status", SqlValue::Null);
        assert!(matches!(
            row.get_string("Status"),
            Err(DecodeError::TypeMismatch { found: "NULL", .. })
        ));
    }

    #[test]
    fn test_scalar_falls_back_to_single_column() {
        let row = ResultRow::new().with("LAST_INSERT_ID()", 17);
        assert_eq!(row.scalar_i32("VocabId"), Ok(17));

        let wide = ResultRow::new().with("a", 1).with("b", 2);
        assert!(wide.scalar_i32("VocabId").is_err());
    }

    #[test]
    fn test_i32_overflow_is_reported() {
        let row = ResultRow::new().with("ID", i64::from(i32::MAX) + 1);
        assert!(matches!(
            row.get_i32("ID"),
            Err(DecodeError::OutOfRange { target: "i32", .. })
        ));
    }
}
