//! Stored Procedure Catalogue
//!
//! Every database interaction is a `CALL` to one of the procedures listed
//! here. The statement text is derived from the enum alone, so no request
//! data can ever reach the SQL text; values travel as bound parameters.

use std::fmt;

use crate::error::{GatewayError, GatewayResult};
use crate::identity::{Timestamp, UserId, VocabId};

// ============================================================================
// PROCEDURES
// ============================================================================

/// The closed set of stored procedures the backend invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Procedure {
    AddUser,
    GetUserIdByUserName,
    DeleteUser,
    AddVocabulary,
    GetAllVocabulary,
    GetVocabularyById,
    GetKnownVocabulary,
    GetUnknownVocabulary,
    DeleteVocabulary,
}

impl Procedure {
    pub const ALL: [Procedure; 9] = [
        Procedure::AddUser,
        Procedure::GetUserIdByUserName,
        Procedure::DeleteUser,
        Procedure::AddVocabulary,
        Procedure::GetAllVocabulary,
        Procedure::GetVocabularyById,
        Procedure::GetKnownVocabulary,
        Procedure::GetUnknownVocabulary,
        Procedure::DeleteVocabulary,
    ];

    /// Name of the procedure inside the database.
    pub const fn name(self) -> &'static str {
        match self {
            Procedure::AddUser => "AddUser",
            Procedure::GetUserIdByUserName => "GetUserIdByUserName",
            Procedure::DeleteUser => "DeleteUser",
            Procedure::AddVocabulary => "AddVocabulary",
            Procedure::GetAllVocabulary => "GetAllVocabulary",
            Procedure::GetVocabularyById => "GetVocabularyByID",
            Procedure::GetKnownVocabulary => "GetKnownVocabulary",
            Procedure::GetUnknownVocabulary => "GetUnknownVocabulary",
            Procedure::DeleteVocabulary => "DeleteVocabulary",
        }
    }

    /// Parameter names in positional order.
    pub const fn params(self) -> &'static [&'static str] {
        match self {
            Procedure::AddUser => &["firstName", "lastName", "userName"],
            Procedure::GetUserIdByUserName => &["userName"],
            Procedure::DeleteUser => &["userId"],
            Procedure::AddVocabulary => &["userID", "knownWord", "targetWord"],
            Procedure::GetAllVocabulary
            | Procedure::GetKnownVocabulary
            | Procedure::GetUnknownVocabulary => &["userID"],
            Procedure::GetVocabularyById | Procedure::DeleteVocabulary => &["userID", "vocabID"],
        }
    }

    /// Pick the filtered vocabulary listing for a `Learnt` flag.
    pub const fn for_learnt(learnt: bool) -> Self {
        if learnt {
            Procedure::GetKnownVocabulary
        } else {
            Procedure::GetUnknownVocabulary
        }
    }

    /// Statement text with one positional placeholder per parameter,
    /// e.g. `CALL AddUser(?, ?, ?)`.
    pub fn statement(self) -> String {
        let placeholders = vec!["?"; self.params().len()].join(", ");
        format!("CALL {}({})", self.name(), placeholders)
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// VALUES
// ============================================================================

/// A single SQL value, either bound as a parameter or read from a row.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Int(i64),
    Bool(bool),
    Text(String),
    Timestamp(Timestamp),
}

impl SqlValue {
    /// Short type label used in decode errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            SqlValue::Null => "NULL",
            SqlValue::Int(_) => "integer",
            SqlValue::Bool(_) => "boolean",
            SqlValue::Text(_) => "text",
            SqlValue::Timestamp(_) => "timestamp",
        }
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(i64::from(value))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<UserId> for SqlValue {
    fn from(id: UserId) -> Self {
        SqlValue::from(id.get())
    }
}

impl From<VocabId> for SqlValue {
    fn from(id: VocabId) -> Self {
        SqlValue::from(id.get())
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

// ============================================================================
// CALLS
// ============================================================================

/// A procedure invocation with parameters attached by name.
///
/// ```
/// use wordbank_core::{Procedure, ProcedureCall};
///
/// let call = ProcedureCall::new(Procedure::GetUserIdByUserName).bind("userName", "annlee");
/// assert_eq!(call.statement(), "CALL GetUserIdByUserName(?)");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    procedure: Procedure,
    bindings: Vec<(&'static str, SqlValue)>,
}

impl ProcedureCall {
    pub fn new(procedure: Procedure) -> Self {
        Self {
            procedure,
            bindings: Vec::with_capacity(procedure.params().len()),
        }
    }

    /// Attach a parameter value under its procedure parameter name.
    pub fn bind(mut self, name: &'static str, value: impl Into<SqlValue>) -> Self {
        self.bindings.push((name, value.into()));
        self
    }

    pub fn procedure(&self) -> Procedure {
        self.procedure
    }

    pub fn statement(&self) -> String {
        self.procedure.statement()
    }

    /// Value bound under `name`, if any.
    pub fn param(&self, name: &str) -> Option<&SqlValue> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| value)
    }

    /// Bound values in the procedure's positional order.
    ///
    /// Fails when a parameter is missing, unknown, or bound twice.
    pub fn ordered_params(&self) -> GatewayResult<Vec<&SqlValue>> {
        let expected = self.procedure.params();

        for (index, (name, _)) in self.bindings.iter().enumerate() {
            if !expected.contains(name) {
                return Err(self.binding_error(format!("unknown parameter '{}'", name)));
            }
            if self.bindings[..index].iter().any(|(seen, _)| seen == name) {
                return Err(self.binding_error(format!("parameter '{}' bound twice", name)));
            }
        }

        expected
            .iter()
            .map(|name| {
                self.param(name)
                    .ok_or_else(|| self.binding_error(format!("missing parameter '{}'", name)))
            })
            .collect()
    }

    fn binding_error(&self, reason: String) -> GatewayError {
        GatewayError::Binding {
            procedure: self.procedure.name(),
            reason,
        }
    }
}
