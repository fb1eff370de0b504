//! Wordbank Test Utilities
//!
//! Centralized test infrastructure for the Wordbank workspace:
//! - A stub procedure gateway that records calls and replays scripted results
//! - Row fixtures matching the procedures' result-set contracts
//! - Proptest generators for request fields and ids

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

// Re-export core types for convenience
pub use wordbank_core::{
    GatewayError, GatewayResult, Procedure, ProcedureCall, ProcedureGateway, ResultRow,
    SqlValue, UserId, VocabEntry, VocabId, COL_ID, COL_KNOWN_WORD, COL_LEARNT, COL_STATUS,
    COL_TARGET_WORD, COL_USER_ID, COL_VOCAB_ID,
};

// ============================================================================
// STUB GATEWAY
// ============================================================================

#[derive(Debug, Clone)]
enum Scripted {
    Rows(Vec<ResultRow>),
    Fail(String),
}

#[derive(Debug, Default)]
struct StubState {
    responses: HashMap<Procedure, Scripted>,
    fallback: Option<Scripted>,
    ping_failure: Option<String>,
    calls: Vec<ProcedureCall>,
}

/// In-memory [`ProcedureGateway`] for handler tests.
///
/// Procedures without a scripted response return no rows. Every call is
/// recorded, including calls that fail, so tests can assert that validation
/// short-circuits before the database is contacted.
#[derive(Debug, Clone, Default)]
pub struct StubGateway {
    state: Arc<Mutex<StubState>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stub that fails every procedure call with a driver-style message.
    pub fn failing(message: impl Into<String>) -> Self {
        let stub = Self::new();
        stub.lock().fallback = Some(Scripted::Fail(message.into()));
        stub
    }

    /// Script the rows `procedure` returns.
    pub fn with_rows(self, procedure: Procedure, rows: Vec<ResultRow>) -> Self {
        self.lock().responses.insert(procedure, Scripted::Rows(rows));
        self
    }

    /// Script a driver failure for `procedure`.
    pub fn with_failure(self, procedure: Procedure, message: impl Into<String>) -> Self {
        self.lock()
            .responses
            .insert(procedure, Scripted::Fail(message.into()));
        self
    }

    /// Make readiness pings fail.
    pub fn with_ping_failure(self, message: impl Into<String>) -> Self {
        self.lock().ping_failure = Some(message.into());
        self
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<ProcedureCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    pub fn procedures_called(&self) -> Vec<Procedure> {
        self.lock().calls.iter().map(ProcedureCall::procedure).collect()
    }

    pub fn last_call(&self) -> Option<ProcedureCall> {
        self.lock().calls.last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(|err| err.into_inner())
    }
}

#[async_trait]
impl ProcedureGateway for StubGateway {
    async fn call(&self, call: &ProcedureCall) -> GatewayResult<Vec<ResultRow>> {
        let mut state = self.lock();
        state.calls.push(call.clone());

        // Surface signature mistakes the same way the real gateway does.
        call.ordered_params()?;

        let scripted = state
            .responses
            .get(&call.procedure())
            .or(state.fallback.as_ref())
            .cloned();

        match scripted {
            Some(Scripted::Rows(rows)) => Ok(rows),
            Some(Scripted::Fail(message)) => Err(GatewayError::database(message)),
            None => Ok(Vec::new()),
        }
    }

    async fn ping(&self) -> GatewayResult<()> {
        match &self.lock().ping_failure {
            Some(message) => Err(GatewayError::database(message.clone())),
            None => Ok(()),
        }
    }
}

// ============================================================================
// ROW FIXTURES
// ============================================================================

pub fn user_id_row(user_id: i32) -> ResultRow {
    ResultRow::new().with(COL_USER_ID, user_id)
}

pub fn vocab_id_row(vocab_id: i32) -> ResultRow {
    ResultRow::new().with(COL_VOCAB_ID, vocab_id)
}

pub fn status_row(status: &str) -> ResultRow {
    ResultRow::new().with(COL_STATUS, status)
}

/// A vocabulary row as the listing procedures return it, `Learnt` as TINYINT.
pub fn vocab_row(id: i32, known_word: &str, target_word: &str, learnt: bool) -> ResultRow {
    ResultRow::new()
        .with(COL_ID, id)
        .with(COL_KNOWN_WORD, known_word)
        .with(COL_TARGET_WORD, target_word)
        .with(COL_LEARNT, i32::from(learnt))
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    use proptest::prelude::*;

    use super::{vocab_row, ResultRow};

    /// Empty or whitespace-only strings.
    pub fn blank_string() -> impl Strategy<Value = String> {
        "[ \t\r\n]{0,8}"
    }

    /// Strings with at least one visible character, possibly padded.
    pub fn word() -> impl Strategy<Value = String> {
        "[ ]{0,2}[a-zA-Z\u{e4}\u{f6}\u{fc}\u{df}]{1,12}[ ]{0,2}"
    }

    pub fn positive_id() -> impl Strategy<Value = i32> {
        1..=i32::MAX
    }

    pub fn non_positive_id() -> impl Strategy<Value = i32> {
        i32::MIN..=0
    }

    /// Up to `max` vocabulary rows with distinct ids.
    pub fn vocab_rows(max: usize) -> impl Strategy<Value = Vec<ResultRow>> {
        prop::collection::vec(("[a-z]{1,10}", "[a-z]{1,10}", any::<bool>()), 0..=max).prop_map(
            |fields| {
                fields
                    .into_iter()
                    .enumerate()
                    .map(|(index, (known, target, learnt))| {
                        vocab_row(index as i32 + 1, &known, &target, learnt)
                    })
                    .collect()
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_records_calls_and_replays_rows() {
        let stub = StubGateway::new().with_rows(Procedure::AddUser, vec![user_id_row(42)]);
        let call = ProcedureCall::new(Procedure::AddUser)
            .bind("firstName", "Ann")
            .bind("lastName", "Lee")
            .bind("userName", "annlee");

        let rows = stub.call(&call).await.unwrap();
        assert_eq!(rows, vec![user_id_row(42)]);
        assert_eq!(stub.procedures_called(), vec![Procedure::AddUser]);
    }

    #[tokio::test]
    async fn test_unscripted_procedure_returns_no_rows() {
        let stub = StubGateway::new();
        let call = ProcedureCall::new(Procedure::DeleteUser).bind("userId", 1);
        assert!(stub.call(&call).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failing_stub_reports_database_error() {
        let stub = StubGateway::failing("Lost connection to MySQL server");
        let call = ProcedureCall::new(Procedure::GetAllVocabulary).bind("userID", 1);
        assert_eq!(
            stub.call(&call).await,
            Err(GatewayError::database("Lost connection to MySQL server"))
        );
        assert_eq!(stub.call_count(), 1);
    }

    #[tokio::test]
    async fn test_bad_binding_is_rejected() {
        let stub = StubGateway::new();
        let call = ProcedureCall::new(Procedure::DeleteUser);
        assert!(matches!(
            stub.call(&call).await,
            Err(GatewayError::Binding { .. })
        ));
    }
}
