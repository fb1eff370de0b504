//! The single access point to the database.

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::procedure::ProcedureCall;
use crate::row::ResultRow;

/// Executes stored-procedure calls against a shared connection source.
///
/// Implementations must be safe to share across concurrent requests. One
/// call is one statement: no retry, no batching, no transaction spanning
/// several calls.
#[async_trait]
pub trait ProcedureGateway: Send + Sync {
    /// Execute `call` and return every row it produced, in database order.
    async fn call(&self, call: &ProcedureCall) -> GatewayResult<Vec<ResultRow>>;

    /// Cheap connectivity check used by readiness checks.
    async fn ping(&self) -> GatewayResult<()>;
}
