//! Wordbank Core - Data Types and Procedure Catalogue
//!
//! Pure data structures shared by the API layer and the test utilities.
//! Nothing in this crate performs I/O: the database is reached only through
//! the [`ProcedureGateway`] trait, implemented elsewhere.

pub mod entities;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod procedure;
pub mod row;

pub use entities::{
    VocabEntry, COL_ID, COL_KNOWN_WORD, COL_LEARNT, COL_STATUS, COL_TARGET_WORD, COL_USER_ID,
    COL_VOCAB_ID,
};
pub use error::{DecodeError, GatewayError, GatewayResult, ValidationError};
pub use gateway::ProcedureGateway;
pub use identity::{Timestamp, UserId, VocabId};
pub use procedure::{Procedure, ProcedureCall, SqlValue};
pub use row::{FromResultRow, ResultRow};
