//! Request and response bodies for the REST API.
//!
//! Field names follow the wire format the clients already use: PascalCase
//! request keys (camelCase accepted too) and the response keys listed on
//! each type. Text fields are optional so that a missing or `null` field
//! fails validation with the endpoint's message instead of a parser error.

use serde::{Deserialize, Serialize};
use wordbank_core::{UserId, ValidationError, VocabId};

use crate::validation::{ValidateNonEmpty, ValidatePositive};

pub use wordbank_core::VocabEntry;

// ============================================================================
// USER
// ============================================================================

/// Body of `POST /api/user`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddUserRequest {
    #[serde(rename = "FirstName", alias = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "LastName", alias = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(rename = "UserName", alias = "userName", default)]
    pub user_name: Option<String>,
}

impl AddUserRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.first_name.validate_non_empty("FirstName")?;
        self.last_name.validate_non_empty("LastName")?;
        self.user_name.validate_non_empty("UserName")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddUserResponse {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdResponse {
    #[serde(rename = "UserId")]
    pub user_id: UserId,
}

// ============================================================================
// VOCABULARY
// ============================================================================

/// Body of `POST /api/vocab`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddVocabRequest {
    #[serde(rename = "UserID", alias = "userID", alias = "userId", default)]
    pub user_id: i32,
    #[serde(rename = "KnownWord", alias = "knownWord", default)]
    pub known_word: Option<String>,
    #[serde(rename = "TargetWord", alias = "targetWord", default)]
    pub target_word: Option<String>,
}

impl AddVocabRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.user_id.validate_positive("UserID")?;
        self.known_word.validate_non_empty("KnownWord")?;
        self.target_word.validate_non_empty("TargetWord")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddVocabResponse {
    pub message: String,
    #[serde(rename = "vocabId")]
    pub vocab_id: VocabId,
}

// ============================================================================
// SHARED
// ============================================================================

/// Plain confirmation body, e.g. the status string of a delete procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
