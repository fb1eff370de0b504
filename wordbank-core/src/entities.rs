//! Row shapes returned by the vocabulary procedures.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::identity::VocabId;
use crate::row::{FromResultRow, ResultRow};

// Column names of the result sets.
pub const COL_ID: &str = "ID";
pub const COL_KNOWN_WORD: &str = "KnownLanguage-Word";
pub const COL_TARGET_WORD: &str = "TargetLanguage-Word";
pub const COL_LEARNT: &str = "Learnt";
pub const COL_USER_ID: &str = "UserId";
pub const COL_VOCAB_ID: &str = "VocabId";
pub const COL_STATUS: &str = "Status";

/// A vocabulary row as exposed over HTTP.
///
/// `CreatedDate`, `LastPracticed` and `NextPractice` may come back from the
/// procedures as extra columns; they are owned by the database and ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabEntry {
    #[serde(rename = "ID")]
    pub id: VocabId,
    #[serde(rename = "KnownWord")]
    pub known_word: String,
    #[serde(rename = "TargetWord")]
    pub target_word: String,
    #[serde(rename = "Learnt")]
    pub learnt: bool,
}

impl FromResultRow for VocabEntry {
    fn from_row(row: &ResultRow) -> Result<Self, DecodeError> {
        Ok(Self {
            id: VocabId::new(row.get_i32(COL_ID)?),
            known_word: row.get_string(COL_KNOWN_WORD)?,
            target_word: row.get_string(COL_TARGET_WORD)?,
            learnt: row.get_bool(COL_LEARNT)?,
        })
    }
}
