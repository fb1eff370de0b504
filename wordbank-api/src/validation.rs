//! Validation Traits
//!
//! Common validation patterns shared by the route handlers. Failures are
//! reported as core [`ValidationError`]s so each handler can choose its own
//! client-facing message.

use wordbank_core::{UserId, ValidationError, VocabId};

/// Trait for validating non-blank strings.
///
/// # Example
/// ```
/// use wordbank_api::validation::ValidateNonEmpty;
///
/// assert!("annlee".validate_non_empty("UserName").is_ok());
/// assert!("  \t".validate_non_empty("UserName").is_err());
/// ```
pub trait ValidateNonEmpty {
    /// Validate that the value is non-empty.
    ///
    /// # Errors
    /// Returns `ValidationError::Blank` if the value is empty or whitespace-only.
    fn validate_non_empty(&self, field_name: &str) -> Result<(), ValidationError>;
}

impl ValidateNonEmpty for str {
    fn validate_non_empty(&self, field_name: &str) -> Result<(), ValidationError> {
        if self.trim().is_empty() {
            return Err(ValidationError::blank(field_name));
        }
        Ok(())
    }
}

impl ValidateNonEmpty for String {
    fn validate_non_empty(&self, field_name: &str) -> Result<(), ValidationError> {
        self.as_str().validate_non_empty(field_name)
    }
}

impl<T: ValidateNonEmpty> ValidateNonEmpty for Option<T> {
    fn validate_non_empty(&self, field_name: &str) -> Result<(), ValidationError> {
        match self {
            Some(value) => value.validate_non_empty(field_name),
            None => Err(ValidationError::blank(field_name)),
        }
    }
}

/// Trait for validating that an identifier is positive.
pub trait ValidatePositive {
    fn validate_positive(&self, field_name: &str) -> Result<(), ValidationError>;
}

macro_rules! impl_validate_positive {
    ($($t:ty),*) => {
        $(
            impl ValidatePositive for $t {
                fn validate_positive(&self, field_name: &str) -> Result<(), ValidationError> {
                    if *self <= 0 {
                        return Err(ValidationError::not_positive(field_name, i64::from(*self)));
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_validate_positive!(i32, i64);

impl ValidatePositive for UserId {
    fn validate_positive(&self, field_name: &str) -> Result<(), ValidationError> {
        self.get().validate_positive(field_name)
    }
}

impl ValidatePositive for VocabId {
    fn validate_positive(&self, field_name: &str) -> Result<(), ValidationError> {
        self.get().validate_positive(field_name)
    }
}
