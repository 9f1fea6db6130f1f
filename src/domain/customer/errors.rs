// ============================================================================
// Customer Field Constraint Errors
// ============================================================================

/// Raised when a submitted customer field violates its constraints.
///
/// Construction of the customer value objects is the only place these
/// originate; an existing value object always satisfies its constraints.
#[derive(Debug, thiserror::Error)]
pub enum CustomerConstraintError {
    #[error("Customer {field} is too long: {length} characters. Max allowed length is {max}")]
    TooLong {
        field: &'static str,
        length: usize,
        max: usize,
    },

    #[error("Customer {field} {value:?} is invalid")]
    InvalidCharacters {
        field: &'static str,
        value: String,
    },

    #[error("Invalid email format: {0:?}")]
    InvalidEmail(String),
}
