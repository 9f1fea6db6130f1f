// ============================================================================
// Form Layer - Identifiable Object Data Handling
// ============================================================================
//
// Bridges the admin form layer and the domain commands:
// - FormValue / FormData (untyped field map with coercing accessors)
// - FormDataHandler (create/update contract)
// - CustomerFormDataHandler (customer forms to Add/EditCustomerCommand)
//
// ============================================================================

pub mod form_data;
pub mod handler;

// Re-export for convenience
pub use form_data::{FormData, FormDataError, FormValue};
pub use handler::{CustomerFormDataHandler, FormDataHandler, FormHandlerError};
