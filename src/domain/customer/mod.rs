// ============================================================================
// Customer Domain - Field Constraints and Commands
// ============================================================================
//
// This module contains ALL Customer-specific code:
// - Value objects (CustomerId, FirstName, LastName, Email)
// - Commands (AddCustomerCommand, EditCustomerCommand)
// - Errors (CustomerConstraintError enum)
//
// Persistence lives behind the command bus; whatever handler is registered
// there receives these commands.
//
// ============================================================================

pub mod commands;
pub mod errors;
pub mod value_objects;

// Re-export for convenience
pub use commands::*;
pub use errors::*;
pub use value_objects::*;
