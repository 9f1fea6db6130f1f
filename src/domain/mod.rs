// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// This module contains domain-specific value objects, commands and command
// handlers. Each area has its own subdirectory with:
// - Value objects
// - Commands
// - Errors
// - Command handler (where handling is local)
//
// This layer is completely separate from the command bus infrastructure.
//
// ============================================================================

pub mod customer;
pub mod mail_template;

// Future areas can be added here:
// pub mod address;
// pub mod group;
