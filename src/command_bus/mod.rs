// ============================================================================
// Command Bus - Typed Command Dispatch Infrastructure
// ============================================================================
//
// Generic, reusable dispatch layer. Domain-specific commands and handlers
// live in src/domain/ and src/form/; this module only knows how to route a
// command to whatever handler was registered for its type.
//
// ============================================================================

pub mod bus;
pub mod in_memory;

pub use bus::{Command, CommandBus, CommandBusError, CommandHandler};
pub use in_memory::InMemoryCommandBus;
