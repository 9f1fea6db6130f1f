// ============================================================================
// Mail Template Domain - Theme Email Template Generation
// ============================================================================
//
// This module contains ALL mail-template-specific code:
// - Commands (GenerateThemeMailTemplatesCommand)
// - Ports (LanguageRepository, ThemeCatalog, MailTemplateGenerator, Translator)
// - Errors (MailTemplateError)
// - Command Handler (GenerateThemeMailTemplatesCommandHandler)
//
// Template rendering itself happens behind the generator port; this module
// only orchestrates the generation run.
//
// ============================================================================

pub mod command_handler;
pub mod commands;
pub mod errors;
pub mod ports;

// Re-export for convenience
pub use command_handler::*;
pub use commands::*;
pub use errors::*;
pub use ports::*;
