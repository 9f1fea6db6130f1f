// ============================================================================
// shop_admin_core - Domain Layer of the Shop Administration Backend
// ============================================================================
//
// Customer field validation, customer create/update commands built from raw
// form submissions, and theme mail template generation, all dispatched over
// a typed command bus.
//
// Layout:
// - command_bus/  Generic dispatch infrastructure
// - config.rs     Injected settings (shop context, template folders)
// - domain/       Customer and mail template business logic
// - form/         Untyped form data and the customer form handler
// - utils/        Text normalization helpers
//
// ============================================================================

pub mod command_bus;
pub mod config;
pub mod domain;
pub mod form;
pub mod utils;
