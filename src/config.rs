use serde::{Deserialize, Serialize};

// ============================================================================
// Shop Configuration
// ============================================================================
//
// Immutable settings injected at construction time. Nothing in this crate
// reads ambient state; the wiring layer decides these values once.
//
// ============================================================================

/// Shop scope a customer form submission applies to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopContext {
    /// Shop every created customer is attached to
    pub shop_id: u64,
    /// Whether B2B fields are collected and forwarded on creation
    pub is_b2b_feature_enabled: bool,
}

/// Default output folders for generated mail templates, used when a
/// generation command does not carry its own
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailTemplateFolders {
    pub core_mails_folder: String,
    pub modules_mail_folder: String,
}
