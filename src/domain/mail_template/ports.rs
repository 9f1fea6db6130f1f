use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================================================
// Mail Template Ports
// ============================================================================
//
// Contracts to the surrounding platform: language lookup, theme lookup,
// template generation and the translator. Implementations live outside this
// crate; tests drive the handler with recording stubs.
//
// ============================================================================

/// Installed shop language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub id: u64,
    pub locale: String,
    pub iso_code: String,
}

/// Mail template theme known to the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
}

#[async_trait]
pub trait LanguageRepository: Send + Sync {
    /// Find a language by IETF locale ("en-US") or ISO 639-1 code ("en")
    async fn get_one_by_locale_or_iso_code(&self, code: &str) -> anyhow::Result<Option<Language>>;
}

#[async_trait]
pub trait ThemeCatalog: Send + Sync {
    async fn get_by_name(&self, name: &str) -> anyhow::Result<Theme>;
}

/// Renders the full template set of a theme into the output folders
#[async_trait]
pub trait MailTemplateGenerator: Send + Sync {
    async fn generate_templates(
        &self,
        theme: &Theme,
        language: &Language,
        core_mails_folder: &str,
        modules_mail_folder: &str,
        overwrite: bool,
    ) -> anyhow::Result<()>;
}

/// Marker for translation resource loaders registered with the translator
pub trait TranslationLoader: Send + Sync {}

/// Loads translation catalogues from in-memory message maps
pub struct ArrayLoader;

impl TranslationLoader for ArrayLoader {}

/// Message catalogue surface of the platform translator
pub trait Translator: Send + Sync {
    /// Register a loader under a resource kind ("array", "xlf", ...)
    fn add_loader(&self, kind: &str, loader: Box<dyn TranslationLoader>);

    /// Add a message resource for a locale under a registered kind
    fn add_resource(&self, kind: &str, messages: HashMap<String, String>, locale: &str);
}
