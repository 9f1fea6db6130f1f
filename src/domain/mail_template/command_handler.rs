use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::command_bus::CommandHandler;
use crate::config::MailTemplateFolders;

use super::commands::GenerateThemeMailTemplatesCommand;
use super::errors::MailTemplateError;
use super::ports::{
    ArrayLoader, LanguageRepository, MailTemplateGenerator, ThemeCatalog, Translator,
};

// ============================================================================
// Mail Template Generation Command Handler
// ============================================================================
//
// Orchestrates: locale → Language → Theme → translator cache reset →
// output folder resolution → generator
//
// Language resolution is a hard precondition: an unknown locale aborts the
// command before the theme catalog or the generator are touched.
//
// ============================================================================

pub struct GenerateThemeMailTemplatesCommandHandler {
    language_repository: Arc<dyn LanguageRepository>,
    theme_catalog: Arc<dyn ThemeCatalog>,
    generator: Arc<dyn MailTemplateGenerator>,
    translator: Arc<dyn Translator>,
    default_folders: MailTemplateFolders,
}

impl GenerateThemeMailTemplatesCommandHandler {
    pub fn new(
        language_repository: Arc<dyn LanguageRepository>,
        theme_catalog: Arc<dyn ThemeCatalog>,
        generator: Arc<dyn MailTemplateGenerator>,
        translator: Arc<dyn Translator>,
        default_folders: MailTemplateFolders,
    ) -> Self {
        Self {
            language_repository,
            theme_catalog,
            generator,
            translator,
            default_folders,
        }
    }

    pub async fn handle(
        &self,
        command: &GenerateThemeMailTemplatesCommand,
    ) -> Result<(), MailTemplateError> {
        let language = self
            .language_repository
            .get_one_by_locale_or_iso_code(&command.language)
            .await?
            .ok_or_else(|| MailTemplateError::LanguageNotFound(command.language.clone()))?;

        let theme = self.theme_catalog.get_by_name(&command.theme_name).await?;

        self.clean_translator_locale_cache(&command.language);

        let core_mails_folder = effective_folder(
            command.core_mails_folder.as_deref(),
            &self.default_folders.core_mails_folder,
        );
        let modules_mail_folder = effective_folder(
            command.modules_mail_folder.as_deref(),
            &self.default_folders.modules_mail_folder,
        );

        tracing::info!(
            theme = %theme.name,
            locale = %language.locale,
            core_mails_folder = %core_mails_folder,
            modules_mail_folder = %modules_mail_folder,
            overwrite = command.overwrite,
            "Generating mail templates"
        );

        self.generator
            .generate_templates(
                &theme,
                &language,
                core_mails_folder,
                modules_mail_folder,
                command.overwrite,
            )
            .await?;

        Ok(())
    }

    /// Force the translator to rebuild its catalogue for the locale.
    ///
    /// A translator booted before the language existed has already cached
    /// the fallback catalogue; registering a fresh resource for the locale
    /// is the only way to make it reload.
    fn clean_translator_locale_cache(&self, locale: &str) {
        self.translator.add_loader("array", Box::new(ArrayLoader));

        let mut messages = HashMap::new();
        messages.insert(
            "Fake clean cache message".to_string(),
            "Fake clean cache message".to_string(),
        );
        self.translator.add_resource("array", messages, locale);
    }
}

/// Command folder when present and non-empty, configured default otherwise
fn effective_folder<'a>(requested: Option<&'a str>, default: &'a str) -> &'a str {
    match requested {
        Some(folder) if !folder.is_empty() => folder,
        _ => default,
    }
}

#[async_trait]
impl CommandHandler<GenerateThemeMailTemplatesCommand> for GenerateThemeMailTemplatesCommandHandler {
    async fn handle(&self, command: GenerateThemeMailTemplatesCommand) -> anyhow::Result<()> {
        GenerateThemeMailTemplatesCommandHandler::handle(self, &command).await?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
