use crate::command_bus::Command;

// ============================================================================
// Mail Template Commands
// ============================================================================

/// Generate the full mail template set of a theme for one language.
///
/// When no output folders are attached, the handler falls back to its
/// configured defaults.
#[derive(Debug, Clone)]
pub struct GenerateThemeMailTemplatesCommand {
    /// Locale or ISO code identifying the target language
    pub language: String,
    pub theme_name: String,
    /// Overwrite templates already present in the output folders
    pub overwrite: bool,
    pub core_mails_folder: Option<String>,
    pub modules_mail_folder: Option<String>,
}

impl GenerateThemeMailTemplatesCommand {
    pub fn new(
        language: impl Into<String>,
        theme_name: impl Into<String>,
        overwrite: bool,
    ) -> Self {
        Self {
            language: language.into(),
            theme_name: theme_name.into(),
            overwrite,
            core_mails_folder: None,
            modules_mail_folder: None,
        }
    }

    pub fn with_core_mails_folder(mut self, folder: impl Into<String>) -> Self {
        self.core_mails_folder = Some(folder.into());
        self
    }

    pub fn with_modules_mail_folder(mut self, folder: impl Into<String>) -> Self {
        self.modules_mail_folder = Some(folder.into());
        self
    }
}

impl Command for GenerateThemeMailTemplatesCommand {
    type Output = ();
}
