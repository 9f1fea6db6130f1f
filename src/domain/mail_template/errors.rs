// ============================================================================
// Mail Template Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum MailTemplateError {
    /// The requested locale has no installed language
    #[error("Could not find Language for locale: {0}")]
    LanguageNotFound(String),

    /// Failure raised by the theme catalog or the template generator,
    /// passed through unchanged
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}
