use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use shop_admin_core::command_bus::{CommandBus, CommandHandler, InMemoryCommandBus};
use shop_admin_core::config::{MailTemplateFolders, ShopContext};
use shop_admin_core::domain::customer::{AddCustomerCommand, CustomerId, EditCustomerCommand};
use shop_admin_core::domain::mail_template::{
    GenerateThemeMailTemplatesCommand, GenerateThemeMailTemplatesCommandHandler, Language,
    LanguageRepository, MailTemplateGenerator, Theme, ThemeCatalog, TranslationLoader, Translator,
};
use shop_admin_core::form::{CustomerFormDataHandler, FormData, FormDataHandler, FormValue};

// ============================================================================
// Demo Wiring
// ============================================================================
//
// Runs the crate end to end with in-memory collaborators: a counter-backed
// customer store, a fixed language table and a generator that only logs.
// Production deployments register their own implementations on the bus.
//
// ============================================================================

/// Counter-backed stand-in for the customer persistence handlers
struct InMemoryCustomerStore {
    next_id: AtomicU64,
}

impl InMemoryCustomerStore {
    fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
        }
    }
}

#[async_trait]
impl CommandHandler<AddCustomerCommand> for InMemoryCustomerStore {
    async fn handle(&self, command: AddCustomerCommand) -> anyhow::Result<CustomerId> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        tracing::info!(
            customer_id = id,
            email = %command.email.value(),
            shop_id = command.shop_id,
            company = command.company_name.as_deref().unwrap_or("-"),
            "Stored new customer"
        );
        Ok(CustomerId::new(id))
    }
}

#[async_trait]
impl CommandHandler<EditCustomerCommand> for InMemoryCustomerStore {
    async fn handle(&self, command: EditCustomerCommand) -> anyhow::Result<CustomerId> {
        tracing::info!(
            customer_id = command.customer_id.value(),
            birthday = ?command.birthday,
            "Updated customer"
        );
        Ok(command.customer_id)
    }
}

struct StaticLanguageRepository;

#[async_trait]
impl LanguageRepository for StaticLanguageRepository {
    async fn get_one_by_locale_or_iso_code(&self, code: &str) -> anyhow::Result<Option<Language>> {
        let language = match code {
            "en-US" | "en" => Some(Language {
                id: 1,
                locale: "en-US".to_string(),
                iso_code: "en".to_string(),
            }),
            "fr-FR" | "fr" => Some(Language {
                id: 2,
                locale: "fr-FR".to_string(),
                iso_code: "fr".to_string(),
            }),
            _ => None,
        };
        Ok(language)
    }
}

struct StaticThemeCatalog;

#[async_trait]
impl ThemeCatalog for StaticThemeCatalog {
    async fn get_by_name(&self, name: &str) -> anyhow::Result<Theme> {
        Ok(Theme {
            name: name.to_string(),
        })
    }
}

struct LoggingGenerator;

#[async_trait]
impl MailTemplateGenerator for LoggingGenerator {
    async fn generate_templates(
        &self,
        theme: &Theme,
        language: &Language,
        core_mails_folder: &str,
        modules_mail_folder: &str,
        overwrite: bool,
    ) -> anyhow::Result<()> {
        tracing::info!(
            theme = %theme.name,
            iso_code = %language.iso_code,
            core_mails_folder = %core_mails_folder,
            modules_mail_folder = %modules_mail_folder,
            overwrite = overwrite,
            "Rendered mail template set"
        );
        Ok(())
    }
}

struct LoggingTranslator;

impl Translator for LoggingTranslator {
    fn add_loader(&self, kind: &str, _loader: Box<dyn TranslationLoader>) {
        tracing::debug!(kind = kind, "Registered translation loader");
    }

    fn add_resource(&self, kind: &str, messages: HashMap<String, String>, locale: &str) {
        tracing::debug!(
            kind = kind,
            locale = locale,
            message_count = messages.len(),
            "Added translation resource"
        );
    }
}

fn demo_create_submission() -> FormData {
    FormData::new()
        .set("first_name", "Marie")
        .set("last_name", "Curie")
        .set("email", "marie.curie@example.com")
        .set("password", "s3cret!")
        .set("default_group_id", "3")
        .set("group_ids", vec!["3", "4"])
        .set("gender_id", "2")
        .set("is_enabled", "1")
        .set("is_partner_offers_subscribed", "0")
        .set("company_name", "Curie Labs")
        .set("siret_code", "11122233344455")
        .set("ape_code", FormValue::Null)
        .set("website", FormValue::Null)
        .set("allowed_outstanding_amount", "1500")
        .set("max_payment_days", "30")
        .set("risk_id", FormValue::Null)
}

fn demo_update_submission() -> FormData {
    demo_create_submission()
        .set("company_name", FormValue::Null)
        .set("group_ids", FormValue::Null)
        .set("birthday", NaiveDate::from_ymd_opt(1867, 11, 7).expect("valid date"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,shop_admin_core=debug")),
        )
        .init();

    tracing::info!("🚀 Starting shop administration demo");

    // === 1. Wire the command bus ===
    let store = Arc::new(InMemoryCustomerStore::new());
    let template_handler = Arc::new(GenerateThemeMailTemplatesCommandHandler::new(
        Arc::new(StaticLanguageRepository),
        Arc::new(StaticThemeCatalog),
        Arc::new(LoggingGenerator),
        Arc::new(LoggingTranslator),
        MailTemplateFolders {
            core_mails_folder: "/shop/mails".to_string(),
            modules_mail_folder: "/shop/modules/mails".to_string(),
        },
    ));

    let bus = Arc::new(
        InMemoryCommandBus::new()
            .register::<AddCustomerCommand, _>(store.clone())
            .register::<EditCustomerCommand, _>(store)
            .register::<GenerateThemeMailTemplatesCommand, _>(template_handler),
    );

    // === 2. Create a customer from submitted form data ===
    let form_handler = CustomerFormDataHandler::new(
        bus.clone(),
        ShopContext {
            shop_id: 1,
            is_b2b_feature_enabled: true,
        },
    );

    let customer_id = form_handler.create(&demo_create_submission()).await?;
    tracing::info!("✅ Customer created: {}", customer_id);

    // === 3. Update the customer from a second submission ===
    form_handler
        .update(customer_id, &demo_update_submission())
        .await?;
    tracing::info!("✅ Customer updated: {}", customer_id);

    // === 4. Constraint violations surface before anything is dispatched ===
    let invalid = demo_create_submission().set("first_name", "J4ne");
    if let Err(e) = form_handler.create(&invalid).await {
        tracing::warn!("🚫 Rejected invalid submission: {}", e);
    }

    // === 5. Generate mail templates through the bus ===
    bus.handle(
        GenerateThemeMailTemplatesCommand::new("fr-FR", "modern", true)
            .with_core_mails_folder("/tmp/shop-mails"),
    )
    .await?;
    tracing::info!("✅ Mail templates generated for fr-FR");

    // Unknown locale aborts before the generator runs
    if let Err(e) = bus
        .handle(GenerateThemeMailTemplatesCommand::new("xx-XX", "modern", false))
        .await
    {
        tracing::warn!("🚫 Generation refused: {}", e);
    }

    tracing::info!("🎉 Demo complete!");

    Ok(())
}
