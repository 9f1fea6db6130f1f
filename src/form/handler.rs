use std::sync::Arc;

use async_trait::async_trait;

use crate::command_bus::{CommandBus, CommandBusError};
use crate::config::ShopContext;
use crate::domain::customer::{
    AddCustomerCommand, CustomerConstraintError, CustomerId, CustomerRegistration,
    EditCustomerCommand, Email, FirstName, LastName,
};

use super::form_data::{FormData, FormDataError};

// ============================================================================
// Customer Form Data Handler
// ============================================================================
//
// Saves or updates customer data submitted in the admin form. The handler
// turns the untyped field map into the matching command and dispatches it
// over the bus; the returned id is unwrapped for the form layer.
//
// Creation hands the command raw strings and lets it validate them; updates
// build the value objects here, so constraint violations surface before
// anything is dispatched. B2B fields are only collected on creation when
// the feature is enabled, while updates always carry them.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum FormHandlerError {
    #[error(transparent)]
    FormData(#[from] FormDataError),

    #[error(transparent)]
    Constraint(#[from] CustomerConstraintError),

    #[error(transparent)]
    Dispatch(#[from] CommandBusError),
}

/// Persists form submissions for one identifiable object type
#[async_trait]
pub trait FormDataHandler: Send + Sync {
    /// Create an object from submitted data, returning the new id
    async fn create(&self, data: &FormData) -> Result<u64, FormHandlerError>;

    /// Update an existing object with submitted data, returning its id
    async fn update(&self, id: u64, data: &FormData) -> Result<u64, FormHandlerError>;
}

pub struct CustomerFormDataHandler<B: CommandBus> {
    bus: Arc<B>,
    context: ShopContext,
}

impl<B: CommandBus> CustomerFormDataHandler<B> {
    pub fn new(bus: Arc<B>, context: ShopContext) -> Self {
        Self { bus, context }
    }

    fn build_add_command(&self, data: &FormData) -> Result<AddCustomerCommand, FormHandlerError> {
        let registration = CustomerRegistration {
            first_name: data.text("first_name")?,
            last_name: data.text("last_name")?,
            email: data.text("email")?,
            password: data.opt_text("password")?,
            default_group_id: data.integer("default_group_id")?,
            group_ids: data.integers("group_ids")?,
            shop_id: self.context.shop_id,
            gender_id: data.integer("gender_id")?,
            is_enabled: data.boolean("is_enabled")?,
            is_partner_offers_subscribed: data.boolean("is_partner_offers_subscribed")?,
        };

        let command = AddCustomerCommand::new(registration)?;

        if !self.context.is_b2b_feature_enabled {
            return Ok(command);
        }

        Ok(command
            .with_company_name(data.opt_text("company_name")?)
            .with_siret_code(data.opt_text("siret_code")?)
            .with_ape_code(data.opt_text("ape_code")?)
            .with_website(data.opt_text("website")?)
            .with_allowed_outstanding_amount(data.opt_number("allowed_outstanding_amount")?)
            .with_max_payment_days(data.opt_integer("max_payment_days")?)
            .with_risk_id(data.opt_integer("risk_id")?))
    }

    fn build_edit_command(
        &self,
        customer_id: u64,
        data: &FormData,
    ) -> Result<EditCustomerCommand, FormHandlerError> {
        let mut command = EditCustomerCommand::new(CustomerId::new(customer_id))
            .with_email(Email::new(data.text("email")?)?)
            .with_first_name(FirstName::new(data.text("first_name")?)?)
            .with_last_name(LastName::new(data.text("last_name")?)?)
            .with_is_enabled(data.boolean("is_enabled")?)
            .with_is_partner_offers_subscribed(data.boolean("is_partner_offers_subscribed")?)
            .with_default_group_id(data.integer("default_group_id")?)
            .with_company_name(data.opt_text("company_name")?.unwrap_or_default())
            .with_siret_code(data.opt_text("siret_code")?.unwrap_or_default())
            .with_ape_code(data.opt_text("ape_code")?.unwrap_or_default())
            .with_website(data.opt_text("website")?.unwrap_or_default())
            .with_allowed_outstanding_amount(data.opt_number("allowed_outstanding_amount")?)
            .with_max_payment_days(data.opt_integer("max_payment_days")?)
            .with_risk_id(data.opt_integer("risk_id")?);

        if let Some(group_ids) = data.opt_integers("group_ids")? {
            command = command.with_group_ids(group_ids);
        }

        if let Some(gender_id) = data.opt_integer("gender_id")? {
            command = command.with_gender_id(gender_id);
        }

        if let Some(birthday) = data.opt_date("birthday")? {
            command = command.with_birthday(birthday);
        }

        Ok(command)
    }
}

#[async_trait]
impl<B: CommandBus> FormDataHandler for CustomerFormDataHandler<B> {
    async fn create(&self, data: &FormData) -> Result<u64, FormHandlerError> {
        let command = self.build_add_command(data)?;

        tracing::debug!(
            shop_id = command.shop_id,
            b2b = self.context.is_b2b_feature_enabled,
            "Dispatching customer creation"
        );

        let customer_id = self.bus.handle(command).await?;
        Ok(customer_id.value())
    }

    async fn update(&self, id: u64, data: &FormData) -> Result<u64, FormHandlerError> {
        let command = self.build_edit_command(id, data)?;

        tracing::debug!(customer_id = id, "Dispatching customer update");

        let customer_id = self.bus.handle(command).await?;
        Ok(customer_id.value())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command_bus::{CommandHandler, InMemoryCommandBus};
    use crate::form::form_data::FormValue;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        added: Mutex<Option<AddCustomerCommand>>,
        edited: Mutex<Option<EditCustomerCommand>>,
    }

    #[async_trait]
    impl CommandHandler<AddCustomerCommand> for RecordingHandler {
        async fn handle(&self, command: AddCustomerCommand) -> anyhow::Result<CustomerId> {
            *self.added.lock().unwrap() = Some(command);
            Ok(CustomerId::new(77))
        }
    }

    #[async_trait]
    impl CommandHandler<EditCustomerCommand> for RecordingHandler {
        async fn handle(&self, command: EditCustomerCommand) -> anyhow::Result<CustomerId> {
            *self.edited.lock().unwrap() = Some(command);
            Ok(CustomerId::new(77))
        }
    }

    fn create_test_handler(
        b2b_enabled: bool,
    ) -> (
        Arc<RecordingHandler>,
        CustomerFormDataHandler<InMemoryCommandBus>,
    ) {
        let recorder = Arc::new(RecordingHandler::default());
        let bus = InMemoryCommandBus::new()
            .register::<AddCustomerCommand, _>(recorder.clone())
            .register::<EditCustomerCommand, _>(recorder.clone());
        let context = ShopContext {
            shop_id: 1,
            is_b2b_feature_enabled: b2b_enabled,
        };

        (recorder, CustomerFormDataHandler::new(Arc::new(bus), context))
    }

    fn create_form() -> FormData {
        FormData::new()
            .set("first_name", "Marie")
            .set("last_name", "Curie")
            .set("email", "marie.curie@example.com")
            .set("password", "secret")
            .set("default_group_id", "3")
            .set("group_ids", vec!["3", "4"])
            .set("gender_id", 2u64)
            .set("is_enabled", "1")
            .set("is_partner_offers_subscribed", "0")
    }

    fn with_b2b_fields(form: FormData) -> FormData {
        form.set("company_name", "Acme")
            .set("siret_code", "11122233344455")
            .set("ape_code", FormValue::Null)
            .set("website", FormValue::Null)
            .set("allowed_outstanding_amount", "250.5")
            .set("max_payment_days", 60u64)
            .set("risk_id", FormValue::Null)
    }

    fn update_form() -> FormData {
        with_b2b_fields(create_form())
            .set("company_name", FormValue::Null)
            .set("group_ids", FormValue::Null)
            .set("gender_id", 2u64)
            .set("birthday", NaiveDate::from_ymd_opt(1990, 4, 15).unwrap())
            .set("max_payment_days", 30u64)
    }

    #[tokio::test]
    async fn test_create_coerces_fields_and_injects_shop_id() {
        let (recorder, handler) = create_test_handler(false);

        let id = handler.create(&with_b2b_fields(create_form())).await.unwrap();
        assert_eq!(id, 77);

        let command = recorder.added.lock().unwrap().take().unwrap();
        assert_eq!(command.first_name.value(), "Marie");
        assert_eq!(command.last_name.value(), "Curie");
        assert_eq!(command.email.value(), "marie.curie@example.com");
        assert_eq!(command.password.as_deref(), Some("secret"));
        assert_eq!(command.default_group_id, 3);
        assert_eq!(command.group_ids, vec![3, 4]);
        assert_eq!(command.shop_id, 1);
        assert_eq!(command.gender_id, 2);
        assert!(command.is_enabled);
        assert!(!command.is_partner_offers_subscribed);
    }

    #[tokio::test]
    async fn test_create_without_b2b_ignores_submitted_b2b_fields() {
        let (recorder, handler) = create_test_handler(false);

        handler.create(&with_b2b_fields(create_form())).await.unwrap();

        let command = recorder.added.lock().unwrap().take().unwrap();
        assert!(command.company_name.is_none());
        assert!(command.siret_code.is_none());
        assert!(command.allowed_outstanding_amount.is_none());
        assert!(command.max_payment_days.is_none());
        assert!(command.risk_id.is_none());
    }

    #[tokio::test]
    async fn test_create_with_b2b_carries_submitted_fields() {
        let (recorder, handler) = create_test_handler(true);

        handler.create(&with_b2b_fields(create_form())).await.unwrap();

        let command = recorder.added.lock().unwrap().take().unwrap();
        assert_eq!(command.company_name.as_deref(), Some("Acme"));
        assert_eq!(command.siret_code.as_deref(), Some("11122233344455"));
        assert_eq!(command.ape_code, None);
        assert_eq!(command.website, None);
        assert_eq!(command.allowed_outstanding_amount, Some(250.5));
        assert_eq!(command.max_payment_days, Some(60));
        assert_eq!(command.risk_id, None);
    }

    #[tokio::test]
    async fn test_create_with_b2b_requires_every_b2b_key() {
        let (recorder, handler) = create_test_handler(true);

        // Everything except the B2B block is present
        let result = handler.create(&create_form()).await;

        assert!(matches!(
            result,
            Err(FormHandlerError::FormData(FormDataError::MissingField(field))) if field == "company_name"
        ));
        assert!(recorder.added.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_first_name_before_dispatch() {
        let (recorder, handler) = create_test_handler(false);

        let form = create_form().set("first_name", "Marie3");
        let result = handler.create(&form).await;

        assert!(matches!(
            result,
            Err(FormHandlerError::Constraint(
                CustomerConstraintError::InvalidCharacters { .. }
            ))
        ));
        assert!(recorder.added.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_builds_command_keyed_by_id() {
        let (recorder, handler) = create_test_handler(true);

        let id = handler.update(42, &update_form()).await.unwrap();
        assert_eq!(id, 77);

        let command = recorder.edited.lock().unwrap().take().unwrap();
        assert_eq!(command.customer_id.value(), 42);
        assert_eq!(command.email.as_ref().map(|e| e.value()), Some("marie.curie@example.com"));
        assert_eq!(command.first_name.as_ref().map(|n| n.value()), Some("Marie"));
        assert_eq!(command.last_name.as_ref().map(|n| n.value()), Some("Curie"));
        assert_eq!(command.is_enabled, Some(true));
        assert_eq!(command.is_partner_offers_subscribed, Some(false));
        assert_eq!(command.default_group_id, Some(3));
    }

    #[tokio::test]
    async fn test_update_substitutes_empty_string_for_null_text_fields() {
        let (recorder, handler) = create_test_handler(true);

        handler.update(42, &update_form()).await.unwrap();

        let command = recorder.edited.lock().unwrap().take().unwrap();
        assert_eq!(command.company_name.as_deref(), Some(""));
        assert_eq!(command.siret_code.as_deref(), Some("11122233344455"));
        assert_eq!(command.ape_code.as_deref(), Some(""));
        assert_eq!(command.website.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_update_attaches_optional_fields_only_when_present() {
        let (recorder, handler) = create_test_handler(true);

        handler.update(42, &update_form()).await.unwrap();

        let command = recorder.edited.lock().unwrap().take().unwrap();
        // Null group_ids stay unset, present gender and birthday attach
        assert_eq!(command.group_ids, None);
        assert_eq!(command.gender_id, Some(2));
        assert_eq!(
            command.birthday,
            Some(NaiveDate::from_ymd_opt(1990, 4, 15).unwrap())
        );
        assert_eq!(command.allowed_outstanding_amount, Some(250.5));
        assert_eq!(command.max_payment_days, Some(30));
        assert_eq!(command.risk_id, None);
    }

    #[tokio::test]
    async fn test_update_skips_birthday_submitted_as_text() {
        let (recorder, handler) = create_test_handler(true);

        let form = update_form().set("birthday", "1990-04-15");
        handler.update(42, &form).await.unwrap();

        let command = recorder.edited.lock().unwrap().take().unwrap();
        assert_eq!(command.birthday, None);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_email_before_dispatch() {
        let (recorder, handler) = create_test_handler(true);

        let form = update_form().set("email", "not-an-email");
        let result = handler.update(42, &form).await;

        assert!(matches!(
            result,
            Err(FormHandlerError::Constraint(CustomerConstraintError::InvalidEmail(_)))
        ));
        assert!(recorder.edited.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_dispatch_failures_surface_as_dispatch_errors() {
        // No handler registered for the edit command
        let recorder = Arc::new(RecordingHandler::default());
        let bus = InMemoryCommandBus::new().register::<AddCustomerCommand, _>(recorder);
        let handler = CustomerFormDataHandler::new(
            Arc::new(bus),
            ShopContext {
                shop_id: 1,
                is_b2b_feature_enabled: true,
            },
        );

        let result = handler.update(42, &update_form()).await;
        assert!(matches!(
            result,
            Err(FormHandlerError::Dispatch(CommandBusError::NoHandler(_)))
        ));
    }
}
