use chrono::NaiveDate;

use crate::command_bus::Command;

use super::errors::CustomerConstraintError;
use super::value_objects::{CustomerId, Email, FirstName, LastName};

// ============================================================================
// Customer Commands
// ============================================================================
//
// Commands dispatched over the command bus to create or update a customer.
//
// AddCustomerCommand validates the submitted names and email while it is
// built; the form layer hands it raw strings. EditCustomerCommand starts
// with every field unset and only carries what the caller attaches, so an
// update never touches fields the form left out.
//
// ============================================================================

/// Raw registration fields as submitted by the form layer
#[derive(Debug, Clone)]
pub struct CustomerRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Option<String>,
    pub default_group_id: u64,
    pub group_ids: Vec<u64>,
    pub shop_id: u64,
    pub gender_id: u64,
    pub is_enabled: bool,
    pub is_partner_offers_subscribed: bool,
}

/// Create a new customer record
#[derive(Debug, Clone)]
pub struct AddCustomerCommand {
    pub first_name: FirstName,
    pub last_name: LastName,
    pub email: Email,
    pub password: Option<String>,
    pub default_group_id: u64,
    pub group_ids: Vec<u64>,
    pub shop_id: u64,
    pub gender_id: u64,
    pub is_enabled: bool,
    pub is_partner_offers_subscribed: bool,

    // B2B fields, attached only when the feature is enabled
    pub company_name: Option<String>,
    pub siret_code: Option<String>,
    pub ape_code: Option<String>,
    pub website: Option<String>,
    pub allowed_outstanding_amount: Option<f64>,
    pub max_payment_days: Option<u64>,
    pub risk_id: Option<u64>,
}

impl AddCustomerCommand {
    /// Build the command from raw registration input.
    ///
    /// First name, last name and email are validated here; the first
    /// constraint violation aborts construction.
    pub fn new(registration: CustomerRegistration) -> Result<Self, CustomerConstraintError> {
        Ok(Self {
            first_name: FirstName::new(registration.first_name)?,
            last_name: LastName::new(registration.last_name)?,
            email: Email::new(registration.email)?,
            password: registration.password,
            default_group_id: registration.default_group_id,
            group_ids: registration.group_ids,
            shop_id: registration.shop_id,
            gender_id: registration.gender_id,
            is_enabled: registration.is_enabled,
            is_partner_offers_subscribed: registration.is_partner_offers_subscribed,
            company_name: None,
            siret_code: None,
            ape_code: None,
            website: None,
            allowed_outstanding_amount: None,
            max_payment_days: None,
            risk_id: None,
        })
    }

    pub fn with_company_name(mut self, company_name: Option<String>) -> Self {
        self.company_name = company_name;
        self
    }

    pub fn with_siret_code(mut self, siret_code: Option<String>) -> Self {
        self.siret_code = siret_code;
        self
    }

    pub fn with_ape_code(mut self, ape_code: Option<String>) -> Self {
        self.ape_code = ape_code;
        self
    }

    pub fn with_website(mut self, website: Option<String>) -> Self {
        self.website = website;
        self
    }

    pub fn with_allowed_outstanding_amount(mut self, amount: Option<f64>) -> Self {
        self.allowed_outstanding_amount = amount;
        self
    }

    pub fn with_max_payment_days(mut self, days: Option<u64>) -> Self {
        self.max_payment_days = days;
        self
    }

    pub fn with_risk_id(mut self, risk_id: Option<u64>) -> Self {
        self.risk_id = risk_id;
        self
    }
}

impl Command for AddCustomerCommand {
    type Output = CustomerId;
}

/// Update an existing customer record.
///
/// Every field except the id is optional; unset fields are left untouched
/// by the receiving handler.
#[derive(Debug, Clone)]
pub struct EditCustomerCommand {
    pub customer_id: CustomerId,
    pub email: Option<Email>,
    pub first_name: Option<FirstName>,
    pub last_name: Option<LastName>,
    pub is_enabled: Option<bool>,
    pub is_partner_offers_subscribed: Option<bool>,
    pub default_group_id: Option<u64>,
    pub group_ids: Option<Vec<u64>>,
    pub gender_id: Option<u64>,
    pub birthday: Option<NaiveDate>,
    pub company_name: Option<String>,
    pub siret_code: Option<String>,
    pub ape_code: Option<String>,
    pub website: Option<String>,
    pub allowed_outstanding_amount: Option<f64>,
    pub max_payment_days: Option<u64>,
    pub risk_id: Option<u64>,
}

impl EditCustomerCommand {
    pub fn new(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            email: None,
            first_name: None,
            last_name: None,
            is_enabled: None,
            is_partner_offers_subscribed: None,
            default_group_id: None,
            group_ids: None,
            gender_id: None,
            birthday: None,
            company_name: None,
            siret_code: None,
            ape_code: None,
            website: None,
            allowed_outstanding_amount: None,
            max_payment_days: None,
            risk_id: None,
        }
    }

    pub fn with_email(mut self, email: Email) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_first_name(mut self, first_name: FirstName) -> Self {
        self.first_name = Some(first_name);
        self
    }

    pub fn with_last_name(mut self, last_name: LastName) -> Self {
        self.last_name = Some(last_name);
        self
    }

    pub fn with_is_enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = Some(is_enabled);
        self
    }

    pub fn with_is_partner_offers_subscribed(mut self, subscribed: bool) -> Self {
        self.is_partner_offers_subscribed = Some(subscribed);
        self
    }

    pub fn with_default_group_id(mut self, default_group_id: u64) -> Self {
        self.default_group_id = Some(default_group_id);
        self
    }

    pub fn with_group_ids(mut self, group_ids: Vec<u64>) -> Self {
        self.group_ids = Some(group_ids);
        self
    }

    pub fn with_gender_id(mut self, gender_id: u64) -> Self {
        self.gender_id = Some(gender_id);
        self
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    pub fn with_company_name(mut self, company_name: String) -> Self {
        self.company_name = Some(company_name);
        self
    }

    pub fn with_siret_code(mut self, siret_code: String) -> Self {
        self.siret_code = Some(siret_code);
        self
    }

    pub fn with_ape_code(mut self, ape_code: String) -> Self {
        self.ape_code = Some(ape_code);
        self
    }

    pub fn with_website(mut self, website: String) -> Self {
        self.website = Some(website);
        self
    }

    pub fn with_allowed_outstanding_amount(mut self, amount: Option<f64>) -> Self {
        self.allowed_outstanding_amount = amount;
        self
    }

    pub fn with_max_payment_days(mut self, days: Option<u64>) -> Self {
        self.max_payment_days = days;
        self
    }

    pub fn with_risk_id(mut self, risk_id: Option<u64>) -> Self {
        self.risk_id = risk_id;
        self
    }
}

impl Command for EditCustomerCommand {
    type Output = CustomerId;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_registration() -> CustomerRegistration {
        CustomerRegistration {
            first_name: "Marie".to_string(),
            last_name: "Curie".to_string(),
            email: "marie.curie@example.com".to_string(),
            password: Some("secret".to_string()),
            default_group_id: 3,
            group_ids: vec![3, 4],
            shop_id: 1,
            gender_id: 2,
            is_enabled: true,
            is_partner_offers_subscribed: false,
        }
    }

    #[test]
    fn test_add_command_validates_fields_on_construction() {
        let command = AddCustomerCommand::new(create_test_registration()).unwrap();

        assert_eq!(command.first_name.value(), "Marie");
        assert_eq!(command.last_name.value(), "Curie");
        assert_eq!(command.email.value(), "marie.curie@example.com");
        assert_eq!(command.group_ids, vec![3, 4]);
        assert!(command.is_enabled);
    }

    #[test]
    fn test_add_command_rejects_invalid_first_name() {
        let mut registration = create_test_registration();
        registration.first_name = "Marie3".to_string();

        let result = AddCustomerCommand::new(registration);
        assert!(matches!(
            result,
            Err(CustomerConstraintError::InvalidCharacters { field: "first name", .. })
        ));
    }

    #[test]
    fn test_add_command_rejects_invalid_email() {
        let mut registration = create_test_registration();
        registration.email = "not-an-email".to_string();

        let result = AddCustomerCommand::new(registration);
        assert!(matches!(result, Err(CustomerConstraintError::InvalidEmail(_))));
    }

    #[test]
    fn test_add_command_starts_without_b2b_fields() {
        let command = AddCustomerCommand::new(create_test_registration()).unwrap();

        assert!(command.company_name.is_none());
        assert!(command.siret_code.is_none());
        assert!(command.ape_code.is_none());
        assert!(command.website.is_none());
        assert!(command.allowed_outstanding_amount.is_none());
        assert!(command.max_payment_days.is_none());
        assert!(command.risk_id.is_none());
    }

    #[test]
    fn test_add_command_attaches_b2b_fields() {
        let command = AddCustomerCommand::new(create_test_registration())
            .unwrap()
            .with_company_name(Some("Acme".to_string()))
            .with_siret_code(Some("11122233344455".to_string()))
            .with_allowed_outstanding_amount(Some(150.5))
            .with_max_payment_days(Some(30))
            .with_risk_id(Some(2));

        assert_eq!(command.company_name.as_deref(), Some("Acme"));
        assert_eq!(command.siret_code.as_deref(), Some("11122233344455"));
        assert_eq!(command.allowed_outstanding_amount, Some(150.5));
        assert_eq!(command.max_payment_days, Some(30));
        assert_eq!(command.risk_id, Some(2));
    }

    #[test]
    fn test_edit_command_starts_with_everything_unset() {
        let command = EditCustomerCommand::new(CustomerId::new(42));

        assert_eq!(command.customer_id.value(), 42);
        assert!(command.email.is_none());
        assert!(command.first_name.is_none());
        assert!(command.group_ids.is_none());
        assert!(command.birthday.is_none());
        assert!(command.max_payment_days.is_none());
    }

    #[test]
    fn test_edit_command_attaches_only_what_is_set() {
        let command = EditCustomerCommand::new(CustomerId::new(42))
            .with_first_name(FirstName::new("Pierre").unwrap())
            .with_default_group_id(5)
            .with_birthday(NaiveDate::from_ymd_opt(1990, 4, 15).unwrap());

        assert_eq!(command.first_name.as_ref().map(|n| n.value()), Some("Pierre"));
        assert_eq!(command.default_group_id, Some(5));
        assert_eq!(
            command.birthday,
            Some(NaiveDate::from_ymd_opt(1990, 4, 15).unwrap())
        );
        assert!(command.last_name.is_none());
        assert!(command.gender_id.is_none());
    }
}
