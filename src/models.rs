use serde::{Deserialize, Serialize};

use crate::constants::UNNAMED_ACCOUNT;
use crate::error::ValidationError;

/// An account record as returned by the platform
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Platform-assigned identifier, immutable after creation
    #[serde(rename = "accountid")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Read-only, assigned or displayed by the platform
    #[serde(rename = "accountnumber", default)]
    pub account_number: Option<String>,
    #[serde(rename = "emailaddress1", default)]
    pub email: Option<String>,
    #[serde(rename = "telephone1", default)]
    pub phone: Option<String>,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Account {
            id: id.into(),
            name: Some(name.into()),
            account_number: None,
            email: None,
            phone: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_account_number(mut self, number: impl Into<String>) -> Self {
        self.account_number = Some(number.into());
        self
    }

    /// Name for display, falling back when the record has none
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => UNNAMED_ACCOUNT,
        }
    }
}

/// Writable field set sent on create and update
///
/// Absent optional fields are left out of the JSON body entirely, so an
/// update never clears a column it did not mention.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountFields {
    pub name: String,
    #[serde(rename = "emailaddress1", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telephone1", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl AccountFields {
    /// Build fields from raw form input, rejecting a blank name
    pub fn from_input(name: &str, email: &str, phone: &str) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        Ok(AccountFields {
            name: name.to_string(),
            email: non_blank(email),
            phone: non_blank(phone),
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Which write operation a request performs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn verb(&self) -> &'static str {
        match self {
            MutationKind::Create => "create",
            MutationKind::Update => "update",
            MutationKind::Delete => "delete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_from_platform_json() {
        let value = json!({
            "@odata.etag": "W/\"123\"",
            "accountid": "a1",
            "name": "Contoso",
            "telephone1": "555-0100"
        });
        let account: Account = serde_json::from_value(value).unwrap();
        assert_eq!(account.id, "a1");
        assert_eq!(account.name.as_deref(), Some("Contoso"));
        assert_eq!(account.phone.as_deref(), Some("555-0100"));
        assert!(account.email.is_none());
        assert!(account.account_number.is_none());
    }

    #[test]
    fn test_null_columns_are_absent() {
        let value = json!({ "accountid": "a2", "name": null, "emailaddress1": null });
        let account: Account = serde_json::from_value(value).unwrap();
        assert!(account.name.is_none());
        assert!(account.email.is_none());
        assert_eq!(account.display_name(), "Unnamed Account");
    }

    #[test]
    fn test_fields_omit_absent_optionals() {
        let fields = AccountFields::from_input("Acme", "", "").unwrap();
        assert_eq!(serde_json::to_value(&fields).unwrap(), json!({ "name": "Acme" }));
    }

    #[test]
    fn test_fields_keep_present_optionals() {
        let fields = AccountFields::from_input("Acme", "hi@acme.test", "555").unwrap();
        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({ "name": "Acme", "emailaddress1": "hi@acme.test", "telephone1": "555" })
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        assert_eq!(AccountFields::from_input("", "a@b.c", ""), Err(ValidationError::MissingName));
        assert_eq!(AccountFields::from_input("   ", "", ""), Err(ValidationError::MissingName));
    }

    #[test]
    fn test_whitespace_optionals_dropped() {
        let fields = AccountFields::from_input("Acme", "  ", "\t").unwrap();
        assert!(fields.email.is_none());
        assert!(fields.phone.is_none());
    }
}
