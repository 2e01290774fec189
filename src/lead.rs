//! Static lead contact fields and the lead submission payload

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::form::{is_valid_email, ValueTree};

/// Upper bound on name and email lengths, in characters
pub const MAX_CONTACT_LENGTH: usize = 200;

/// Minimum first name length after trimming
pub const MIN_FIRST_NAME_LENGTH: usize = 3;

/// Contact details collected next to the dynamic fields
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadContact {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email_id: String,
}

/// A problem with one contact field. `Display` is the user-facing message.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ContactIssue {
    #[error("First name must be at least 3 characters.")]
    FirstNameTooShort,

    #[error("First name cannot exceed 200 characters.")]
    FirstNameTooLong,

    #[error("Last name cannot exceed 200 characters.")]
    LastNameTooLong,

    #[error("Phone number is required.")]
    PhoneRequired,

    #[error("Please enter a valid email.")]
    InvalidEmail,

    #[error("Email cannot exceed 200 characters.")]
    EmailTooLong,
}

impl Serialize for ContactIssue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// At most one issue per contact field
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<ContactIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<ContactIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<ContactIssue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_id: Option<ContactIssue>,
}

impl LeadErrors {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone_number.is_none()
            && self.email_id.is_none()
    }
}

impl LeadContact {
    pub fn validate(&self) -> LeadErrors {
        let first_name = if self.first_name.trim().chars().count() < MIN_FIRST_NAME_LENGTH {
            Some(ContactIssue::FirstNameTooShort)
        } else if self.first_name.chars().count() > MAX_CONTACT_LENGTH {
            Some(ContactIssue::FirstNameTooLong)
        } else {
            None
        };

        let last_name = (self.last_name.chars().count() > MAX_CONTACT_LENGTH)
            .then_some(ContactIssue::LastNameTooLong);

        let phone_number = self
            .phone_number
            .trim()
            .is_empty()
            .then_some(ContactIssue::PhoneRequired);

        // length wins over shape when both fail
        let email_id = if self.email_id.is_empty() {
            None
        } else if self.email_id.chars().count() > MAX_CONTACT_LENGTH {
            Some(ContactIssue::EmailTooLong)
        } else if !is_valid_email(&self.email_id) {
            Some(ContactIssue::InvalidEmail)
        } else {
            None
        };

        LeadErrors {
            first_name,
            last_name,
            phone_number,
            email_id,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Submission Payload
// ============================================================================

/// Consumer block of the lead payload. Blank optional fields are omitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmLeadConsumer {
    pub first_name: String,
    pub country_code: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Wire payload submitted for a captured lead
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    pub channel_enc_uid: String,
    pub crm_lead_consumer: CrmLeadConsumer,
    pub template_schema_value: ValueTree,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl LeadSubmission {
    pub fn new(
        channel_enc_uid: impl Into<String>,
        contact: &LeadContact,
        country_code: impl Into<String>,
        values: ValueTree,
    ) -> Self {
        Self {
            channel_enc_uid: channel_enc_uid.into(),
            crm_lead_consumer: CrmLeadConsumer {
                first_name: contact.first_name.trim().to_string(),
                country_code: country_code.into(),
                phone: contact.phone_number.trim().to_string(),
                last_name: non_blank(&contact.last_name),
                email: non_blank(&contact.email_id),
            },
            template_schema_value: values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contact() -> LeadContact {
        LeadContact {
            first_name: "Asha".into(),
            last_name: String::new(),
            phone_number: "9876543210".into(),
            email_id: String::new(),
        }
    }

    #[test]
    fn test_valid_contact() {
        assert!(contact().is_valid());
    }

    #[test]
    fn test_first_name_rules() {
        let mut c = contact();
        c.first_name = "  Al  ".into();
        assert_eq!(c.validate().first_name, Some(ContactIssue::FirstNameTooShort));

        c.first_name = "x".repeat(201);
        assert_eq!(c.validate().first_name, Some(ContactIssue::FirstNameTooLong));

        c.first_name = "x".repeat(200);
        assert_eq!(c.validate().first_name, None);
    }

    #[test]
    fn test_phone_and_last_name() {
        let mut c = contact();
        c.phone_number = "   ".into();
        c.last_name = "y".repeat(201);
        let errors = c.validate();
        assert_eq!(errors.phone_number, Some(ContactIssue::PhoneRequired));
        assert_eq!(errors.last_name, Some(ContactIssue::LastNameTooLong));
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_email_rules() {
        let mut c = contact();
        c.email_id = "asha@example".into();
        assert_eq!(c.validate().email_id, Some(ContactIssue::InvalidEmail));

        c.email_id = format!("{}@example.com", "a".repeat(200));
        assert_eq!(c.validate().email_id, Some(ContactIssue::EmailTooLong));

        c.email_id = "asha@example.com".into();
        assert!(c.is_valid());
    }

    #[test]
    fn test_errors_serialize_as_messages() {
        let mut c = contact();
        c.phone_number.clear();
        let value = serde_json::to_value(c.validate()).unwrap();
        assert_eq!(value, json!({ "phoneNumber": "Phone number is required." }));
    }

    #[test]
    fn test_submission_payload() {
        let mut c = contact();
        c.email_id = " asha@example.com ".into();
        let values: ValueTree = serde_json::from_value(json!({ "city": "Pune" })).unwrap();

        let payload = LeadSubmission::new("ch-43c0036-4t", &c, "+91", values);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "channelEncUid": "ch-43c0036-4t",
                "crmLeadConsumer": {
                    "firstName": "Asha",
                    "countryCode": "+91",
                    "phone": "9876543210",
                    "email": "asha@example.com"
                },
                "templateSchemaValue": { "city": "Pune" }
            })
        );
    }
}
