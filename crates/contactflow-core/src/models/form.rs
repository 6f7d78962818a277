/// Contact form models shared by the client and the notification endpoint
use chrono::{DateTime, Utc};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Contact form fields, in the order they appear on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Email,
    Phone,
    BusinessType,
    Services,
    Message,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::Phone,
        Field::BusinessType,
        Field::Services,
        Field::Message,
    ];

    /// Human-readable label used in error messages
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::BusinessType => "Business Type",
            Field::Services => "Services",
            Field::Message => "Message",
        }
    }

    /// Message shown when the field's pattern does not match
    pub fn pattern_error_message(self) -> &'static str {
        match self {
            Field::Name => {
                "Please enter a valid name (letters, spaces, hyphens, and apostrophes only)."
            }
            Field::Email => "Please enter a valid email address.",
            Field::Phone => "Please enter a valid phone number.",
            _ => "Please enter a valid value.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Values of a single submission attempt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormFields {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub business_type: String,
    #[serde(deserialize_with = "service_list")]
    pub services: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Anything other than a list of strings counts as no selection
fn service_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Services {
        List(Vec<String>),
        Other(IgnoredAny),
    }

    Ok(match Services::deserialize(deserializer)? {
        Services::List(list) => list,
        Services::Other(_) => Vec::new(),
    })
}

impl FormFields {
    /// Raw value of a field as the validator sees it
    ///
    /// Services are joined into one string so the rule table can treat the
    /// checkbox group like any other field.
    pub fn value(&self, field: Field) -> String {
        match field {
            Field::Name => self.name.clone(),
            Field::Email => self.email.clone(),
            Field::Phone => self.phone.clone(),
            Field::BusinessType => self.business_type.clone(),
            Field::Services => self.services.join(", "),
            Field::Message => self.message.clone(),
        }
    }

    /// Copy with surrounding whitespace removed from every text value
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            business_type: self.business_type.trim().to_string(),
            services: self.services.iter().map(|s| s.trim().to_string()).collect(),
            message: self.message.trim().to_string(),
        }
    }

    /// Services rendered for humans, `None selected` when empty
    pub fn services_summary(&self) -> String {
        if self.services.is_empty() {
            "None selected".to_string()
        } else {
            self.services.join(", ")
        }
    }
}

/// JSON body posted to the notification endpoint
///
/// Every key is optional on the wire; absent keys deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactPayload {
    #[serde(flatten)]
    pub fields: FormFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Hidden field that humans never fill in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub honeypot: Option<String>,
}

impl ContactPayload {
    pub fn new(fields: FormFields, source: impl Into<String>) -> Self {
        Self {
            fields,
            timestamp: Some(Utc::now()),
            source: Some(source.into()),
            honeypot: None,
        }
    }
}

/// Response envelope of the notification endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl NotifyResponse {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
