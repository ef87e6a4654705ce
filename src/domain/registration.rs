use crate::error::{NeuronError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned registration identifier.
///
/// Opaque to the client: it is only ever echoed back to the backend and shown
/// to the participant, never parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(String);

impl RegistrationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => f.write_str("pending"),
            PaymentStatus::Completed => f.write_str("completed"),
        }
    }
}

/// The participant-facing registration form.
///
/// `honeypot` is a hidden field humans leave empty. It is posted exactly as
/// entered; deciding what a filled honeypot means belongs to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    #[serde(serialize_with = "serialize_optional_text")]
    pub team_name: String,
    pub honeypot: String,
}

fn serialize_optional_text<S>(value: &str, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_some(value)
    }
}

impl RegistrationForm {
    /// Names of required fields that are still empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("full_name", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("college", &self.college),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Checks that every required field is filled in.
    ///
    /// No format validation happens here; the backend owns that.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(NeuronError::ValidationError(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Contact details used to prefill the payment widget.
    pub fn contact(&self) -> Contact {
        Contact {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// What the client keeps from a successful `POST /registrations`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegistrationReceipt {
    pub registration_id: RegistrationId,
}

/// A registration record as listed on the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(default)]
    pub id: String,
    pub registration_id: RegistrationId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    /// Charged amount in minor units, once an order exists.
    #[serde(default)]
    pub amount: Option<u64>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// RFC 3339 timestamps, or naive ones which are taken to be UTC.
fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
}
