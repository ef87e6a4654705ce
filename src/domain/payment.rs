use super::registration::{Contact, RegistrationId};
use crate::error::{NeuronError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Minor units per major unit (paise per rupee).
const MINOR_UNITS: Decimal = dec!(100);

/// Hackathon fee per team, in major units.
pub const REGISTRATION_FEE_INR: Decimal = dec!(500);

pub const CURRENCY: &str = "INR";
pub const MERCHANT_NAME: &str = "Neuron Club";
pub const ORDER_DESCRIPTION: &str = "Overnight Hackathon Registration";
pub const THEME_COLOR: &str = "#7c3aed";

/// A positive monetary amount expressed in minor units.
///
/// The gateway and the backend both work in minor units; `Decimal` is only
/// used when converting to or from a human-facing figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Amount(u64);

impl TryFrom<u64> for Amount {
    type Error = NeuronError;

    fn try_from(value: u64) -> Result<Self> {
        Self::from_minor(value)
    }
}

impl From<Amount> for u64 {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl Amount {
    pub fn from_minor(value: u64) -> Result<Self> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(NeuronError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    /// Converts a major-unit figure, rejecting fractions of a minor unit.
    pub fn from_major(value: Decimal) -> Result<Self> {
        let minor = value * MINOR_UNITS;
        if minor.fract() != Decimal::ZERO {
            return Err(NeuronError::ValidationError(format!(
                "{value} is not a whole number of minor units"
            )));
        }
        let minor = u64::try_from(minor).map_err(|_| {
            NeuronError::ValidationError(format!("{value} is out of range"))
        })?;
        Self::from_minor(minor)
    }

    /// The fixed registration fee.
    pub fn registration_fee() -> Self {
        // 500 * 100 is a positive whole number
        Self(50_000)
    }

    pub fn minor(&self) -> u64 {
        self.0
    }

    pub fn major(&self) -> Decimal {
        Decimal::from(self.0) / MINOR_UNITS
    }
}

/// Body of `POST /payment/create-order`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentOrderRequest {
    pub amount: Amount,
    pub registration_id: RegistrationId,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl PaymentOrderRequest {
    pub fn new(registration_id: RegistrationId, contact: &Contact) -> Self {
        Self {
            amount: Amount::registration_fee(),
            registration_id,
            full_name: contact.full_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }
}

/// A gateway order created by the backend for one registration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentOrder {
    pub order_id: String,
    pub amount: Amount,
    pub currency: String,
    pub key_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub color: String,
}

/// Everything the checkout widget is opened with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutOptions {
    pub key: String,
    pub amount: Amount,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: Prefill,
    pub theme: Theme,
}

impl CheckoutOptions {
    pub fn new(order: &PaymentOrder, contact: &Contact) -> Self {
        Self {
            key: order.key_id.clone(),
            amount: order.amount,
            currency: order.currency.clone(),
            name: MERCHANT_NAME.to_string(),
            description: ORDER_DESCRIPTION.to_string(),
            order_id: order.order_id.clone(),
            prefill: Prefill {
                name: contact.full_name.clone(),
                email: contact.email.clone(),
                contact: contact.phone.clone(),
            },
            theme: Theme {
                color: THEME_COLOR.to_string(),
            },
        }
    }
}

/// The three fields the gateway hands back when a payment succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentProof {
    #[serde(rename = "razorpay_order_id")]
    pub order_id: String,
    #[serde(rename = "razorpay_payment_id")]
    pub payment_id: String,
    #[serde(rename = "razorpay_signature")]
    pub signature: String,
}

/// Body of `POST /payment/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentVerification {
    #[serde(flatten)]
    pub proof: PaymentProof,
    pub registration_id: RegistrationId,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerificationReceipt {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl VerificationReceipt {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// How the checkout widget was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Paid(PaymentProof),
    Dismissed,
}

/// Where a payment attempt ended, from the participant's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The backend confirmed the payment.
    Completed,
    /// The widget was closed without paying; the registration stays pending.
    Dismissed,
    /// The gateway took the payment but the backend did not confirm it.
    VerificationFailed,
    /// The gateway could not be loaded or no order could be created.
    Unavailable,
}
