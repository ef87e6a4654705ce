use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregates computed by the backend; the client only displays them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationStats {
    pub total_registrations: u64,
    pub paid_registrations: u64,
    pub pending_registrations: u64,
    /// Revenue from completed payments, in major units.
    pub total_revenue_inr: Decimal,
}
