use serde::{Deserialize, Serialize};

use crate::core::Cents;

/// Breakdown of one booking payment, all in cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentCalculation {
    pub subtotal: Cents,
    pub platform_fee: Cents,
    pub stripe_fee: Cents,
    /// What the customer is charged; equal to the subtotal
    pub total: Cents,
    /// Payout after both fees. Negative for under-priced bookings, never clamped.
    pub tenant_receives: Cents,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_amount: Option<Cents>,
}

impl PaymentCalculation {
    pub fn is_underpriced(&self) -> bool {
        self.tenant_receives < 0
    }
}
