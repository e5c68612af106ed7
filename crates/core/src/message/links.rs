//! Payment link URL formatting.

use rust_decimal::Decimal;

use crate::billing::round_cents;

/// Payment providers a person can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentProvider {
    /// PayPal, via paypal.me.
    Paypal,
    /// Square, via Cash App cashtags.
    Square,
}

impl PaymentProvider {
    /// Fully-qualified payment URL embedding the account handle and amount.
    #[must_use]
    pub fn link(self, handle: &str, amount: Decimal) -> String {
        let amount = round_cents(amount);
        match self {
            Self::Paypal => format!("https://www.paypal.me/{handle}/{amount:.2}"),
            Self::Square => format!("https://cash.app/${handle}/{amount:.2}"),
        }
    }
}
