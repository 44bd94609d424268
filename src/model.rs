//! Normalized per-call value objects.
//!
//! Every type here lives for a single gateway call: callers build the
//! values, hand them to one operation, and discard them when the call
//! resolves. The adapter itself persists nothing; in particular, the
//! profile id returned by `create_customer_profile` must be attached to
//! the caller's own [`Prospect`] between calls.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{GatewayError, Result};

/// Monetary amount accepted either as a numeric value or numeric text.
///
/// Mirrors the two input forms the gateway contract allows: a number is
/// formatted directly, text is parsed first. Malformed text surfaces as
/// [`GatewayError::InvalidAmount`], never as a silent zero amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Amount {
    /// Amount already carried as a fixed-point decimal.
    Value(Decimal),
    /// Amount given as numeric text, parsed at formatting time.
    Text(String),
}

impl Amount {
    /// Formats the amount as a decimal string with exactly two fraction
    /// digits, rounding half away from zero.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidAmount`] for text that does not
    /// parse as a decimal number, and for negative amounts.
    pub fn format_total(&self) -> Result<String> {
        let value = match self {
            Self::Value(value) => *value,
            Self::Text(text) => text
                .trim()
                .parse::<Decimal>()
                .map_err(|_| GatewayError::InvalidAmount(text.clone()))?,
        };
        if value.is_sign_negative() && !value.is_zero() {
            return Err(GatewayError::InvalidAmount(value.to_string()));
        }
        let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        Ok(rounded.to_string())
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::Value(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::Value(Decimal::from(value))
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl TryFrom<f64> for Amount {
    type Error = GatewayError;

    fn try_from(value: f64) -> Result<Self> {
        Decimal::from_f64(value)
            .map(Self::Value)
            .ok_or_else(|| GatewayError::InvalidAmount(value.to_string()))
    }
}

/// Order to charge: an amount and an optional ISO 4217 currency code.
///
/// The currency defaults to `USD` at request-shaping time when absent.
#[derive(Debug, Clone)]
pub struct Order {
    /// Amount to charge.
    pub amount: Amount,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
}

impl Order {
    /// Creates an order without an explicit currency.
    pub fn new(amount: impl Into<Amount>) -> Self {
        Self { amount: amount.into(), currency: None }
    }

    /// Sets the currency code.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

/// Credit card used as the payment instrument.
///
/// Card data is wiped from memory on drop and redacted from `Debug`
/// output; it is never logged by this crate.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct CreditCard {
    /// Primary account number.
    pub number: String,
    /// Expiration month, as the caller received it (e.g. `"08"`).
    pub expiration_month: String,
    /// Expiration year, as the caller received it (e.g. `"2030"`).
    pub expiration_year: String,
    /// Card verification value.
    pub cvv: String,
    /// Cardholder name; overrides the prospect's billing name when set.
    pub card_holder: Option<String>,
}

impl CreditCard {
    /// Sets the primary account number.
    #[must_use]
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    /// Sets the expiration month.
    #[must_use]
    pub fn with_expiration_month(mut self, month: impl Into<String>) -> Self {
        self.expiration_month = month.into();
        self
    }

    /// Sets the expiration year.
    #[must_use]
    pub fn with_expiration_year(mut self, year: impl Into<String>) -> Self {
        self.expiration_year = year.into();
        self
    }

    /// Sets the card verification value.
    #[must_use]
    pub fn with_cvv(mut self, cvv: impl Into<String>) -> Self {
        self.cvv = cvv.into();
        self
    }

    /// Sets the cardholder name.
    #[must_use]
    pub fn with_card_holder(mut self, name: impl Into<String>) -> Self {
        self.card_holder = Some(name.into());
        self
    }
}

impl std::fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last_four: String = self
            .number
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        let masked = format!("****{last_four}");
        f.debug_struct("CreditCard")
            .field("number", &masked)
            .field("expiration_month", &self.expiration_month)
            .field("expiration_year", &self.expiration_year)
            .field("cvv", &"***")
            .field("card_holder", &self.card_holder)
            .finish()
    }
}

/// Billing and shipping contact for a payment.
///
/// All fields are optional; absent billing fields are simply omitted
/// from the shaped billing address rather than defaulted. After
/// `create_customer_profile` resolves, attach the returned profile id
/// here to enable instrument-free repeat charges.
#[derive(Debug, Clone, Default)]
pub struct Prospect {
    /// Billing first name.
    pub billing_first_name: Option<String>,
    /// Billing last name.
    pub billing_last_name: Option<String>,
    /// Billing email address.
    pub billing_email: Option<String>,
    /// Billing phone number.
    pub billing_phone: Option<String>,
    /// Billing address line 1.
    pub billing_address1: Option<String>,
    /// Billing address line 2.
    pub billing_address2: Option<String>,
    /// Billing city.
    pub billing_city: Option<String>,
    /// Billing state or province.
    pub billing_state: Option<String>,
    /// Billing postal code.
    pub billing_postal_code: Option<String>,
    /// Billing country code (ISO 3166-1 alpha-2).
    pub billing_country: Option<String>,
    /// Shipping first name.
    pub shipping_first_name: Option<String>,
    /// Shipping last name.
    pub shipping_last_name: Option<String>,
    /// Shipping address line 1.
    pub shipping_address1: Option<String>,
    /// Shipping address line 2.
    pub shipping_address2: Option<String>,
    /// Shipping city.
    pub shipping_city: Option<String>,
    /// Shipping state or province.
    pub shipping_state: Option<String>,
    /// Shipping postal code.
    pub shipping_postal_code: Option<String>,
    /// Shipping country code (ISO 3166-1 alpha-2).
    pub shipping_country: Option<String>,
    /// Stored-instrument identifier assigned by the vault.
    pub profile_id: Option<String>,
}

macro_rules! prospect_setter {
    ($(#[$doc:meta] $name:ident => $field:ident),* $(,)?) => {
        $(
            #[$doc]
            #[must_use]
            pub fn $name(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

impl Prospect {
    prospect_setter! {
        /// Sets the billing first name.
        with_billing_first_name => billing_first_name,
        /// Sets the billing last name.
        with_billing_last_name => billing_last_name,
        /// Sets the billing email address.
        with_billing_email => billing_email,
        /// Sets the billing phone number.
        with_billing_phone => billing_phone,
        /// Sets billing address line 1.
        with_billing_address1 => billing_address1,
        /// Sets billing address line 2.
        with_billing_address2 => billing_address2,
        /// Sets the billing city.
        with_billing_city => billing_city,
        /// Sets the billing state or province.
        with_billing_state => billing_state,
        /// Sets the billing postal code.
        with_billing_postal_code => billing_postal_code,
        /// Sets the billing country code.
        with_billing_country => billing_country,
        /// Sets the shipping first name.
        with_shipping_first_name => shipping_first_name,
        /// Sets the shipping last name.
        with_shipping_last_name => shipping_last_name,
        /// Sets shipping address line 1.
        with_shipping_address1 => shipping_address1,
        /// Sets shipping address line 2.
        with_shipping_address2 => shipping_address2,
        /// Sets the shipping city.
        with_shipping_city => shipping_city,
        /// Sets the shipping state or province.
        with_shipping_state => shipping_state,
        /// Sets the shipping postal code.
        with_shipping_postal_code => shipping_postal_code,
        /// Sets the shipping country code.
        with_shipping_country => shipping_country,
        /// Attaches a stored-instrument identifier.
        with_profile_id => profile_id,
    }
}

/// Optional parameters for a refund.
///
/// With no amount, the remote service refunds the full remaining amount
/// under its own default semantics. A currency without an amount is
/// ignored, matching the remote schema's `amount.total` requirement.
#[derive(Debug, Clone, Default)]
pub struct RefundOptions {
    /// Partial amount to refund.
    pub amount: Option<Amount>,
    /// Currency of the partial amount.
    pub currency: Option<String>,
}

/// Successful payment result.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    /// Transaction identifier assigned by the remote service.
    pub transaction_id: String,
    /// Full raw remote response.
    pub raw: serde_json::Value,
}

/// Successful stored-card (customer profile) result.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerProfile {
    /// Stored-instrument identifier assigned by the vault.
    pub profile_id: String,
    /// Full raw remote response.
    pub raw: serde_json::Value,
}

/// Opaque success result for operations with no extracted identifier.
///
/// Refund and void responses are passed through under the remote
/// service's own documented schema, with no normalized sub-shape.
#[derive(Debug, Clone, Serialize)]
pub struct RawResponse {
    /// Full raw remote response.
    pub raw: serde_json::Value,
}
