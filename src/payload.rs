//! Request shaping for the remote payment API.
//!
//! Every public operation sends one JSON payload; this module builds
//! them. Card-present payloads merge the credit card and prospect into
//! one flat instrument (card fields win on key collision), rename it
//! through the declarative schemas, and attach the derived billing
//! address and brand label.

use serde_json::{json, Map, Value};

use crate::card;
use crate::error::Result;
use crate::mapping::{map_fields, BILLING_ADDRESS_SCHEMA, CARD_SCHEMA};
use crate::model::{CreditCard, Order, Prospect, RefundOptions};

/// Currency used when the order does not carry one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Payment intent for card-present operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Immediate sale.
    Sale,
    /// Authorization for later capture.
    Authorize,
}

impl Intent {
    /// Wire value of the intent field.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Authorize => "authorize",
        }
    }
}

fn insert_opt(fields: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        fields.insert(key.to_owned(), Value::String(value.clone()));
    }
}

/// Splits a full cardholder name at the first whitespace run.
fn split_card_holder(name: &str) -> (Option<&str>, Option<&str>) {
    let name = name.trim();
    if name.is_empty() {
        return (None, None);
    }
    match name.split_once(char::is_whitespace) {
        Some((first, rest)) => (Some(first), Some(rest.trim_start())),
        None => (Some(name), None),
    }
}

/// Merges card and prospect into one flat instrument map.
///
/// The prospect contributes the billing name; a cardholder name on the
/// card takes precedence over it. Keys use the normalized vocabulary
/// consumed by [`CARD_SCHEMA`].
fn instrument_fields(card: &CreditCard, prospect: &Prospect) -> Map<String, Value> {
    let mut fields = Map::new();
    insert_opt(&mut fields, "billing_first_name", &prospect.billing_first_name);
    insert_opt(&mut fields, "billing_last_name", &prospect.billing_last_name);
    if let Some(holder) = &card.card_holder {
        let (first, last) = split_card_holder(holder);
        if let Some(first) = first {
            fields.insert("billing_first_name".to_owned(), Value::String(first.to_owned()));
        }
        if let Some(last) = last {
            fields.insert("billing_last_name".to_owned(), Value::String(last.to_owned()));
        }
    }
    fields.insert("number".to_owned(), Value::String(card.number.clone()));
    fields.insert("expiration_month".to_owned(), Value::String(card.expiration_month.clone()));
    fields.insert("expiration_year".to_owned(), Value::String(card.expiration_year.clone()));
    fields.insert("cvv".to_owned(), Value::String(card.cvv.clone()));
    fields
}

fn billing_fields(prospect: &Prospect) -> Map<String, Value> {
    let mut fields = Map::new();
    insert_opt(&mut fields, "billing_phone", &prospect.billing_phone);
    insert_opt(&mut fields, "billing_address1", &prospect.billing_address1);
    insert_opt(&mut fields, "billing_address2", &prospect.billing_address2);
    insert_opt(&mut fields, "billing_city", &prospect.billing_city);
    insert_opt(&mut fields, "billing_state", &prospect.billing_state);
    insert_opt(&mut fields, "billing_postal_code", &prospect.billing_postal_code);
    insert_opt(&mut fields, "billing_country", &prospect.billing_country);
    fields
}

/// Shapes the remote credit-card object from card + prospect.
///
/// Renames the merged instrument through [`CARD_SCHEMA`], derives the
/// `billing_address` sub-object through [`BILLING_ADDRESS_SCHEMA`]
/// (absent fields omitted), and attaches the classified brand as
/// `type`.
///
/// # Errors
///
/// Returns an error when the card number classifies to no supported
/// brand.
pub fn shaped_credit_card(card: &CreditCard, prospect: &Prospect) -> Result<Map<String, Value>> {
    let brand = card::classify(&card.number)?;
    let mut shaped = map_fields(&instrument_fields(card, prospect), CARD_SCHEMA);
    let billing_address = map_fields(&billing_fields(prospect), BILLING_ADDRESS_SCHEMA);
    shaped.insert("billing_address".to_owned(), Value::Object(billing_address));
    shaped.insert("type".to_owned(), Value::String(brand.label().to_owned()));
    Ok(shaped)
}

fn order_amount(order: &Order) -> Result<Value> {
    Ok(json!({
        "total": order.amount.format_total()?,
        "currency": order.currency.as_deref().unwrap_or(DEFAULT_CURRENCY),
    }))
}

/// Builds the create-payment payload for a card-present sale or
/// authorization.
///
/// # Errors
///
/// Returns an error for an unclassifiable card number or a malformed
/// order amount.
pub fn payment(
    intent: Intent,
    order: &Order,
    card: &CreditCard,
    prospect: &Prospect,
) -> Result<Value> {
    let credit_card = shaped_credit_card(card, prospect)?;
    Ok(json!({
        "intent": intent.as_str(),
        "payer": {
            "payment_method": "credit_card",
            "funding_instruments": [{ "credit_card": credit_card }],
        },
        "transactions": [{ "amount": order_amount(order)? }],
    }))
}

/// Builds the create-payment payload for a charge against a stored
/// instrument. Carries no raw card data; always a sale.
///
/// # Errors
///
/// Returns an error for a malformed order amount.
pub fn token_charge(order: &Order, profile_id: &str) -> Result<Value> {
    Ok(json!({
        "intent": Intent::Sale.as_str(),
        "payer": {
            "payment_method": "credit_card",
            "funding_instruments": [{
                "credit_card_token": { "credit_card_id": profile_id },
            }],
        },
        "transactions": [{ "amount": order_amount(order)? }],
    }))
}

/// Builds the vault store-card payload.
///
/// Caller-supplied extra options are merged last and win on key
/// collision.
///
/// # Errors
///
/// Returns an error when the card number classifies to no supported
/// brand.
pub fn vault_card(
    card: &CreditCard,
    prospect: &Prospect,
    options: Option<&Map<String, Value>>,
) -> Result<Value> {
    let mut shaped = shaped_credit_card(card, prospect)?;
    if let Some(options) = options {
        for (key, value) in options {
            shaped.insert(key.clone(), value.clone());
        }
    }
    Ok(Value::Object(shaped))
}

/// Builds the refund payload.
///
/// The `amount` sub-object appears only when a partial amount was
/// given; a currency alone produces an empty payload, leaving the
/// remote service to refund the full remaining amount under its own
/// defaults.
///
/// # Errors
///
/// Returns an error for a malformed partial amount.
pub fn refund(options: &RefundOptions) -> Result<Value> {
    let mut payload = Map::new();
    if let Some(amount) = &options.amount {
        let mut sub = Map::new();
        sub.insert("total".to_owned(), Value::String(amount.format_total()?));
        if let Some(currency) = &options.currency {
            sub.insert("currency".to_owned(), Value::String(currency.clone()));
        }
        payload.insert("amount".to_owned(), Value::Object(sub));
    }
    Ok(Value::Object(payload))
}
