//! The gateway adapter: six public operations, each a linear
//! shape → invoke → reshape pipeline.
//!
//! Operations are independent of each other. Concurrent calls on the
//! same instance interleave freely; there is no cross-call ordering,
//! no retry, and no caller-initiated cancellation. Once invoked, a
//! call runs to its response or failure.

use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::client::PaypalClient;
use crate::config::{Environment, GatewayConfig};
use crate::error::{GatewayError, Result};
use crate::model::{
    CreditCard, CustomerProfile, Order, Prospect, RawResponse, RefundOptions, Transaction,
};
use crate::payload::{self, Intent};

/// PayPal adapter for the generic payment-gateway contract.
///
/// Holds the owned remote client configured at construction;
/// credentials and environment never change afterwards.
///
/// # Examples
///
/// ```rust,no_run
/// use paypal_gateway::{CreditCard, GatewayConfig, Order, PaypalGateway, Prospect};
///
/// # async fn example() -> paypal_gateway::Result<()> {
/// let config = GatewayConfig::new("client-id", "client-secret").with_test_mode(true);
/// let gateway = PaypalGateway::new(config)?;
///
/// let order = Order::new("48.90");
/// let card = CreditCard::default()
///     .with_number("4020025472997829")
///     .with_expiration_month("08")
///     .with_expiration_year("2030")
///     .with_cvv("123");
/// let prospect = Prospect::default()
///     .with_billing_first_name("Ada")
///     .with_billing_last_name("Lovelace");
///
/// let transaction = gateway.submit_transaction(&order, &card, &prospect).await?;
/// println!("transaction id: {}", transaction.transaction_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PaypalGateway {
    client: PaypalClient,
}

impl PaypalGateway {
    /// Constructs the adapter from a configuration bundle.
    ///
    /// No network call happens here; the remote client is configured
    /// for the selected environment and reused for every operation.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingCredential`] when the client id
    /// or secret is missing or empty.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { client: PaypalClient::new(&config) })
    }

    /// Constructs the adapter over a caller-supplied HTTP client.
    ///
    /// Useful for tests and for callers that tune pooling or timeouts
    /// themselves.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingCredential`] when the client id
    /// or secret is missing or empty.
    pub fn with_http_client(config: GatewayConfig, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        Ok(Self { client: PaypalClient::with_http_client(&config, http) })
    }

    /// Environment this adapter was configured for.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.client.environment()
    }

    /// Submits an immediate sale for the given order and card.
    ///
    /// # Errors
    ///
    /// Shaping errors surface before any network interaction; remote
    /// rejections arrive as [`GatewayError::Remote`].
    #[instrument(skip_all)]
    pub async fn submit_transaction(
        &self,
        order: &Order,
        card: &CreditCard,
        prospect: &Prospect,
    ) -> Result<Transaction> {
        self.create_payment(Intent::Sale, order, card, prospect).await
    }

    /// Authorizes the given order and card for later capture.
    ///
    /// # Errors
    ///
    /// Shaping errors surface before any network interaction; remote
    /// rejections arrive as [`GatewayError::Remote`].
    #[instrument(skip_all)]
    pub async fn authorize_transaction(
        &self,
        order: &Order,
        card: &CreditCard,
        prospect: &Prospect,
    ) -> Result<Transaction> {
        self.create_payment(Intent::Authorize, order, card, prospect).await
    }

    async fn create_payment(
        &self,
        intent: Intent,
        order: &Order,
        card: &CreditCard,
        prospect: &Prospect,
    ) -> Result<Transaction> {
        let request = payload::payment(intent, order, card, prospect)?;
        let response = self.client.create_payment(&request).await?;
        let transaction_id = extract_transaction_id(&response, intent)?;
        info!(%transaction_id, intent = intent.as_str(), "payment created");
        Ok(Transaction { transaction_id, raw: response })
    }

    /// Refunds a settled sale, fully or partially.
    ///
    /// With no options the remote service refunds the full remaining
    /// amount under its own defaults. The success body is passed
    /// through opaque.
    ///
    /// # Errors
    ///
    /// A malformed partial amount fails before any network
    /// interaction; remote rejections arrive as
    /// [`GatewayError::Remote`].
    #[instrument(skip(self, options))]
    pub async fn refund_transaction(
        &self,
        transaction_id: &str,
        options: Option<RefundOptions>,
    ) -> Result<RawResponse> {
        let request = payload::refund(&options.unwrap_or_default())?;
        let response = self.client.refund_sale(transaction_id, &request).await?;
        Ok(RawResponse { raw: response })
    }

    /// Voids a pending authorization. The success body is passed
    /// through opaque.
    ///
    /// # Errors
    ///
    /// Remote rejections arrive as [`GatewayError::Remote`].
    #[instrument(skip(self))]
    pub async fn void_transaction(&self, authorization_id: &str) -> Result<RawResponse> {
        let response = self.client.void_authorization(authorization_id).await?;
        Ok(RawResponse { raw: response })
    }

    /// Stores the card in the processor's vault and returns the
    /// assigned profile id.
    ///
    /// Extra options are merged into the shaped card and win on key
    /// collision. Attach the returned profile id to your own prospect
    /// to enable [`charge_customer`](Self::charge_customer).
    ///
    /// # Errors
    ///
    /// Shaping errors surface before any network interaction; remote
    /// rejections arrive as [`GatewayError::Remote`].
    #[instrument(skip_all)]
    pub async fn create_customer_profile(
        &self,
        card: &CreditCard,
        prospect: &Prospect,
        options: Option<Map<String, Value>>,
    ) -> Result<CustomerProfile> {
        let request = payload::vault_card(card, prospect, options.as_ref())?;
        let response = self.client.store_card(&request).await?;
        let profile_id = response
            .get("id")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .ok_or_else(|| {
                GatewayError::UnexpectedResponse("vault response missing id".to_owned())
            })?;
        info!(%profile_id, "customer profile created");
        Ok(CustomerProfile { profile_id, raw: response })
    }

    /// Charges a prospect through their stored instrument. Always a
    /// sale; no raw card data is sent.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingProfileId`] before any network
    /// interaction when the prospect carries no profile id; remote
    /// rejections arrive as [`GatewayError::Remote`].
    #[instrument(skip_all)]
    pub async fn charge_customer(&self, order: &Order, prospect: &Prospect) -> Result<Transaction> {
        let profile_id = prospect.profile_id.as_deref().ok_or(GatewayError::MissingProfileId)?;
        let request = payload::token_charge(order, profile_id)?;
        let response = self.client.create_payment(&request).await?;
        let transaction_id = extract_transaction_id(&response, Intent::Sale)?;
        info!(%transaction_id, "stored-instrument charge created");
        Ok(Transaction { transaction_id, raw: response })
    }
}

/// Pulls the transaction identifier out of a create-payment response.
///
/// The identifier lives at `transactions[0].related_resources[0]`,
/// nested under `sale` for a sale intent and `authorization` for an
/// authorize intent.
fn extract_transaction_id(response: &Value, intent: Intent) -> Result<String> {
    let related = response.pointer("/transactions/0/related_resources/0").ok_or_else(|| {
        GatewayError::UnexpectedResponse(
            "missing transactions[0].related_resources[0]".to_owned(),
        )
    })?;
    let resource = match intent {
        Intent::Sale => "sale",
        Intent::Authorize => "authorization",
    };
    related
        .pointer(&format!("/{resource}/id"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            GatewayError::UnexpectedResponse(format!("missing {resource}.id in related resources"))
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sale_response() -> Value {
        json!({
            "id": "PAY-17S8410768582940NKEE66EQ",
            "intent": "sale",
            "state": "approved",
            "transactions": [{
                "amount": { "total": "12.00", "currency": "USD" },
                "related_resources": [{
                    "sale": { "id": "4RR959492F879224U", "state": "completed" }
                }]
            }]
        })
    }

    fn authorization_response() -> Value {
        json!({
            "id": "PAY-6RV70583SB702805EKEYSZ6Y",
            "intent": "authorize",
            "state": "approved",
            "transactions": [{
                "amount": { "total": "9.50", "currency": "USD" },
                "related_resources": [{
                    "authorization": { "id": "2DC87612EK520411B", "state": "authorized" }
                }]
            }]
        })
    }

    #[test]
    fn test_extract_sale_id() {
        let id = extract_transaction_id(&sale_response(), Intent::Sale).unwrap();
        assert_eq!(id, "4RR959492F879224U");
    }

    #[test]
    fn test_extract_authorization_id() {
        let id = extract_transaction_id(&authorization_response(), Intent::Authorize).unwrap();
        assert_eq!(id, "2DC87612EK520411B");
    }

    #[test]
    fn test_extract_wrong_resource_kind_is_an_error() {
        let err = extract_transaction_id(&sale_response(), Intent::Authorize).unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_extract_missing_related_resources_is_an_error() {
        let response = json!({ "intent": "sale", "transactions": [] });
        let err = extract_transaction_id(&response, Intent::Sale).unwrap_err();
        assert!(matches!(err, GatewayError::UnexpectedResponse(_)));
    }

    #[test]
    fn test_construction_rejects_missing_credentials() {
        let err = PaypalGateway::new(GatewayConfig::new("", "secret")).unwrap_err();
        assert!(matches!(err, GatewayError::MissingCredential("client_id")));

        let err = PaypalGateway::new(GatewayConfig::new("id", "")).unwrap_err();
        assert!(matches!(err, GatewayError::MissingCredential("client_secret")));
    }

    #[test]
    fn test_construction_with_valid_credentials() {
        let gateway = PaypalGateway::new(GatewayConfig::new("id", "secret"));
        assert!(gateway.is_ok());
    }

    #[tokio::test]
    async fn test_charge_customer_requires_profile_id() {
        let gateway = PaypalGateway::new(GatewayConfig::new("id", "secret")).unwrap();
        let order = Order::new(10);
        let prospect = Prospect::default();

        let err = gateway.charge_customer(&order, &prospect).await.unwrap_err();
        assert!(matches!(err, GatewayError::MissingProfileId));
    }
}
