//! PayPal REST adapter for a generic payment-gateway abstraction.
//!
//! This crate is purely translational: it accepts a normalized
//! order / credit-card / prospect representation, reshapes it into the
//! PayPal REST request schema, invokes the remote operation, and
//! reshapes the response (or error) back into the normalized result
//! shape. There is no scheduling, no storage, and no state machine;
//! each public operation is one independent asynchronous round trip.
//!
//! # Operations
//!
//! | Operation | Result |
//! |---|---|
//! | [`PaypalGateway::submit_transaction`] | [`Transaction`] (sale) |
//! | [`PaypalGateway::authorize_transaction`] | [`Transaction`] (authorization) |
//! | [`PaypalGateway::refund_transaction`] | [`RawResponse`] |
//! | [`PaypalGateway::void_transaction`] | [`RawResponse`] |
//! | [`PaypalGateway::create_customer_profile`] | [`CustomerProfile`] |
//! | [`PaypalGateway::charge_customer`] | [`Transaction`] (sale) |
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use paypal_gateway::{CreditCard, GatewayConfig, Order, PaypalGateway, Prospect};
//!
//! # async fn example() -> paypal_gateway::Result<()> {
//! // Sandbox credentials; no network call happens at construction.
//! let config = GatewayConfig::new("client-id", "client-secret").with_test_mode(true);
//! let gateway = PaypalGateway::new(config)?;
//!
//! let order = Order::new("48.90").with_currency("USD");
//! let card = CreditCard::default()
//!     .with_number("4020025472997829")
//!     .with_expiration_month("08")
//!     .with_expiration_year("2030")
//!     .with_cvv("123");
//! let prospect = Prospect::default()
//!     .with_billing_first_name("Ada")
//!     .with_billing_last_name("Lovelace")
//!     .with_billing_address1("12 Analytical Row")
//!     .with_billing_city("London")
//!     .with_billing_postal_code("3212")
//!     .with_billing_country("GB");
//!
//! let transaction = gateway.submit_transaction(&order, &card, &prospect).await?;
//! println!("transaction id: {}", transaction.transaction_id);
//! # Ok(())
//! # }
//! ```
//!
//! ## Repeat charges through the vault
//!
//! ```rust,no_run
//! use paypal_gateway::{CreditCard, GatewayConfig, Order, PaypalGateway, Prospect};
//!
//! # async fn example() -> paypal_gateway::Result<()> {
//! # let gateway = PaypalGateway::new(GatewayConfig::new("id", "secret"))?;
//! # let card = CreditCard::default().with_number("4020025472997829");
//! let prospect = Prospect::default().with_billing_first_name("Ada");
//!
//! // Store the instrument once...
//! let profile = gateway.create_customer_profile(&card, &prospect, None).await?;
//!
//! // ...then charge by token, with no raw card data on the wire.
//! let prospect = prospect.with_profile_id(profile.profile_id);
//! let charge = gateway.charge_customer(&Order::new(25), &prospect).await?;
//! println!("charged: {}", charge.transaction_id);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`gateway`]: the adapter and its six operations
//! - [`model`]: normalized per-call value objects
//! - [`payload`]: request shaping against the remote schema
//! - [`mapping`]: declarative field-rename tables
//! - [`card`]: credit-card brand classification
//! - [`client`]: remote REST client (OAuth2, one call per operation)
//! - [`config`]: credentials and sandbox/live selection
//! - [`error`]: the error taxonomy
//!
//! # Error Handling
//!
//! Everything returns [`Result`]. Remote rejections (HTTP 400 and
//! above) are normalized to [`GatewayError::Remote`] with the raw error
//! body retained; transport failures pass through unchanged as
//! [`GatewayError::Http`]; precondition and shaping failures surface
//! before any network interaction. The adapter never retries and never
//! logs-and-swallows a failure.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod card;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mapping;
pub mod model;
pub mod payload;

pub use card::CardBrand;
pub use config::{Environment, GatewayConfig};
pub use error::{GatewayError, Result};
pub use gateway::PaypalGateway;
pub use model::{
    Amount, CreditCard, CustomerProfile, Order, Prospect, RawResponse, RefundOptions, Transaction,
};
