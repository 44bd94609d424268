//! Error types for the PayPal gateway adapter.
//!
//! All fallible operations in this crate return [`Result`], with
//! [`GatewayError`] covering the four failure families the adapter can
//! produce: configuration errors at construction, precondition and
//! shaping errors before any network interaction, normalized remote
//! errors (HTTP status 400 or above), and transport failures passed
//! through untranslated.

use thiserror::Error;

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors produced by the gateway adapter.
///
/// The adapter never retries and never swallows a failure: every error
/// surfaces to the caller exactly once. Remote rejections keep the raw
/// error body for diagnostics; transport failures are propagated as-is.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required credential was missing or empty at construction.
    ///
    /// Raised before any remote call is possible. The payload names the
    /// offending configuration field.
    #[error("missing required credential: {0}")]
    MissingCredential(&'static str),

    /// `charge_customer` was invoked with a prospect that has no stored
    /// profile id.
    ///
    /// Surfaced immediately, before any network interaction. Create a
    /// profile with `create_customer_profile` first and attach the
    /// returned id to the prospect.
    #[error("prospect must have a profile id")]
    MissingProfileId,

    /// An order or refund amount could not be parsed or formatted.
    ///
    /// Malformed numeric text is a hard error, never a silent zero
    /// amount. Negative amounts are rejected here as well.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The card number did not match any supported brand.
    ///
    /// The remote schema requires an explicit card `type`; rather than
    /// guessing a default brand for an unclassifiable number, the call
    /// fails before anything is sent.
    #[error("card number does not match any supported card brand")]
    UnsupportedCard,

    /// The remote service rejected the request with an HTTP error
    /// status.
    ///
    /// Covers every status of 400 and above, with no sub-classification.
    /// The display string is the remote's reported status line; `body`
    /// retains the raw error payload for diagnostics.
    #[error("Response Status : {status}")]
    Remote {
        /// HTTP status code reported by the remote service.
        status: u16,
        /// Raw remote error body, passed through untouched.
        body: serde_json::Value,
    },

    /// The HTTP round trip itself failed.
    ///
    /// Connection, TLS, and timeout failures from the underlying client
    /// are propagated unchanged; the adapter performs no translation
    /// for failures that carry no HTTP status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote service answered successfully but the response body
    /// was missing a field the contract extracts.
    #[error("unexpected processor response: {0}")]
    UnexpectedResponse(String),
}
