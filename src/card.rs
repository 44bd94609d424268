//! Credit-card brand classification.
//!
//! The remote card schema requires an explicit `type` label alongside
//! the card number. Classification works on the number's issuer range;
//! the table is ordered, and the first matching brand wins, so a number
//! that satisfies more than one pattern resolves deterministically.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GatewayError, Result};

/// Card brand recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardBrand {
    /// Visa.
    Visa,
    /// Mastercard.
    Mastercard,
    /// American Express.
    AmericanExpress,
    /// Discover.
    Discover,
    /// Diners Club.
    DinersClub,
    /// JCB.
    Jcb,
    /// Maestro.
    Maestro,
}

impl CardBrand {
    /// Lowercased brand label in the form the remote schema expects.
    ///
    /// American Express is encoded under its short code `amex`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::AmericanExpress => "amex",
            Self::Discover => "discover",
            Self::DinersClub => "diners club",
            Self::Jcb => "jcb",
            Self::Maestro => "maestro",
        }
    }
}

static BRAND_PATTERNS: LazyLock<Vec<(CardBrand, Regex)>> = LazyLock::new(|| {
    [
        (CardBrand::Visa, r"^4[0-9]{12}(?:[0-9]{3})?$"),
        (CardBrand::Mastercard, r"^5[1-5][0-9]{14}$"),
        (CardBrand::AmericanExpress, r"^3[47][0-9]{13}$"),
        (
            CardBrand::Discover,
            r"^(?:65[4-9][0-9]{13}|64[4-9][0-9]{13}|6011[0-9]{12}|622(?:12[6-9]|1[3-9][0-9]|[2-8][0-9][0-9]|9[01][0-9]|92[0-5])[0-9]{10})$",
        ),
        (CardBrand::DinersClub, r"^3(?:0[0-5]|[68][0-9])[0-9]{11}$"),
        (CardBrand::Jcb, r"^(3(?:088|096|112|158|337|5(?:2[89]|[3-8][0-9]))\d{12})$"),
        (CardBrand::Maestro, r"^(5018|5020|5038|5893|6304|6759|6761|6762|6763)[0-9]{8,15}$"),
    ]
    .into_iter()
    .map(|(brand, pattern)| {
        let regex = Regex::new(pattern).expect("brand pattern is valid");
        (brand, regex)
    })
    .collect()
});

/// Classifies a card number into a brand.
///
/// Non-digit separators (spaces, dashes) are stripped before matching.
///
/// # Errors
///
/// Returns [`GatewayError::UnsupportedCard`] when the number matches no
/// known issuer range, including numbers too short to classify.
pub fn classify(number: &str) -> Result<CardBrand> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    BRAND_PATTERNS
        .iter()
        .find(|(_, regex)| regex.is_match(&digits))
        .map(|(brand, _)| *brand)
        .ok_or(GatewayError::UnsupportedCard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_visa() {
        assert_eq!(classify("4020025472997829").unwrap(), CardBrand::Visa);
        assert_eq!(classify("4111111111111111").unwrap(), CardBrand::Visa);
        // 13-digit legacy Visa range.
        assert_eq!(classify("4222222222222").unwrap(), CardBrand::Visa);
    }

    #[test]
    fn test_classify_mastercard() {
        assert_eq!(classify("5555555555554444").unwrap(), CardBrand::Mastercard);
    }

    #[test]
    fn test_classify_amex_label_is_short_code() {
        let brand = classify("378282246310005").unwrap();
        assert_eq!(brand, CardBrand::AmericanExpress);
        assert_eq!(brand.label(), "amex");
    }

    #[test]
    fn test_classify_discover() {
        assert_eq!(classify("6011111111111117").unwrap(), CardBrand::Discover);
        assert_eq!(classify("6445678901234567").unwrap(), CardBrand::Discover);
    }

    #[test]
    fn test_classify_rejects_embedded_issuer_range() {
        // Every alternative is anchored to the full digit string; a
        // Discover-looking run inside a longer garbage number must not
        // match.
        let err = classify("9999964412345678901234").unwrap_err();
        assert!(matches!(err, GatewayError::UnsupportedCard));
    }

    #[test]
    fn test_classify_strips_separators() {
        assert_eq!(classify("4111 1111 1111 1111").unwrap(), CardBrand::Visa);
        assert_eq!(classify("4111-1111-1111-1111").unwrap(), CardBrand::Visa);
    }

    #[test]
    fn test_classify_too_short_is_unsupported() {
        let err = classify("4111").unwrap_err();
        assert!(matches!(err, GatewayError::UnsupportedCard));
    }

    #[test]
    fn test_classify_unknown_range_is_unsupported() {
        // 50xx is outside every supported issuer range.
        let err = classify("5000300020003003").unwrap_err();
        assert!(matches!(err, GatewayError::UnsupportedCard));
    }

    #[test]
    fn test_classify_empty_is_unsupported() {
        assert!(matches!(classify("").unwrap_err(), GatewayError::UnsupportedCard));
    }

    #[test]
    fn test_labels_are_lowercase() {
        for brand in [
            CardBrand::Visa,
            CardBrand::Mastercard,
            CardBrand::AmericanExpress,
            CardBrand::Discover,
            CardBrand::DinersClub,
            CardBrand::Jcb,
            CardBrand::Maestro,
        ] {
            assert_eq!(brand.label(), brand.label().to_lowercase());
        }
    }
}
