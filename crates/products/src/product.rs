use core::str::FromStr;

use serde::{Deserialize, Serialize};

use catalogd_core::{DomainError, DomainResult};

/// Product identifier.
///
/// Assigned by storage on creation (positive, monotonic), immutable for the
/// record's lifetime.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<ProductId> for i64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = i64::from_str(s)
            .map_err(|e| DomainError::invalid_id(format!("ProductId: {e}")))?;
        Ok(Self(id))
    }
}

/// A catalog product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub available: bool,
}

impl Product {
    /// Materialize a stored record from a draft and a storage-assigned id.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            quantity: draft.quantity,
            available: draft.available,
        }
    }

    /// Replace every mutable field from `draft`, keeping the id.
    pub fn apply_draft(&mut self, draft: ProductDraft) {
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.quantity = draft.quantity;
        self.available = draft.available;
    }
}

/// Incoming create/update payload: every Product field except the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub quantity: i64,
    pub available: bool,
}

impl ProductDraft {
    /// Validate field constraints.
    ///
    /// Checked before the service layer runs; storage never sees an invalid
    /// draft.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }
        if !self.price.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if self.price < 0.0 {
            return Err(DomainError::validation("price must not be negative"));
        }
        if self.quantity < 0 {
            return Err(DomainError::validation("quantity must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draft(name: &str, price: f64, quantity: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: None,
            price,
            quantity,
            available: true,
        }
    }

    #[test]
    fn valid_draft_passes() {
        assert!(draft("Widget", 9.99, 5).validate().is_ok());
        assert!(draft("Widget", 0.0, 0).validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(matches!(
            draft("", 1.0, 1).validate(),
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            draft("   ", 1.0, 1).validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn negative_and_non_finite_prices_are_rejected() {
        assert!(draft("Widget", -0.01, 1).validate().is_err());
        assert!(draft("Widget", f64::NAN, 1).validate().is_err());
        assert!(draft("Widget", f64::INFINITY, 1).validate().is_err());
    }

    #[test]
    fn negative_quantity_is_rejected() {
        assert!(draft("Widget", 1.0, -1).validate().is_err());
    }

    #[test]
    fn apply_draft_replaces_fields_but_not_id() {
        let mut product = Product::from_draft(ProductId::new(7), draft("Widget", 9.99, 5));
        product.apply_draft(ProductDraft {
            name: "Gadget".to_string(),
            description: Some("updated".to_string()),
            price: 1.50,
            quantity: 0,
            available: false,
        });

        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.name, "Gadget");
        assert_eq!(product.description.as_deref(), Some("updated"));
        assert_eq!(product.price, 1.50);
        assert_eq!(product.quantity, 0);
        assert!(!product.available);
    }

    #[test]
    fn product_id_parses_from_path_segment() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::new(42));
        assert!("not-a-number".parse::<ProductId>().is_err());
    }

    #[test]
    fn product_serializes_with_flat_id() {
        let product = Product::from_draft(ProductId::new(3), draft("Widget", 9.99, 5));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "Widget");
    }

    proptest! {
        #[test]
        fn any_non_blank_name_with_sane_numbers_validates(
            name in "[a-zA-Z0-9 ]{1,40}",
            price in 0.0f64..1_000_000.0,
            quantity in 0i64..1_000_000,
        ) {
            prop_assume!(!name.trim().is_empty());
            prop_assert!(draft(&name, price, quantity).validate().is_ok());
        }

        #[test]
        fn negative_price_never_validates(price in -1_000_000.0f64..-0.000_001) {
            prop_assert!(draft("Widget", price, 1).validate().is_err());
        }
    }
}
