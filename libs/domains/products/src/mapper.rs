//! Conversions between API payloads and the [`Product`] entity.

use chrono::Utc;

use crate::error::ProductResult;
use crate::models::{Product, ProductDraft, ProductRequest, ProductResponse};

/// Build a new, unsaved product from a request. Both timestamps are set to now.
pub fn to_domain(request: ProductRequest) -> ProductResult<Product> {
    let now = Utc::now();
    Product::try_from(ProductDraft {
        id: None,
        name: Some(request.name),
        description: request.description,
        price: request.price,
        category: Some(request.category),
        stock: request.stock,
        available: Some(request.available),
        created_at: Some(now),
        updated_at: Some(now),
    })
}

pub fn to_response(product: &Product) -> ProductResponse {
    ProductResponse {
        id: product.id(),
        name: product.name().to_string(),
        description: product.description().map(str::to_string),
        price: product.price(),
        category: product.category().to_string(),
        stock: product.stock(),
        available: product.is_available(),
        created_at: product.created_at(),
        updated_at: product.updated_at(),
    }
}

/// Replace every editable field of `existing` with the request's values.
///
/// The id and creation time are kept and the update time is set to now.
pub fn update_from_request(existing: &Product, request: ProductRequest) -> ProductResult<Product> {
    Product::try_from(ProductDraft {
        id: existing.id(),
        name: Some(request.name),
        description: request.description,
        price: request.price,
        category: Some(request.category),
        stock: request.stock,
        available: Some(request.available),
        created_at: existing.created_at(),
        updated_at: Some(Utc::now()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProductError;
    use chrono::{TimeZone, Utc};

    fn request(name: &str) -> ProductRequest {
        ProductRequest {
            name: name.to_string(),
            description: Some("desc".to_string()),
            price: Some(49.9),
            category: "Hogar".to_string(),
            stock: Some(4),
            available: true,
        }
    }

    #[test]
    fn test_to_domain_sets_timestamps_and_no_id() {
        let product = to_domain(request("Lampara")).unwrap();

        assert_eq!(product.id(), None);
        assert!(product.created_at().is_some());
        assert_eq!(product.created_at(), product.updated_at());
        assert_eq!(product.category(), "Hogar");
    }

    #[test]
    fn test_to_domain_without_price_is_invalid() {
        let err = to_domain(ProductRequest {
            price: None,
            ..request("Lampara")
        })
        .unwrap_err();
        assert!(matches!(err, ProductError::InvalidProduct(_)));
    }

    #[test]
    fn test_update_keeps_id_and_creation_time() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let existing = Product::try_from(ProductDraft {
            id: Some(3),
            name: Some("Old".to_string()),
            price: Some(1.0),
            category: Some("Hogar".to_string()),
            created_at: Some(created),
            updated_at: Some(created),
            ..Default::default()
        })
        .unwrap();

        let updated = update_from_request(&existing, request("New")).unwrap();

        assert_eq!(updated.id(), Some(3));
        assert_eq!(updated.name(), "New");
        assert_eq!(updated.created_at(), Some(created));
        assert!(updated.updated_at() > Some(created));
    }

    #[test]
    fn test_response_omits_absent_fields() {
        let product = Product::try_from(ProductDraft {
            name: Some("Bare".to_string()),
            price: Some(2.0),
            category: Some("Misc".to_string()),
            ..Default::default()
        })
        .unwrap();

        let json = serde_json::to_value(to_response(&product)).unwrap();

        assert_eq!(json["nombre"], "Bare");
        assert_eq!(json["disponible"], false);
        assert!(json.get("id").is_none());
        assert!(json.get("descripcion").is_none());
        assert!(json.get("fechaCreacion").is_none());
    }
}
