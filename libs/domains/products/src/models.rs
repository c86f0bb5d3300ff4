use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::ProductError;

/// Unchecked product fields.
///
/// This is the shape of a record in the seed file and the input to
/// [`Product`]'s constructor. Nothing here is validated until it is turned
/// into a `Product` with `Product::try_from`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
    #[serde(rename = "categoria", default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(rename = "disponible", default)]
    pub available: Option<bool>,
    #[serde(rename = "fechaCreacion", default, deserialize_with = "timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        rename = "fechaActualizacion",
        default,
        deserialize_with = "timestamp::deserialize"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Product entity.
///
/// Values are immutable: a change is a new `Product` built by the mapper.
/// The identifier can only be assigned by the store.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ProductDraft")]
pub struct Product {
    id: Option<i64>,
    name: String,
    description: Option<String>,
    price: f64,
    category: String,
    stock: Option<i32>,
    available: bool,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<ProductDraft> for Product {
    type Error = ProductError;

    fn try_from(draft: ProductDraft) -> Result<Self, Self::Error> {
        let name = draft
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| ProductError::InvalidProduct("name is required".to_string()))?;

        let price = draft
            .price
            .ok_or_else(|| ProductError::InvalidProduct("price is required".to_string()))?;
        if !price.is_finite() || price < 0.0 {
            return Err(ProductError::InvalidProduct(format!(
                "price cannot be negative: {}",
                price
            )));
        }

        let category = draft
            .category
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ProductError::InvalidProduct("category is required".to_string()))?;

        if let Some(stock) = draft.stock.filter(|s| *s < 0) {
            return Err(ProductError::InvalidProduct(format!(
                "stock cannot be negative: {}",
                stock
            )));
        }

        Ok(Self {
            id: draft.id,
            name,
            description: draft.description,
            price,
            category,
            stock: draft.stock,
            available: draft.available.unwrap_or(false),
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        })
    }
}

impl Product {
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn stock(&self) -> Option<i32> {
        self.stock
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Available and with at least one unit in stock.
    pub fn has_stock(&self) -> bool {
        self.available && self.stock.is_some_and(|s| s > 0)
    }

    /// Case-insensitive category comparison.
    pub fn is_in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    /// Case-insensitive substring match on the name.
    pub fn name_contains(&self, fragment: &str) -> bool {
        self.name.to_lowercase().contains(&fragment.to_lowercase())
    }

    pub(crate) fn with_id(self, id: i64) -> Self {
        Self { id: Some(id), ..self }
    }
}

/// Request body for creating or replacing a product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    /// Product name (2-100 characters)
    #[serde(rename = "nombre", default)]
    #[validate(
        custom(function = "not_blank", message = "name is required"),
        length(min = 2, max = 100, message = "name must be between 2 and 100 characters")
    )]
    pub name: String,

    /// Optional description (up to 500 characters)
    #[serde(rename = "descripcion", default)]
    #[validate(length(max = 500, message = "description cannot exceed 500 characters"))]
    pub description: Option<String>,

    /// Unit price, greater than zero with at most two decimals
    #[serde(rename = "precio", default)]
    #[validate(
        required(message = "price is required"),
        range(exclusive_min = 0.0, message = "price must be greater than 0"),
        custom(
            function = "price_digits",
            message = "price must have at most 10 integer digits and 2 decimals"
        )
    )]
    pub price: Option<f64>,

    /// Category name
    #[serde(rename = "categoria", default)]
    #[validate(custom(function = "not_blank", message = "category is required"))]
    pub category: String,

    /// Units in stock
    #[validate(range(min = 0, message = "stock cannot be negative"))]
    pub stock: Option<i32>,

    /// Whether the product can be sold
    #[serde(rename = "disponible", default)]
    pub available: bool,
}

/// Product as returned by the API. Absent fields are omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(rename = "disponible")]
    pub available: bool,
    #[serde(rename = "fechaCreacion", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "fechaActualizacion", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One page of products
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// Products on this page
    pub content: Vec<ProductResponse>,
    /// Number of products across all pages
    pub total_elements: u64,
    /// ceil(total_elements / size)
    pub total_pages: u64,
    /// Zero-based page index
    pub number: usize,
    /// Requested page size
    pub size: usize,
    /// Number of products on this page
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page index
    #[serde(default)]
    pub page: usize,
    /// Page size (at least 1)
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, message = "size must be at least 1"))]
    pub size: usize,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
        }
    }
}

/// Name search query parameters
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Case-insensitive fragment of the product name
    pub nombre: String,
}

fn default_page_size() -> usize {
    20
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// At most 10 integer digits and 2 fraction digits.
fn price_digits(value: f64) -> Result<(), ValidationError> {
    // f64 Display prints the shortest round-tripping decimal without exponent.
    let repr = value.abs().to_string();
    let (integer, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    if integer.len() > 10 || fraction.len() > 2 {
        return Err(ValidationError::new("digits"));
    }
    Ok(())
}

/// Seed timestamps come either as RFC 3339 or as zone-less local date-times,
/// which are taken to be UTC.
mod timestamp {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }

    fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| raw.parse::<NaiveDateTime>().map(|naive| naive.and_utc()))
    }
}
