use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Product document as stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, stored as the hyphenated string in `_id`
    #[serde(rename = "_id", alias = "id", with = "id_as_string")]
    pub id: Uuid,
    pub name: String,
    /// Units in stock, never negative at creation
    pub quantity: i32,
    /// Persisted as its exact decimal string
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Message reported when a new product carries a negative quantity
pub const NEGATIVE_QUANTITY: &str = "Quantity cannot be negative";

/// Creation payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProductIn {
    pub name: String,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
    pub price: Decimal,
}

/// Partial update payload; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

/// Read representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOut {
    pub id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Update result: the product after the update, plus which fields were written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdateOut {
    #[serde(flatten)]
    pub product: ProductOut,
    /// Names of the payload fields applied, in declaration order
    pub updated_fields: Vec<String>,
}

/// Keeps `_id` a plain string whichever BSON serializer the driver picks,
/// so filters built from `Uuid::to_string` always match.
pub(crate) mod id_as_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(D::Error::custom)
    }
}

impl Product {
    /// New document with a fresh id; both timestamps share the same instant
    pub fn new(input: ProductIn) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            quantity: input.quantity,
            price: input.price,
            created_at: now,
            updated_at: now,
        }
    }

    /// In-memory equivalent of the store-side `$set`
    pub fn apply_update(&mut self, update: ProductUpdate, updated_at: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        self.updated_at = updated_at;
    }
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    pub fn changed_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name".to_string());
        }
        if self.quantity.is_some() {
            fields.push("quantity".to_string());
        }
        if self.price.is_some() {
            fields.push("price".to_string());
        }
        fields
    }
}

impl From<Product> for ProductOut {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            quantity: product.quantity,
            price: product.price,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl ProductUpdateOut {
    pub fn new(product: Product, updated_fields: Vec<String>) -> Self {
        Self {
            product: product.into(),
            updated_fields,
        }
    }
}
