use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductError {
    /// No document matched the lookup filter
    #[error("Product not found with filter: {0}")]
    NotFound(String),

    /// Input violates a domain invariant
    #[error("{0}")]
    BusinessRule(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    pub fn not_found(filter: impl std::fmt::Display) -> Self {
        ProductError::NotFound(filter.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ProductError::NotFound(_))
    }

    pub fn is_business_rule(&self) -> bool {
        matches!(self, ProductError::BusinessRule(_))
    }

    /// Human-readable message, as shown to callers
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Rule violations surface as [`ProductError::BusinessRule`] carrying the
/// first rule's message.
impl From<validator::ValidationErrors> for ProductError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_values()
            .flat_map(|field| field.iter())
            .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| errors.to_string());
        ProductError::BusinessRule(message)
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for ProductError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}
