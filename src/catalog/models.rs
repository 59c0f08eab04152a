//! Product catalog types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::gateway::types::{validate_money, validate_not_blank};

/// Row in `products`
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub description: String,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub stock: i32,
    pub image_url: String,
}

/// Create / full-replace payload
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductRequest {
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    #[schema(example = "Organic Tomato Seeds")]
    pub name: String,
    #[validate(length(min = 1, max = 255), custom(function = "validate_not_blank"))]
    #[schema(example = "Seeds")]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "validate_money"))]
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    #[validate(range(min = 0))]
    #[schema(example = 100)]
    pub stock: i32,
    #[serde(default)]
    pub image_url: String,
}

impl ProductRequest {
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            description: self.description,
            price: self.price,
            stock: self.stock,
            image_url: self.image_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductCreated {
    pub message: String,
    pub id: i64,
}
