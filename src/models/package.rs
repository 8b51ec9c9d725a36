use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bundled multi-day offering, priced per person. The `service_ids` field
/// records which catalog services the bundle covers but does not feed the
/// price calculation.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Package {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: String,
    pub duration_days: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub service_ids: Vec<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PackageInput {
    pub name: String,
    pub description: String,
    pub duration_days: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub service_ids: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    pub is_active: bool,
}
