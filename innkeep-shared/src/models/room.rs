use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A room type as listed on the accommodations pages.
///
/// `total_units` is how many interchangeable physical rooms share this type.
/// Prices are in paise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price_per_night: i64,
    pub capacity: i32,
    pub beds: i32,
    pub size_sq_ft: Option<i32>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub is_available: bool,
    pub total_units: Option<i64>,
    pub tax_percent: Option<i64>,
}

impl Room {
    /// Unset and zero both count as a single unit.
    pub fn unit_count(&self) -> i64 {
        match self.total_units {
            Some(n) if n != 0 => n,
            _ => 1,
        }
    }

    /// Unset and zero both fall back to `default`.
    pub fn tax_percent_or(&self, default: i64) -> i64 {
        match self.tax_percent {
            Some(p) if p != 0 => p,
            _ => default,
        }
    }
}
