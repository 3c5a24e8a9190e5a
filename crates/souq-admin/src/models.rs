//! Rows shown by the admin screens, as returned by the marketplace API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A marketplace account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
    /// Mobile number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Home city.
    #[serde(default)]
    pub city: Option<String>,
    /// `admin` or `user`.
    #[serde(default = "default_role")]
    pub role: String,
    /// Whether the account may log in.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Number of ads posted.
    #[serde(default)]
    pub ads_count: u64,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// A listing category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    /// Name of the parent category.
    #[serde(default)]
    pub parent: Option<String>,
    /// Icon URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Names of the features ads in this category carry.
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub ads_count: u64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// A field that ads of a category fill in, such as "Mileage".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFeature {
    pub id: u64,
    pub name: String,
    /// Name of the owning category.
    pub category: String,
    /// Input kind: `text`, `number`, `select`...
    #[serde(rename = "type")]
    pub kind: String,
    /// Choices of a `select` feature.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    /// Position in the ad form, unset features go last.
    #[serde(default)]
    pub sort_order: Option<i64>,
}

/// A classified ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advertising {
    pub id: u64,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub city: Option<String>,
    /// Asking price, absent for "on request".
    #[serde(default)]
    pub price: Option<f64>,
    /// Name of the poster.
    pub owner: String,
    /// `pending`, `active`, `rejected` or `expired`.
    pub status: String,
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
}

/// A city, used as reference data by the ad and user forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub region: Option<String>,
}

fn default_role() -> String {
    "user".to_string()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_defaults() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "name": "Sara",
            "email": "sara@example.com",
            "created_at": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(user.role, "user");
        assert!(user.is_active);
        assert_eq!(user.city, None);
        assert_eq!(user.ads_count, 0);
    }

    #[test]
    fn test_feature_kind_is_renamed() {
        let feature: CategoryFeature = serde_json::from_value(json!({
            "id": 1,
            "name": "Fuel",
            "category": "Cars",
            "type": "select",
            "options": ["Petrol", "Diesel"]
        }))
        .unwrap();
        assert_eq!(feature.kind, "select");
        assert_eq!(feature.sort_order, None);
        assert!(!feature.required);
    }
}
