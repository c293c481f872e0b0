//! Cat entity model and DTOs.

use catmander_core::types::{CatId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A cat row from the `cats` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Cat {
    pub id: CatId,
    pub name: String,
    pub color: String,
    /// Only used as a list filter; the editor never changes it.
    pub is_adopted: Option<bool>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new cat. The store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCat {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default, alias = "isAdopted", skip_serializing_if = "Option::is_none")]
    pub is_adopted: Option<bool>,
}

impl CreateCat {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            is_adopted: None,
        }
    }
}

/// DTO for updating an existing cat. All fields are optional; only the
/// fields that are present replace the stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateCat {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, alias = "isAdopted", skip_serializing_if = "Option::is_none")]
    pub is_adopted: Option<bool>,
}

impl UpdateCat {
    /// Returns `true` if applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.is_adopted.is_none()
    }

    /// Apply the present fields onto `cat` in place.
    pub fn apply_to(&self, cat: &mut Cat) {
        if let Some(name) = &self.name {
            cat.name.clone_from(name);
        }
        if let Some(color) = &self.color {
            cat.color.clone_from(color);
        }
        if let Some(is_adopted) = self.is_adopted {
            cat.is_adopted = Some(is_adopted);
        }
    }
}

/// Optional filter for listing cats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatFilter {
    pub is_adopted: Option<bool>,
}

impl CatFilter {
    pub fn adopted(is_adopted: bool) -> Self {
        Self {
            is_adopted: Some(is_adopted),
        }
    }

    /// Returns `true` if `cat` passes this filter.
    pub fn matches(&self, cat: &Cat) -> bool {
        match self.is_adopted {
            Some(flag) => cat.is_adopted == Some(flag),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tom() -> Cat {
        let now = chrono::Utc::now();
        Cat {
            id: "1".to_string(),
            name: "Tom".to_string(),
            color: "grey".to_string(),
            is_adopted: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn update_replaces_only_present_fields() {
        let mut cat = tom();
        let update = UpdateCat {
            color: Some("black".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut cat);
        assert_eq!(cat.name, "Tom");
        assert_eq!(cat.color, "black");
        assert_eq!(cat.is_adopted, None);
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(UpdateCat::default().is_empty());
        assert!(!UpdateCat {
            is_adopted: Some(true),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn filter_matches_adoption_flag() {
        let mut cat = tom();
        assert!(CatFilter::default().matches(&cat));
        assert!(!CatFilter::adopted(true).matches(&cat));

        cat.is_adopted = Some(true);
        assert!(CatFilter::adopted(true).matches(&cat));
        assert!(!CatFilter::adopted(false).matches(&cat));
    }

    #[test]
    fn create_accepts_camel_case_adoption_flag() {
        let input: CreateCat =
            serde_json::from_value(serde_json::json!({"name": "Tom", "isAdopted": true})).unwrap();
        assert_eq!(input.is_adopted, Some(true));
        assert_eq!(input.color, "");
    }

    #[test]
    fn empty_name_fails_validation() {
        assert!(CreateCat::new("", "grey").validate().is_err());
        assert!(CreateCat::new("Tom", "").validate().is_ok());

        let update = UpdateCat {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        assert!(UpdateCat::default().validate().is_ok());
    }

    #[test]
    fn update_serializes_only_present_fields() {
        let update = UpdateCat {
            color: Some("black".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"color": "black"}));
    }
}
