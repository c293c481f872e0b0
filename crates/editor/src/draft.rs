//! Working copy of the editable fields of a cat.

use catmander_core::name_rule::NameRule;
use catmander_db::models::cat::{Cat, UpdateCat};
use validator::Validate;

use crate::error::EditorError;

/// An editable field of [`EditorDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Color,
}

/// The user's unsaved `{name, color}` for one editing session.
///
/// Never aliases the fetched record: edits only touch the draft, and the
/// record changes only when a submit succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorDraft {
    pub name: String,
    pub color: String,
}

impl EditorDraft {
    pub fn from_cat(cat: &Cat) -> Self {
        Self {
            name: cat.name.clone(),
            color: cat.color.clone(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Color => &self.color,
        }
    }

    /// Replace one field, leaving the other untouched.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::Color => self.color = value,
        }
    }

    /// The fields that differ from `base`, as a partial update.
    pub fn changes_from(&self, base: &Cat) -> UpdateCat {
        UpdateCat {
            name: (self.name != base.name).then(|| self.name.clone()),
            color: (self.color != base.color).then(|| self.color.clone()),
            is_adopted: None,
        }
    }

    /// Both fields as an update, regardless of what is stored.
    pub fn to_update(&self) -> UpdateCat {
        UpdateCat {
            name: Some(self.name.clone()),
            color: Some(self.color.clone()),
            is_adopted: None,
        }
    }

    pub fn is_dirty(&self, base: &Cat) -> bool {
        !self.changes_from(base).is_empty()
    }

    /// Check the draft against `rule`. [`NameRule::AllowEmpty`] accepts
    /// everything.
    pub fn validate(&self, rule: NameRule) -> Result<(), EditorError> {
        if rule.requires_name() {
            self.to_update().validate()?;
        }
        Ok(())
    }
}
