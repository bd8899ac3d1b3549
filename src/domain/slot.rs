//! Slot types: one labeled, independently capturable drawing region

use std::fmt;

use serde::{Deserialize, Serialize};

/// Description given to blank slots appended by the user
pub const FREE_CAPTURE_DESCRIPTION: &str = "自由搜集";

/// Session-wide unique identifier of a slot
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(String);

impl SlotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlotId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier grouping one ordered set of slots (one screen of the activity)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContextKey(String);

impl ContextKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// A labeled drawing slot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    /// Zero or one display character
    pub label: String,
    pub description: String,
    /// Created by duplication or blank insertion (deletable, relabelable)
    pub is_custom: bool,
}

impl Slot {
    /// A slot from a context's original default set
    pub fn default_slot(id: impl Into<String>, label: &str, description: &str) -> Self {
        Self {
            id: SlotId::new(id),
            label: clamp_label(label),
            description: description.to_string(),
            is_custom: false,
        }
    }

    /// A user-created slot
    pub fn custom(id: SlotId, label: &str, description: &str) -> Self {
        Self {
            id,
            label: clamp_label(label),
            description: description.to_string(),
            is_custom: true,
        }
    }
}

/// Ordered slots of one context; order is render order
pub type PageLayout = Vec<Slot>;

/// Keep at most the first character of a label
pub fn clamp_label(label: &str) -> String {
    label.chars().next().map(String::from).unwrap_or_default()
}
