//! Ordered submission content items.
//!
//! # Responsibility
//! - Define the template/attachment item shape owned by the sequence engine.
//! - Keep content opaque: items carry references, never inspected bodies.
//!
//! # Invariants
//! - `item_id` is stable for the item lifetime and independent of position.
//! - `sequence_no` is 1-based and assigned only by the engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one sequence item.
pub type ItemId = Uuid;

/// Role of an item inside a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Template message; at most one per sequence.
    Message,
    /// Attachment delivered alongside the message.
    Attachment,
}

/// Opaque reference to item content supplied by the content source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PayloadRef {
    /// Inline text, e.g. a typed message template.
    Text { body: String },
    /// File handle resolved by the caller; only metadata travels here.
    File { name: String, media_type: String },
}

impl PayloadRef {
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text { body: body.into() }
    }

    pub fn file(name: impl Into<String>, media_type: impl Into<String>) -> Self {
        Self::File {
            name: name.into(),
            media_type: media_type.into(),
        }
    }

    /// File name for file references; `None` for inline text.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Text { .. } => None,
            Self::File { name, .. } => Some(name),
        }
    }

    /// Declared media type for file references.
    pub fn media_type(&self) -> Option<&str> {
        match self {
            Self::Text { .. } => None,
            Self::File { media_type, .. } => Some(media_type),
        }
    }
}

/// Read model of one ordered content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceItem {
    pub item_id: ItemId,
    pub kind: ItemKind,
    pub payload_ref: PayloadRef,
    /// Dense 1-based position at the time of the snapshot.
    pub sequence_no: u32,
}

impl SequenceItem {
    pub(crate) fn new(item_id: ItemId, kind: ItemKind, payload_ref: PayloadRef) -> Self {
        Self {
            item_id,
            kind,
            payload_ref,
            sequence_no: 0,
        }
    }

    pub(crate) fn generate(kind: ItemKind, payload_ref: PayloadRef) -> Self {
        Self::new(Uuid::new_v4(), kind, payload_ref)
    }

    pub fn is_message(&self) -> bool {
        self.kind == ItemKind::Message
    }
}
