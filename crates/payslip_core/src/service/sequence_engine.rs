//! Ordered template/attachment sequence for one editing session.
//!
//! # Responsibility
//! - Own the ordered item list and its dense 1-based numbering.
//! - Provide identity-addressed insert, remove and reorder operations.
//! - Assemble the canonical submission payload.
//!
//! # Invariants
//! - At most one `Message` item exists at any time.
//! - After every mutation `sequence_no` is exactly `1..=len`.
//! - Every mutation builds the next list and publishes it in one step.
//! - Unknown item ids are no-ops for `remove` and `reorder`.

use crate::error::ValidationError;
use crate::model::payload::Payload;
use crate::model::period::ResolvedPeriod;
use crate::model::sequence_item::{ItemId, ItemKind, PayloadRef, SequenceItem};
use log::debug;

/// Coarse shape of the sequence, used to gate submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    Empty,
    MessageOnly,
    MessageAndAttachments,
    /// Valid editing state that cannot be submitted.
    AttachmentsOnly,
}

impl SequenceState {
    pub fn is_submittable(self) -> bool {
        matches!(self, Self::MessageOnly | Self::MessageAndAttachments)
    }
}

/// Single-writer owner of the ordered content list.
#[derive(Debug, Clone, Default)]
pub struct SequenceEngine {
    items: Vec<SequenceItem>,
}

impl SequenceEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the template message or replaces the existing one in place.
    ///
    /// Replacement keeps the existing position and `ItemId`. A new message is
    /// appended at the end.
    pub fn set_message(&mut self, payload_ref: PayloadRef) -> ItemId {
        let mut next = self.items.clone();
        let item_id = match next.iter_mut().find(|item| item.is_message()) {
            Some(existing) => {
                existing.payload_ref = payload_ref;
                existing.item_id
            }
            None => {
                let item = SequenceItem::generate(ItemKind::Message, payload_ref);
                let item_id = item.item_id;
                next.push(item);
                item_id
            }
        };
        self.publish(next);
        debug!(
            "event=set_message module=sequence status=ok len={}",
            self.items.len()
        );
        item_id
    }

    /// Places the template message at an explicit zero-based position.
    ///
    /// `position` is clamped to the list bounds. An existing message keeps its
    /// `ItemId` and moves; attachments are renumbered around it.
    pub fn set_message_at(&mut self, payload_ref: PayloadRef, position: usize) -> ItemId {
        let mut next = self.items.clone();
        let item = match next.iter().position(|item| item.is_message()) {
            Some(index) => {
                let mut existing = next.remove(index);
                existing.payload_ref = payload_ref;
                existing
            }
            None => SequenceItem::generate(ItemKind::Message, payload_ref),
        };
        let item_id = item.item_id;
        let target = position.min(next.len());
        next.insert(target, item);
        self.publish(next);
        item_id
    }

    /// Appends one attachment and returns its identity.
    pub fn add_attachment(&mut self, payload_ref: PayloadRef) -> ItemId {
        let mut next = self.items.clone();
        let item = SequenceItem::generate(ItemKind::Attachment, payload_ref);
        let item_id = item.item_id;
        next.push(item);
        self.publish(next);
        item_id
    }

    /// Removes one item by identity. Unknown ids are ignored.
    pub fn remove(&mut self, item_id: ItemId) {
        if self.position_of(item_id).is_none() {
            debug!("event=remove_item module=sequence status=noop reason=unknown_id");
            return;
        }
        let next = self
            .items
            .iter()
            .filter(|item| item.item_id != item_id)
            .cloned()
            .collect();
        self.publish(next);
    }

    /// Moves one item to zero-based `target_position` with splice semantics.
    ///
    /// The item is taken out and reinserted; items in between shift by one.
    /// `target_position` is clamped to `[0, len - 1]`. Unknown ids and moves
    /// to the current position leave the list untouched.
    pub fn reorder(&mut self, item_id: ItemId, target_position: usize) {
        let Some(source) = self.position_of(item_id) else {
            debug!("event=reorder_item module=sequence status=noop reason=unknown_id");
            return;
        };
        let target = target_position.min(self.items.len() - 1);
        if source == target {
            return;
        }

        let mut next = self.items.clone();
        let item = next.remove(source);
        next.insert(target, item);
        self.publish(next);
        debug!(
            "event=reorder_item module=sequence status=ok from={} to={}",
            source, target
        );
    }

    /// Current order with up-to-date sequence numbers.
    pub fn snapshot(&self) -> Vec<SequenceItem> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Zero-based position of `item_id`, if present.
    pub fn position_of(&self, item_id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.item_id == item_id)
    }

    pub fn message(&self) -> Option<&SequenceItem> {
        self.items.iter().find(|item| item.is_message())
    }

    pub fn attachments(&self) -> impl Iterator<Item = &SequenceItem> {
        self.items
            .iter()
            .filter(|item| item.kind == ItemKind::Attachment)
    }

    pub fn state(&self) -> SequenceState {
        let has_message = self.message().is_some();
        let has_attachments = self.attachments().next().is_some();
        match (has_message, has_attachments) {
            (false, false) => SequenceState::Empty,
            (true, false) => SequenceState::MessageOnly,
            (true, true) => SequenceState::MessageAndAttachments,
            (false, true) => SequenceState::AttachmentsOnly,
        }
    }

    /// Combines the current order with resolved periods.
    ///
    /// The first period becomes the payload's primary period. State is never
    /// modified, including on failure.
    ///
    /// # Errors
    /// - `NoContentItems` when the sequence is empty.
    /// - `MissingMessage` when only attachments are present.
    /// - `NoPeriods` when `resolved_periods` is empty.
    pub fn build_submission_payload(
        &self,
        resolved_periods: Vec<ResolvedPeriod>,
    ) -> Result<Payload, ValidationError> {
        if self.items.is_empty() {
            return Err(ValidationError::NoContentItems);
        }
        if !self.state().is_submittable() {
            return Err(ValidationError::MissingMessage);
        }
        Payload::new(resolved_periods, self.snapshot()).ok_or(ValidationError::NoPeriods)
    }

    fn publish(&mut self, mut next: Vec<SequenceItem>) {
        for (index, item) in next.iter_mut().enumerate() {
            item.sequence_no = index as u32 + 1;
        }
        self.items = next;
    }
}

#[cfg(test)]
mod tests {
    use super::{SequenceEngine, SequenceState};
    use crate::model::sequence_item::PayloadRef;

    #[test]
    fn state_tracks_message_and_attachment_presence() {
        let mut engine = SequenceEngine::new();
        assert_eq!(engine.state(), SequenceState::Empty);

        let attachment = engine.add_attachment(PayloadRef::file("a.pdf", "application/pdf"));
        assert_eq!(engine.state(), SequenceState::AttachmentsOnly);
        assert!(!engine.state().is_submittable());

        let message = engine.set_message(PayloadRef::text("hello"));
        assert_eq!(engine.state(), SequenceState::MessageAndAttachments);

        engine.remove(attachment);
        assert_eq!(engine.state(), SequenceState::MessageOnly);

        engine.remove(message);
        assert_eq!(engine.state(), SequenceState::Empty);
    }

    #[test]
    fn set_message_at_moves_existing_message_and_keeps_identity() {
        let mut engine = SequenceEngine::new();
        let a = engine.add_attachment(PayloadRef::text("a"));
        let message = engine.set_message(PayloadRef::text("v1"));
        assert_eq!(engine.position_of(message), Some(1));

        let moved = engine.set_message_at(PayloadRef::text("v2"), 0);
        assert_eq!(moved, message);
        assert_eq!(engine.position_of(message), Some(0));
        assert_eq!(engine.position_of(a), Some(1));
        assert_eq!(engine.len(), 2);

        let clamped = engine.set_message_at(PayloadRef::text("v3"), 99);
        assert_eq!(clamped, message);
        assert_eq!(engine.position_of(message), Some(1));
    }
}
