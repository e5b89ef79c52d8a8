//! Domain model for payroll period selection and submission content.
//!
//! # Responsibility
//! - Define financial-year/month value types and their derived labels.
//! - Define the ordered content item shape shared by engine and payload.
//!
//! # Invariants
//! - Financial-year labels are always derived from the start year.
//! - Sequence items are identified by a stable `ItemId`, never by position.

pub mod payload;
pub mod period;
pub mod plant;
pub mod sequence_item;
