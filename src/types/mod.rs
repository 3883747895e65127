//! Data model for the ingested datasets.
//!
//! Canonical string forms:
//! - Action identifier: `prefix:ActionName`, e.g. `s3:GetObject`
//! - Managed policy: keyed by ARN, e.g. `arn:aws:iam::aws:policy/ReadOnlyAccess`
//!
//! Ordering of identifiers is byte-wise on the full string form.

mod action_id;
mod dataset;
mod managed_policy;
mod service;

pub use action_id::ActionIdentifier;
pub use dataset::RawDataset;
pub use managed_policy::ManagedPolicyDocument;
pub use service::ServiceEntry;
