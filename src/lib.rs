// src/lib.rs
pub use catalog::{ActionCatalog, ManagedPolicyCatalog};
pub use config::{Envelope, OutputLayout, PipelineConfig, Source};
pub use emitter::Artifact;
pub use envelope::extract_embedded_literal;
pub use error::{IngestError, Stage};
pub use fetcher::{Fetcher, HttpFetcher, StaticFetcher};
pub use parser::parse_jsonc;
pub use pipeline::{ActionsReport, ManagedPoliciesReport, Pipeline, RunReport};
pub use timers::StageTimings;
pub use types::{ActionIdentifier, ManagedPolicyDocument, RawDataset, ServiceEntry};

pub mod catalog;
pub mod config;
pub mod emitter;
mod envelope;
mod error;
mod fetcher;
pub mod normalizer;
mod parser;
pub mod pipeline;
mod timers;
mod types;

#[cfg(test)]
mod tests;
