//! Admission Module
//!
//! Sequences pre-validation and pre-execution for inbound transactions and
//! hands survivors to the execution pipeline.

mod pipeline;
pub use pipeline::AdmissionPipeline;
