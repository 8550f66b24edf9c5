// src/models/mod.rs

//! Domain models for the label writer.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod article;
mod config;
mod event;
mod label;
mod response;

// Re-export all public types
pub use article::{Article, GENERATION_FAILED_MESSAGE, NO_CONTENT_MESSAGE};
pub use config::{API_KEY_ENV, ApiKey, Config, EventConfig, GenerationConfig, VisionConfig};
pub use event::{EventRecord, S3Bucket, S3Entity, S3Object, UploadEvent, UploadRecord};
pub use label::{Label, LabelBatch};
pub use response::{COMPLETION_MESSAGE, ResponseBody, ResponseEnvelope};
