// src/lib.rs

//! Label Writer Library
//!
//! Labels uploaded images with a vision service and asks a chat model to
//! write one article about everything it saw.

pub mod clients;
pub mod error;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod utils;
