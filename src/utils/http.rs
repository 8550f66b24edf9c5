// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::Result;
use crate::models::GenerationConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &GenerationConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client_from_defaults() {
        assert!(create_async_client(&GenerationConfig::default()).is_ok());
    }
}
