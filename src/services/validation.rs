// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User validation against the user service.
//!
//! Validation fails closed: any transport error, non-success status, or
//! malformed body counts as an invalid user.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AppError;

/// Answers whether a user ID refers to a real, active user.
#[async_trait]
pub trait UserValidator: Send + Sync {
    async fn validate(&self, user_id: &str) -> bool;
}

/// User validator backed by the user service's `/{id}/validate` endpoint.
#[derive(Clone)]
pub struct HttpUserValidator {
    http: reqwest::Client,
    base_url: String,
}

impl HttpUserValidator {
    /// Create a validator client with a fixed per-request timeout.
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(e.into()))?;

        Ok(Self { http, base_url })
    }
}

#[async_trait]
impl UserValidator for HttpUserValidator {
    async fn validate(&self, user_id: &str) -> bool {
        if user_id.is_empty() {
            tracing::warn!("Rejecting empty user id");
            return false;
        }

        let url = format!("{}/{}/validate", self.base_url, user_id);
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(user_id, error = %e, "User validation request failed");
                return false;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                user_id,
                status = %response.status(),
                "User validation rejected"
            );
            return false;
        }

        // The user service answers with a bare JSON boolean.
        match response.json::<bool>().await {
            Ok(valid) => {
                tracing::debug!(user_id, valid, "User validation result");
                valid
            }
            Err(e) => {
                tracing::error!(user_id, error = %e, "Malformed validation response");
                false
            }
        }
    }
}
