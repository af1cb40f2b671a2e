//! Bearer-credential resolution.
//!
//! Transport-level token extraction belongs to the excluded client layer;
//! this registry is the logical mapping from a presented credential to the
//! authenticated account. Absence or invalidity is the 401-equivalent
//! `Unauthorized` outcome.

use std::collections::HashMap;
use std::sync::Mutex;

use pathway_core::{AccountId, DomainError};

/// Maps bearer tokens to accounts.
#[derive(Default)]
pub struct TokenRegistry {
    tokens: Mutex<HashMap<String, AccountId>>,
}

impl TokenRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token for an account.
    pub fn register(&self, token: impl Into<String>, account: AccountId) {
        self.tokens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(token.into(), account);
    }

    /// Resolve a presented credential. Accepts the raw token or the
    /// "Bearer <token>" header form.
    pub fn authenticate(&self, credential: &str) -> Result<AccountId, DomainError> {
        let token = credential
            .strip_prefix("Bearer ")
            .unwrap_or(credential)
            .trim();
        if token.is_empty() {
            return Err(DomainError::Unauthorized("missing credential".into()));
        }
        self.tokens
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(token)
            .copied()
            .ok_or_else(|| DomainError::Unauthorized("unknown credential".into()))
    }
}
