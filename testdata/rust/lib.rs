//! Token validation.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::Settings;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub exp: u64,
}

/// Errors returned by token validation.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
}

/// Something that can check a token.
pub trait Verifier {
    fn verify(&self, token: &str) -> bool;
}

pub(crate) struct Cache {
    entries: HashMap<String, Claims>,
}

/// Validates a JWT token and returns the claims.
pub fn validate_token(token: &str) -> Result<Claims, TokenError> {
    let key = DecodingKey::from_secret(Settings::secret().as_bytes());
    let data = decode::<Claims>(token, &key, &Validation::default()).map_err(|e| {
        if e.to_string().contains("Expired") {
            TokenError::Expired
        } else {
            TokenError::Invalid(e.to_string())
        }
    })?;
    Ok(data.claims)
}

fn internal_helper(data: &str) -> bool {
    !data.is_empty()
}
