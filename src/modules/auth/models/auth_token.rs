use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Entity, Result};

/// Cached OAuth access token
///
/// Expired rows are never deleted; the newest row by `expired_at` is the only
/// candidate for reuse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AuthToken {
    /// Token id from the OAuth response
    pub jti: String,

    pub access_token: String,

    pub token_type: Option<String>,

    /// Absolute expiry, computed once when the token is written
    pub expired_at: DateTime<Utc>,

    pub scope: Option<String>,
}

/// Client-credentials response of the OAuth endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPayload {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    /// Lifetime in seconds
    pub expires_in: i64,
    pub scope: Option<String>,
    pub jti: Option<String>,
}

impl AuthToken {
    /// Build a row from an OAuth response received at `received_at`
    ///
    /// `expires_in` is converted to an absolute timestamp here so that the
    /// expiry check never depends on when the row was created.
    pub fn from_payload(payload: TokenPayload, received_at: DateTime<Utc>) -> Result<Self> {
        let access_token = payload
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::auth_unavailable("response carries no access_token"))?;

        // DATETIME columns keep whole seconds only
        let expired_at = (received_at + Duration::seconds(payload.expires_in)).trunc_subsecs(0);

        Ok(Self {
            jti: payload
                .jti
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            access_token,
            token_type: payload.token_type,
            expired_at,
            scope: payload.scope,
        })
    }

    /// A token is unusable once its expiry is at or before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expired_at <= now
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

impl Entity for AuthToken {
    type Id = String;
    const KIND: &'static str = "auth_token";

    fn id(&self) -> String {
        self.jti.clone()
    }
}
