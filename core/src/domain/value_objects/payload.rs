//! Caller-supplied claims and the result of verifying them.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{DomainError, VerificationError};

/// Claim carrying the owning user id
pub const USER_ID_CLAIM: &str = "userId";

/// Claim carrying the token a refreshed pair was issued from
pub const PREVIOUS_TOKEN_CLAIM: &str = "token";

/// Fallback claim for the owning user id
const SUBJECT_CLAIM: &str = "sub";

/// Registered claims managed by the signer
const ISSUED_AT_CLAIM: &str = "iat";
const EXPIRES_AT_CLAIM: &str = "exp";

/// Opaque JSON object of claims to embed in a token
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Creates an empty payload
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Adds a claim, replacing any previous value
    pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builds the payload for a refresh
    ///
    /// The previous token is embedded verbatim under [`PREVIOUS_TOKEN_CLAIM`].
    /// When the owning user is known it is carried over under
    /// [`USER_ID_CLAIM`] so the new record keeps its owner.
    pub fn with_previous_token(token: &str, user_id: Option<String>) -> Self {
        let payload = Self::new().with_claim(PREVIOUS_TOKEN_CLAIM, token);
        match user_id {
            Some(user_id) => payload.with_claim(USER_ID_CLAIM, user_id),
            None => payload,
        }
    }

    /// Looks up a claim
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Checks whether a claim is present
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Checks whether the payload has no claims
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Owning user id: `userId`, falling back to `sub`
    ///
    /// String and numeric ids are accepted; anything else is ignored.
    pub fn user_id(&self) -> Option<String> {
        [USER_ID_CLAIM, SUBJECT_CLAIM]
            .iter()
            .filter_map(|claim| self.0.get(*claim))
            .find_map(|value| match value {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    /// The token this payload was refreshed from, if any
    pub fn previous_token(&self) -> Option<&str> {
        self.0.get(PREVIOUS_TOKEN_CLAIM).and_then(Value::as_str)
    }

    /// Borrows the underlying claim map
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Payload {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::Signing {
                message: format!("payload must be a JSON object, got {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Claims of a token whose signature and expiry have been checked
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedClaims {
    /// Caller claims, without the `iat`/`exp` added at signing time
    pub payload: Payload,

    /// When the token was issued, if it says so
    pub issued_at: Option<DateTime<Utc>>,

    /// When the token expires
    pub expires_at: DateTime<Utc>,
}

impl VerifiedClaims {
    /// Splits decoded claims into caller payload and registered times
    pub fn from_claims(mut claims: Map<String, Value>) -> Result<Self, VerificationError> {
        let expires_at = claims
            .remove(EXPIRES_AT_CLAIM)
            .as_ref()
            .and_then(Value::as_i64)
            .and_then(timestamp)
            .ok_or_else(|| VerificationError::MissingClaim {
                claim: EXPIRES_AT_CLAIM.to_string(),
            })?;

        let issued_at = claims
            .remove(ISSUED_AT_CLAIM)
            .as_ref()
            .and_then(Value::as_i64)
            .and_then(timestamp);

        Ok(Self {
            payload: Payload(claims),
            issued_at,
            expires_at,
        })
    }

    /// Owning user id of the verified payload
    pub fn user_id(&self) -> Option<String> {
        self.payload.user_id()
    }

    /// Lifetime the token was issued with, when `iat` is present
    pub fn lifetime(&self) -> Option<chrono::Duration> {
        self.issued_at.map(|iat| self.expires_at - iat)
    }
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_opt(secs, 0).single()
}
