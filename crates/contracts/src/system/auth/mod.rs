//! Вход в систему и сессия на стороне клиента.
//!
//! Claims из JWT читаются без проверки подписи: это только подсказка для UI
//! (какие разделы показывать). Права проверяет бэкенд на каждом запросе.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::common::AggregateId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "token")]
    pub access_token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("token is not a three-part JWT")]
    MalformedToken,
    #[error("token payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not valid claims JSON: {0}")]
    Claims(#[from] serde_json::Error),
}

// ============================================================================
// Claims
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Employee,
    Distributor,
    Customer,
    Other(String),
}

impl Default for Role {
    fn default() -> Self {
        Role::Other(String::new())
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" | "superadmin" => Role::Admin,
            "employee" | "staff" => Role::Employee,
            "distributor" => Role::Distributor,
            "customer" | "user" => Role::Customer,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => "admin".into(),
            Role::Employee => "employee".into(),
            Role::Distributor => "distributor".into(),
            Role::Customer => "customer".into(),
            Role::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default)]
    pub sub: Option<AggregateId>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub exp: Option<i64>, // expiration timestamp
}

/// Прочитать claims из JWT без проверки подписи
pub fn decode_claims_unverified(token: &str) -> Result<TokenClaims, AuthError> {
    let mut parts = token.trim().split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(AuthError::MalformedToken),
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

// ============================================================================
// Session
// ============================================================================

/// Сессия текущего пользователя; передаётся явно через контекст UI
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub claims: TokenClaims,
}

impl Session {
    pub fn from_token(access_token: String) -> Result<Self, AuthError> {
        let claims = decode_claims_unverified(&access_token)?;
        Ok(Self {
            access_token,
            claims,
        })
    }

    pub fn role(&self) -> &Role {
        &self.claims.role
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.claims
            .exp
            .map(|exp| now.timestamp() >= exp)
            .unwrap_or(false)
    }

    /// Раздел выплат виден администраторам и сотрудникам
    pub fn can_manage_payments(&self) -> bool {
        matches!(self.claims.role, Role::Admin | Role::Employee)
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn token(payload: &str) -> String {
        format!("eyJhbGciOiJIUzI1NiJ9.{}.signature", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_role_and_exp() {
        let claims = decode_claims_unverified(&token(r#"{"sub": 7, "role": "Admin", "exp": 1700000000}"#)).unwrap();
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.sub, Some(AggregateId::from(7)));
        assert_eq!(claims.exp, Some(1_700_000_000));
    }

    #[test]
    fn test_padded_payload_accepted() {
        let padded = format!(
            "h.{}.s",
            base64::engine::general_purpose::URL_SAFE.encode(r#"{"role":"distributor"}"#)
        );
        assert_eq!(decode_claims_unverified(&padded).unwrap().role, Role::Distributor);
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(decode_claims_unverified("a.b"), Err(AuthError::MalformedToken)));
        assert!(matches!(decode_claims_unverified("a..c"), Err(AuthError::MalformedToken)));
        assert!(matches!(decode_claims_unverified("a.!!!.c"), Err(AuthError::Base64(_))));
        assert!(matches!(decode_claims_unverified(&token("not json")), Err(AuthError::Claims(_))));
    }

    #[test]
    fn test_unknown_role_kept() {
        let claims = decode_claims_unverified(&token(r#"{"role": "auditor"}"#)).unwrap();
        assert_eq!(claims.role, Role::Other("auditor".into()));
    }

    #[test]
    fn test_session_permissions_and_expiry() {
        let session = Session::from_token(token(r#"{"role": "employee", "exp": 100}"#)).unwrap();
        assert!(session.can_manage_payments());
        assert!(session.is_expired(Utc.timestamp_opt(100, 0).unwrap()));
        assert!(!session.is_expired(Utc.timestamp_opt(99, 0).unwrap()));

        let customer = Session::from_token(token(r#"{"role": "customer"}"#)).unwrap();
        assert!(!customer.can_manage_payments());
        assert!(!customer.is_expired(Utc::now()));
    }
}
