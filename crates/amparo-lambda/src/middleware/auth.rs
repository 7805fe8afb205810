use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use amparo_core::store_keys;

/// Bearer-subject middleware.
///
/// Extracts the `Authorization: Bearer <token>` header and inserts `AuthUser`
/// into request extensions for handlers to use. Token verification happens
/// in the API Gateway authorizer in front of this function; the subject here
/// is only used to scope a user's records.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, StatusCode> {
    let user = {
        let auth_header = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or(StatusCode::UNAUTHORIZED)?;

        if token.is_empty() {
            return Err(StatusCode::UNAUTHORIZED);
        }

        identify(token).ok_or(StatusCode::UNAUTHORIZED)?
    };

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Groups allowed to list therapists in the directory.
const DIRECTORY_EDITOR_GROUPS: &[&str] = &["admin", "terapeuta"];

/// Authenticated user. `sub` is safe to store and log; it is never the token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub sub: String,
    pub groups: Vec<String>,
}

impl AuthUser {
    pub fn can_edit_directory(&self) -> bool {
        self.groups
            .iter()
            .any(|g| DIRECTORY_EDITOR_GROUPS.contains(&g.as_str()))
    }
}

#[derive(Deserialize)]
struct Claims {
    sub: String,
    #[serde(default, rename = "cognito:groups")]
    groups: Vec<String>,
}

/// Non-secret identity for a bearer token.
///
/// A JWT yields its `sub` claim, which must be usable as a key segment, and
/// its Cognito groups. Any other token is reduced to the hex SHA-256 of its
/// bytes and carries no groups.
pub fn identify(token: &str) -> Option<AuthUser> {
    let parts: Vec<&str> = token.split('.').collect();
    if let [_, payload, _] = parts.as_slice() {
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        let claims: Claims = serde_json::from_slice(&bytes).ok()?;
        if !store_keys::is_key_segment(&claims.sub) {
            return None;
        }
        return Some(AuthUser {
            sub: claims.sub,
            groups: claims.groups,
        });
    }
    Some(AuthUser {
        sub: hex::encode(Sha256::digest(token.as_bytes())),
        groups: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(claims: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256"}"#),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    fn sub(token: &str) -> Option<String> {
        identify(token).map(|u| u.sub)
    }

    #[test]
    fn jwt_yields_sub_claim() {
        let token = jwt(r#"{"sub":"5f1c2d3e-aaaa-bbbb","token_use":"id"}"#);
        let user = identify(&token).unwrap();
        assert_eq!(user.sub, "5f1c2d3e-aaaa-bbbb");
        assert!(user.groups.is_empty());
        assert!(!user.can_edit_directory());
    }

    #[test]
    fn cognito_groups_grant_directory_edits() {
        let token = jwt(r#"{"sub":"t-1","cognito:groups":["terapeuta"]}"#);
        assert!(identify(&token).unwrap().can_edit_directory());
        let token = jwt(r#"{"sub":"p-1","cognito:groups":["paciente"]}"#);
        assert!(!identify(&token).unwrap().can_edit_directory());
    }

    #[test]
    fn jwt_with_unsafe_sub_is_rejected() {
        assert_eq!(sub(&jwt(r#"{"sub":"../other-user"}"#)), None);
        assert_eq!(sub(&jwt(r#"{"no_sub":true}"#)), None);
        assert_eq!(sub("aaa.%%%.ccc"), None);
    }

    #[test]
    fn opaque_token_is_hashed() {
        let user = identify("opaque-secret-token").unwrap();
        assert_eq!(user.sub.len(), 64);
        assert!(!user.sub.contains("opaque-secret-token"));
        assert!(!user.can_edit_directory());
        assert_eq!(sub("opaque-secret-token").unwrap(), user.sub);
        assert_ne!(sub("another-token").unwrap(), user.sub);
    }
}
