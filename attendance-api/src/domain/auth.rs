use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque bearer credential returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Tokens end up in status lines and logs via Debug; never print the secret.
impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[derive(Debug, Serialize)]
pub struct HrCredentials<'a> {
    pub name: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EmployeeCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login response. The backend may include other fields (e.g. `token_type`);
/// only the access token is used.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: Option<String>,
}

impl LoginResponse {
    pub fn into_token(self) -> Option<BearerToken> {
        self.access_token
            .filter(|token| !token.is_empty())
            .map(BearerToken::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_token() {
        let token = BearerToken::new("secret-value");
        assert_eq!(format!("{:?}", token), "BearerToken(***)");
        assert_eq!(token.authorization_header(), "Bearer secret-value");
    }

    #[test]
    fn login_response_without_token_yields_none() {
        let resp: LoginResponse = serde_json::from_str(r#"{"detail":"bad"}"#).unwrap();
        assert!(resp.into_token().is_none());

        let resp: LoginResponse = serde_json::from_str(r#"{"access_token":""}"#).unwrap();
        assert!(resp.into_token().is_none());

        let resp: LoginResponse =
            serde_json::from_str(r#"{"access_token":"abc","token_type":"bearer"}"#).unwrap();
        assert_eq!(resp.into_token(), Some(BearerToken::new("abc")));
    }
}
