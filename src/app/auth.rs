use crate::utils::error::EcoError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

/// HTTP Basic credentials. A missing or malformed header is rejected with 401.
#[derive(Debug, Clone)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for BasicCredentials
where
    S: Send + Sync,
{
    type Rejection = EcoError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(basic)) =
            TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
                .await
                .map_err(|_| EcoError::Unauthorized)?;

        Ok(Self {
            username: basic.username().to_string(),
            password: basic.password().to_string(),
        })
    }
}

/// Single-user credential store.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    username: String,
    password: String,
}

impl CredentialStore {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn verify(&self, credentials: &BasicCredentials) -> Result<(), EcoError> {
        if credentials.username == self.username && credentials.password == self.password {
            Ok(())
        } else {
            Err(EcoError::Unauthorized)
        }
    }
}
