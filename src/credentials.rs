use std::fmt;

use crate::constant::*;

/// Key material for the upstream API, loaded once at startup.
///
/// Any field may be absent. Signing still goes ahead with an empty value in
/// its place, so a missing key only shows up as a rejected upstream call and
/// as a `false` flag in [`CredentialStatus`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
    access_key_id: Option<String>,
    secret_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CredentialStatus {
    pub api_key_set: bool,
    pub access_key_set: bool,
    pub secret_key_set: bool,
}

impl Credentials {
    #[inline]
    pub fn new(
        api_key: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            api_key: non_empty(api_key.into()),
            access_key_id: non_empty(access_key_id.into()),
            secret_key: non_empty(secret_key.into()),
        }
    }

    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().and_then(non_empty);

        Self {
            api_key: var(API_TOKEN_ENV),
            access_key_id: var(ACCESS_KEY_ENV),
            secret_key: var(SECRET_KEY_ENV),
        }
    }

    #[inline]
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or("")
    }

    #[inline]
    pub fn access_key_id(&self) -> &str {
        self.access_key_id.as_deref().unwrap_or("")
    }

    #[inline]
    pub fn secret_key(&self) -> &str {
        self.secret_key.as_deref().unwrap_or("")
    }

    pub fn status(&self) -> CredentialStatus {
        CredentialStatus {
            api_key_set: self.api_key.is_some(),
            access_key_set: self.access_key_id.is_some(),
            secret_key_set: self.secret_key.is_some(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("api_key", &redact(&self.api_key))
            .field("access_key_id", &self.access_key_id)
            .field("secret_key", &redact(&self.secret_key))
            .finish()
    }
}

#[inline]
fn non_empty(v: String) -> Option<String> {
    if v.is_empty() {
        None
    } else {
        Some(v)
    }
}
