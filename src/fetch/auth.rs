//! Credentials for the GitHub API.

use crate::Result;
use core::fmt;
use ohno::{IntoAppError, bail};
use reqwest::header::HeaderValue;
use std::env;

/// Environment variable holding the personal access token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Something that can authorize an outgoing API request.
///
/// The fetch loop only ever sees this trait, so alternate credential sources
/// (keychains, files, test stubs) can be substituted without touching it.
pub trait Credentials {
    /// Produce the value for the `Authorization` header.
    fn authorization(&self) -> Result<HeaderValue>;
}

/// A static personal access token, sent as `token <...>`.
#[derive(Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Read the token from [`TOKEN_ENV_VAR`].
    ///
    /// An unset or empty variable is a fatal startup error; the message tells
    /// the user where to get a token.
    pub fn from_env() -> Result<Self> {
        match env::var(TOKEN_ENV_VAR) {
            Ok(token) if !token.is_empty() => Ok(Self::new(token)),
            _ => bail!(
                "{TOKEN_ENV_VAR} is not set! Without it, there is no accessing GitHub. Please visit the following for more info: \
                 https://docs.github.com/en/authentication/keeping-your-account-and-data-secure/managing-your-personal-access-tokens"
            ),
        }
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken").field("token", &"<redacted>").finish()
    }
}

impl Credentials for BearerToken {
    fn authorization(&self) -> Result<HeaderValue> {
        let mut value =
            HeaderValue::from_str(&format!("token {}", self.token)).into_app_err("constructing the authorization header")?;
        value.set_sensitive(true);
        Ok(value)
    }
}
