//! Backend credentials.

use std::fmt;

use thiserror::Error;

/// Environment variable holding the backend username.
pub const USERNAME_VAR: &str = "STYLES_BACKEND_USERNAME";

/// Environment variable holding the backend password.
pub const PASSWORD_VAR: &str = "STYLES_BACKEND_PASSWORD";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("To access styles backend, {what} should be specified via {variable} environment variable")]
    Missing {
        what: &'static str,
        variable: &'static str,
    },
}

/// Username and password for the password grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads credentials from [`USERNAME_VAR`] and [`PASSWORD_VAR`].
    pub fn from_env() -> Result<Self, CredentialsError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads credentials through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CredentialsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup(USERNAME_VAR).ok_or(CredentialsError::Missing {
            what: "username",
            variable: USERNAME_VAR,
        })?;
        let password = lookup(PASSWORD_VAR).ok_or(CredentialsError::Missing {
            what: "password",
            variable: PASSWORD_VAR,
        })?;

        Ok(Self { username, password })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
