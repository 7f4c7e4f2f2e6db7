//! Credential resolution.
//!
//! Precedence, first match wins:
//! 1. an explicit token
//! 2. `SENSIT_TOKEN`
//! 3. a token stored in the config file
//! 4. e-mail plus password, the password taken from the caller,
//!    `SENSIT_PASS`, or an interactive prompt, in that order

use sensit_core::config::AppConfig;
use sensit_core::constants::{PASSWORD_ENV_VAR, TOKEN_ENV_VAR};
use sensit_core::error::{SensitError, SensitResult};

/// How a session authenticates.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// A bearer token used as is.
    Token(String),
    /// E-mail and clear password, exchanged for a token.
    Password { email: String, password: String },
}

impl std::fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMethod::Token(_) => f.write_str("Token(..)"),
            AuthMethod::Password { email, .. } => {
                f.debug_struct("Password").field("email", email).finish_non_exhaustive()
            }
        }
    }
}

/// Whatever credential material the caller has gathered so far.
#[derive(Clone, Default)]
pub struct Credentials {
    pub token: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Credentials {
    /// Credentials from an explicit token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::default()
        }
    }

    /// Credentials from an e-mail and, optionally, a password.
    pub fn with_login(email: impl Into<String>, password: Option<String>) -> Self {
        Self {
            token: None,
            email: Some(email.into()),
            password,
        }
    }

    /// Fill gaps from the process environment.
    pub fn with_env(self) -> Self {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Fill gaps from `lookup`, which maps an environment variable name to its value.
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        self.token = non_empty(self.token).or_else(|| non_empty(lookup(TOKEN_ENV_VAR)));
        self.password = non_empty(self.password).or_else(|| non_empty(lookup(PASSWORD_ENV_VAR)));
        self
    }

    /// Fill gaps from the stored configuration.
    pub fn with_config(mut self, config: &AppConfig) -> Self {
        self.token = non_empty(self.token).or_else(|| config.stored_token().map(String::from));
        self.email = non_empty(self.email).or_else(|| config.stored_email().map(String::from));
        self
    }

    /// Pick the authentication method. `prompt` is asked for the password
    /// only when an e-mail is known but no password is.
    pub fn resolve<F>(self, prompt: F) -> SensitResult<AuthMethod>
    where
        F: FnOnce(&str) -> SensitResult<String>,
    {
        if let Some(token) = non_empty(self.token) {
            return Ok(AuthMethod::Token(token));
        }

        let email = non_empty(self.email).ok_or_else(|| {
            SensitError::Authentication(format!(
                "no credential: pass a token, set {TOKEN_ENV_VAR}, or give an e-mail"
            ))
        })?;

        let password = match non_empty(self.password) {
            Some(p) => p,
            None => prompt(&email)?,
        };
        if password.is_empty() {
            return Err(SensitError::Authentication("empty password".into()));
        }

        Ok(AuthMethod::Password { email, password })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &self.token.as_ref().map(|_| ".."))
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| ".."))
            .finish()
    }
}
