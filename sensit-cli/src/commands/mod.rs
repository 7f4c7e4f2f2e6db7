//! CLI command implementations.

pub mod devices;
pub mod history;
pub mod login;

use std::time::Duration;

use dialoguer::Password;
use indicatif::{ProgressBar, ProgressStyle};

use sensit_core::error::{SensitError, SensitResult};
use sensit_services::{AuthMethod, Credentials, Session};

use crate::Context;

/// Work out how to authenticate: flags, then environment, then config, then a prompt.
pub fn auth_method(ctx: &Context) -> SensitResult<AuthMethod> {
    let credentials = Credentials {
        token: ctx.token.clone(),
        email: ctx.email.clone(),
        password: None,
    };
    credentials
        .with_env()
        .with_config(&ctx.config)
        .resolve(prompt_password)
}

/// Interactive password prompt.
pub fn prompt_password(email: &str) -> SensitResult<String> {
    Password::new()
        .with_prompt(format!("Password for {email}"))
        .interact()
        .map_err(|e| SensitError::Internal(e.to_string()))
}

/// Authenticate and discover devices behind a spinner.
pub async fn open_session(ctx: &Context) -> SensitResult<Session> {
    let auth = auth_method(ctx)?;
    let pb = spinner("Connecting to Sens'it...");
    let session = Session::open(&ctx.config, auth).await;
    pb.finish_and_clear();
    session
}

/// A steady-ticking spinner for a single awaited call.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Format an optional value for a table cell.
pub fn or_dash(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}
