//! Login command - exchange credentials for a token.

use console::style;
use tracing::info;

use sensit_core::error::SensitResult;
use sensit_services::AuthMethod;

use crate::{Context, OutputFormat};

pub async fn run(mut ctx: Context, save: bool) -> SensitResult<()> {
    let auth = super::auth_method(&ctx)?;
    let email = match &auth {
        AuthMethod::Password { email, .. } => Some(email.clone()),
        AuthMethod::Token(_) => None,
    };

    let pb = super::spinner("Authenticating...");
    let session = sensit_services::Session::open(&ctx.config, auth).await;
    pb.finish_and_clear();
    let session = session?;

    let token = session.token().unwrap_or_default().to_string();
    let device_count = session.devices().len();

    if save {
        ctx.config.auth.token = token.clone();
        if let Some(ref email) = email {
            ctx.config.auth.email = email.clone();
        }
        ctx.config.save_to_file(&ctx.config_path)?;
        info!("saved credentials to {}", ctx.config_path.display());
    }

    match ctx.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "status": "authenticated",
                    "token": token,
                    "devices": device_count,
                    "saved": save,
                })
            );
        }
        OutputFormat::Text => {
            println!("  {} Authenticated.", style("OK").green().bold());
            println!("  Token:   {token}");
            println!("  Devices: {device_count}");
            if save {
                println!(
                    "  {} Config saved to {}",
                    style("OK").green(),
                    ctx.config_path.display()
                );
            }
        }
    }

    Ok(())
}
