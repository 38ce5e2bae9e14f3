//! Log in and persist the session token.

use anyhow::{Context as _, Result};
use dialoguer::{Input, Password};
use reparto_data::MarketplaceApi;

use super::LoginArgs;
use crate::context::Context;

const PASSWORD_ENV: &str = "REPARTO_PASSWORD";

/// Run the login command.
pub async fn run(args: LoginArgs, ctx: &mut Context) -> Result<()> {
    let api = ctx.api();

    if args.logout {
        api.logout();
        ctx.save_token()?;
        ctx.output.success("Logged out");
        return Ok(());
    }

    let email = match args.email {
        Some(email) => email,
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = if args.password_env {
        std::env::var(PASSWORD_ENV).with_context(|| format!("{} is not set", PASSWORD_ENV))?
    } else {
        Password::new().with_prompt("Password").interact()?
    };

    let spinner = ctx.output.spinner("Logging in...");
    let result = api.login(&email, &password).await;
    spinner.finish_and_clear();
    let session = result.context("Login failed")?;

    ctx.save_token()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "role": session.role,
            "user_id": session.user_id,
        }));
    } else {
        ctx.output.success(&format!("Logged in as {} ({})", email, session.role));
        ctx.output.debug(&format!("Token saved to {}", ctx.config_path.display()));
        if !session.role.can_order() {
            ctx.output.info("This account cannot place orders");
        }
    }
    Ok(())
}
