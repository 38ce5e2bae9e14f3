//! Configuration management commands.

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &mut Context) -> Result<()> {
    match args.command.unwrap_or(ConfigCommand::Show) {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        let mut shown = ctx.config.clone();
        shown.api.token = shown.api.token.map(|_| "<set>".to_string());
        ctx.output.json(&shown);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    ctx.output.kv("file", &ctx.config_path.display().to_string());
    ctx.output.kv("currency", &ctx.config.currency);

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.config.api.base_url);
    ctx.output.kv("connect_timeout_secs", &ctx.config.api.connect_timeout_secs.to_string());
    ctx.output.kv("request_timeout_secs", &ctx.config.api.request_timeout_secs.to_string());
    ctx.output.kv(
        "token",
        if ctx.config.api.token.is_some() { "<set>" } else { "<none>" },
    );

    ctx.output.info("[poll]");
    ctx.output.kv("interval_secs", &ctx.config.poll.interval_secs.to_string());

    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level);
    ctx.output.kv("json", &ctx.config.log.json.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = &ctx.config_path;
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    std::fs::write(path, generate_default_config())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    ctx.output.success(&format!("Wrote {}", path.display()));
    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let Some(value) = ctx.config.get(key) else {
        bail!("Unknown config key '{}'", key);
    };

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &mut Context) -> Result<()> {
    ctx.config.set(key, value)?;
    ctx.config.save(&ctx.config_path)?;
    ctx.output.success(&format!("Set {} in {}", key, ctx.config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let problems = ctx.config.validate();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "valid": problems.is_empty(), "problems": problems }));
    } else if problems.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        for problem in &problems {
            ctx.output.warn(problem);
        }
    }

    if !problems.is_empty() {
        bail!("{} configuration problem(s)", problems.len());
    }
    Ok(())
}
