//! Reparto CLI - command line client for the delivery marketplace.
//!
//! Commands:
//! - `reparto login` - Log in and save the session token
//! - `reparto catalog` - List a negocio's products
//! - `reparto order` - Build a cart and place an order
//! - `reparto pending` - Show registrations awaiting approval
//! - `reparto approve` / `reparto reject` - Decide on a registration
//! - `reparto deliveries` - Show and advance assigned orders
//! - `reparto config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    ApprovalArgs, CatalogArgs, ConfigArgs, DeliveriesArgs, LoginArgs, OrderArgs, PendingArgs,
};
use reparto_commerce::approval::ApprovalDecision;

/// Reparto - order, approve and deliver from the terminal
#[derive(Parser)]
#[command(name = "reparto")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login(LoginArgs),

    /// List a negocio's products
    Catalog(CatalogArgs),

    /// Fill a cart and place an order
    Order(OrderArgs),

    /// Show negocios and repartidores awaiting approval
    Pending(PendingArgs),

    /// Approve a pending registration
    Approve(ApprovalArgs),

    /// Reject a pending registration
    Reject(ApprovalArgs),

    /// Show orders assigned to you
    Deliveries(DeliveriesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let mut ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    logging::init(&ctx.config.log, cli.verbose);

    let result = match cli.command {
        Commands::Login(args) => commands::login::run(args, &mut ctx).await,
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Pending(args) => commands::pending::run(args, &ctx).await,
        Commands::Approve(args) => commands::approve::run(args, ApprovalDecision::Approve, &ctx).await,
        Commands::Reject(args) => commands::approve::run(args, ApprovalDecision::Reject, &ctx).await,
        Commands::Deliveries(args) => commands::deliveries::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &mut ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
