//! CLI command implementations.

pub mod approve;
pub mod catalog;
pub mod config;
pub mod deliveries;
pub mod login;
pub mod order;
pub mod pending;

use clap::{Args, Subcommand, ValueEnum};
use reparto_commerce::approval::ApprovalKind;

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Read the password from the REPARTO_PASSWORD environment variable.
    #[arg(long)]
    pub password_env: bool,

    /// Forget the saved session instead of logging in.
    #[arg(long, conflicts_with_all = ["email", "password_env"])]
    pub logout: bool,
}

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Negocio whose products to list.
    pub negocio: i64,
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Negocio to order from.
    #[arg(short, long)]
    pub negocio: i64,

    /// Product to add, one unit per occurrence (e.g. `--add 4 --add 4`).
    #[arg(short, long = "add", value_name = "PRODUCT_ID", required = true)]
    pub add: Vec<i64>,

    /// Product line to drop after adding.
    #[arg(long = "remove", value_name = "PRODUCT_ID")]
    pub remove: Vec<i64>,

    /// Delivery address (prompted when omitted).
    #[arg(long)]
    pub address: Option<String>,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Show the order without placing it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Which approval queue to act on.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    Negocio,
    Repartidor,
}

impl From<KindArg> for ApprovalKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Negocio => ApprovalKind::Negocio,
            KindArg::Repartidor => ApprovalKind::Repartidor,
        }
    }
}

/// Arguments for the pending command.
#[derive(Args)]
pub struct PendingArgs {
    /// Only show one queue.
    #[arg(short, long, value_enum)]
    pub kind: Option<KindArg>,

    /// Keep refreshing until Ctrl-C.
    #[arg(short, long)]
    pub watch: bool,
}

/// Arguments for the approve and reject commands.
#[derive(Args)]
pub struct ApprovalArgs {
    /// Kind of registration.
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Registration id.
    pub id: i64,

    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the deliveries command.
#[derive(Args)]
pub struct DeliveriesArgs {
    #[command(subcommand)]
    pub command: Option<DeliveriesCommand>,

    /// Include delivered and cancelled orders.
    #[arg(short, long)]
    pub all: bool,

    /// Keep refreshing until Ctrl-C.
    #[arg(short, long)]
    pub watch: bool,
}

#[derive(Subcommand)]
pub enum DeliveriesCommand {
    /// Move an order to its next status
    Advance {
        /// Order id.
        id: i64,
    },

    /// Set an order's status explicitly
    Status {
        /// Order id.
        id: i64,

        /// New status (aceptado, en_camino, entregado, cancelado).
        status: String,
    },
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Write a starter config file
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },

    /// Get a configuration value
    Get {
        /// Configuration key (e.g. api.base_url).
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key.
        key: String,

        /// Value to set.
        value: String,
    },

    /// Check the configuration for mistakes
    Validate,
}
