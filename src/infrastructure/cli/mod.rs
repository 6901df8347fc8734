use clap::{Parser, Subcommand};

use crate::domain::IdComponent;

#[derive(Parser)]
#[command(name = "azutils")]
#[command(about = "Azure resource ID parsing and credential helpers")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract one component from a resource ID
    Extract {
        /// Component (subscription, resource-group, reservation-order, reservation,
        /// host-group, vm, sql-server)
        component: IdComponent,

        /// Resource ID
        id: String,
    },

    /// Show every component found in a resource ID
    Parse {
        /// Resource ID
        id: String,

        /// Print the components as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Acquire an access token through the credential chain
    Token {
        /// Resource the token is for
        #[arg(short, long)]
        resource: Option<String>,

        /// Tenant used by the Azure CLI credential
        #[arg(short, long)]
        tenant: Option<String>,

        /// Print the raw access token
        #[arg(long)]
        show_token: bool,
    },

    /// Inspect credential configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// List which AZURE_* variables are set
    List,

    /// List credential sources in the order they are tried
    Sources,
}
