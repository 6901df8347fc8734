use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use azutils::{
    domain::{resource_id, DEFAULT_RESOURCE},
    infrastructure::{
        adapters::{
            default_sources,
            environment::{CLIENT_SECRET_VAR, ENVIRONMENT_VARS},
        },
        cli::{Cli, Commands, ConfigAction},
    },
    AuthorizationService,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "azutils=debug,info"
    } else {
        "azutils=info,warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Extract { component, id } => match resource_id::extract(component, &id) {
            Ok(part) => println!("{}", part),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Parse { id, json } => {
            let parts = resource_id::extract_all(&id);
            if json {
                let object: serde_json::Map<String, serde_json::Value> = parts
                    .iter()
                    .map(|(c, part)| (c.cli_name().to_string(), serde_json::json!(part)))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&object)?);
            } else if parts.is_empty() {
                println!("No known components found in '{}'", id);
            } else {
                for (component, part) in parts {
                    println!("{:<22} {}", format!("{}:", component), part);
                }
            }
        }

        Commands::Token {
            resource,
            tenant,
            show_token,
        } => {
            let service = AuthorizationService::with_sources(default_sources(tenant.as_deref()));
            let resource = resource.as_deref().unwrap_or(DEFAULT_RESOURCE);

            match service.authorize_with_resource(resource).await {
                Ok(authorization) => {
                    let token = authorization.access_token().await?;
                    println!("Source: {}", authorization.source());
                    println!("Scope: {}", authorization.scope());
                    match token.expires_on {
                        Some(expires_on) => println!("Expires: {}", expires_on.to_rfc3339()),
                        None => println!("Expires: unknown"),
                    }
                    if show_token {
                        println!("Token: {}", token.secret());
                    }
                }
                Err(e) => {
                    eprintln!("Error acquiring token: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::List => {
                println!("Configuration:");
                for name in ENVIRONMENT_VARS {
                    let status = match env::var(name) {
                        Ok(value) if !value.is_empty() && name != CLIENT_SECRET_VAR => {
                            format!("✓ {}", value)
                        }
                        Ok(value) if !value.is_empty() => "✓ Set".to_string(),
                        _ => "✗ Not set".to_string(),
                    };
                    println!("  {}: {}", name, status);
                }
            }

            ConfigAction::Sources => {
                println!("Credential sources (tried in order):");
                let service = AuthorizationService::with_sources(default_sources(None));
                for (i, source) in service.list_sources().into_iter().enumerate() {
                    println!("  {}. {}", i + 1, source);
                }
            }
        },
    }

    Ok(())
}
