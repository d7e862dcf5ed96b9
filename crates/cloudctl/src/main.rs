// # cloudctl - cloud provider query tool
//
// A THIN integration layer over `cloudprovider-core`:
// 1. Reading options from the command line or environment variables
// 2. Registering the compiled-in providers, once
// 3. Creating the selected provider from its configuration file
// 4. Running one instance query and printing the result
//
// All provider logic lives in the provider crates.
//
// ## Configuration
//
// - `CLOUD_CONFIG` / `--config`: Provider configuration file
// - `CLOUD_PROVIDER` / `--provider`: Provider name (default: rightscale)
// - `CLOUD_LOG_LEVEL` / `--log-level`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export CLOUD_CONFIG=/etc/kubernetes/rightscale.conf
//
// cloudctl list web
// cloudctl ip web-1
// ```

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use cloudprovider_core::{CloudProvider, ProviderRegistry};
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CloudctlExitCode {
    /// Query succeeded
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// The query itself failed
    QueryError = 2,
}

impl From<CloudctlExitCode> for ExitCode {
    fn from(code: CloudctlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Debug, Parser)]
#[command(name = "cloudctl", version, about = "Query instances through a cloud provider")]
struct Cli {
    /// Provider configuration file
    #[arg(long, env = "CLOUD_CONFIG")]
    config: Option<PathBuf>,

    /// Registered provider to use
    #[arg(long, env = "CLOUD_PROVIDER", default_value = "rightscale")]
    provider: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CLOUD_LOG_LEVEL", default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Command {
    /// List instance names matching a filter
    List {
        /// Name filter (empty matches every instance)
        #[arg(default_value = "")]
        filter: String,
    },
    /// Print the private IP address of an instance
    Ip {
        /// Exact instance name
        name: String,
    },
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                CloudctlExitCode::ConfigError.into()
            } else {
                CloudctlExitCode::Success.into()
            };
        }
    };

    // Logs go to stderr; stdout carries only query results
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CloudctlExitCode::ConfigError.into();
    }

    let registry = ProviderRegistry::new();
    if let Err(e) = register_providers(&registry) {
        error!("Provider registration failed: {}", e);
        return CloudctlExitCode::ConfigError.into();
    }

    let provider = match create_provider(&registry, &cli) {
        Ok(provider) => provider,
        Err(e) => {
            error!("{:#}", e);
            return CloudctlExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CloudctlExitCode::ConfigError.into();
        }
    };

    match rt.block_on(run_query(provider.as_ref(), &cli.command)) {
        Ok(lines) => {
            for line in lines {
                println!("{}", line);
            }
            CloudctlExitCode::Success.into()
        }
        Err(e) => {
            error!("{:#}", e);
            CloudctlExitCode::QueryError.into()
        }
    }
}

/// Register every provider compiled into this binary
fn register_providers(registry: &ProviderRegistry) -> Result<()> {
    #[cfg(feature = "rightscale")]
    {
        cloudprovider_rightscale::register(registry)?;
    }

    debug!("Available providers: {:?}", registry.list_providers());
    Ok(())
}

/// Create the selected provider, handing it the config file if one is set
fn create_provider(registry: &ProviderRegistry, cli: &Cli) -> Result<Box<dyn CloudProvider>> {
    let mut file = match &cli.config {
        Some(path) => Some(
            File::open(path)
                .with_context(|| format!("Failed to open config file {}", path.display()))?,
        ),
        None => None,
    };

    let provider = registry
        .create_provider(&cli.provider, file.as_mut().map(|f| f as &mut dyn Read))
        .with_context(|| format!("Failed to create cloud provider '{}'", cli.provider))?;

    info!("Using cloud provider: {}", provider.provider_name());
    Ok(provider)
}

/// Run one instance query, returning the lines to print
async fn run_query(provider: &dyn CloudProvider, command: &Command) -> Result<Vec<String>> {
    let instances = provider.instances().ok_or_else(|| {
        anyhow!(
            "Cloud provider '{}' does not support instances",
            provider.provider_name()
        )
    })?;

    match command {
        Command::List { filter } => {
            let names = instances
                .list_instances(filter)
                .await
                .with_context(|| format!("Failed to list instances matching '{}'", filter))?;
            info!("Found {} instance(s)", names.len());
            Ok(names)
        }
        Command::Ip { name } => {
            let ip = instances
                .resolve_ip_address(name)
                .await
                .with_context(|| format!("Failed to resolve address of '{}'", name))?;
            Ok(vec![ip.to_string()])
        }
    }
}
