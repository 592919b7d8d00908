//! Remote Config CLI - inspect and edit saved remote connection configurations
//!
//! Records live in `connections.json` in the data directory; per-host
//! passwords live in the OS keychain. Certificate and key material is never
//! printed.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use remote_config_core::{
    AddressFamily, ConnectionConfigManager, ConnectionConfiguration, JsonFileStore,
    KeychainBackend, MemorySecretBackend, SecretBackend, SettingsManager,
};

/// Remote Config - saved connection credentials for remote hosts
#[derive(Parser, Debug)]
#[command(name = "remote-config")]
#[command(author = "Symbia Labs")]
#[command(version = "0.1.0")]
#[command(about = "Manage saved connection configurations for remote hosts")]
struct Args {
    /// Directory holding connections.json and settings.json
    #[arg(long, env = "REMOTE_CONFIG_DIR")]
    data_dir: Option<PathBuf>,

    /// Delete the keychain secret when clearing a host
    #[arg(long)]
    purge_secrets: bool,

    /// Keep secrets in memory instead of the OS keychain (for headless testing)
    #[arg(long)]
    ephemeral_secrets: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the saved configuration for a host or IP address
    Get {
        host: String,
    },
    /// Save a configuration under its host name and an IP alias
    Set {
        #[arg(long)]
        host: String,

        #[arg(long)]
        port: u16,

        /// Address family hint (4 or 6)
        #[arg(long, value_parser = parse_family)]
        family: Option<AddressFamily>,

        /// Certificate authority certificate (PEM file)
        #[arg(long, requires_all = ["cert", "key"])]
        ca: Option<PathBuf>,

        /// Client certificate (PEM file)
        #[arg(long, requires_all = ["ca", "key"])]
        cert: Option<PathBuf>,

        /// Client private key (PEM file)
        #[arg(long, requires_all = ["ca", "cert"])]
        key: Option<PathBuf>,

        /// IP address alias (defaults to the host name)
        #[arg(long)]
        ip: Option<String>,
    },
    /// Remove the saved configuration for a host or IP address
    Clear {
        host: String,
    },
    /// List hosts and IP aliases with saved configurations
    List,
}

fn parse_family(value: &str) -> Result<AddressFamily, String> {
    let number: u8 = value
        .parse()
        .map_err(|_| format!("invalid address family: {}", value))?;
    AddressFamily::try_from(number)
}

async fn read_pem(path: Option<PathBuf>) -> Result<Option<Vec<u8>>, std::io::Error> {
    match path {
        Some(path) => Ok(Some(tokio::fs::read(&path).await?)),
        None => Ok(None),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let data_dir = match args.data_dir {
        Some(dir) => dir,
        None => JsonFileStore::default_dir()?,
    };

    let store = JsonFileStore::with_dir(data_dir.clone())?;
    store.load().await?;

    let mut settings = SettingsManager::new(&data_dir)?.into_settings();
    if args.purge_secrets {
        settings.purge_secret_on_clear = true;
    }

    let secrets: Arc<dyn SecretBackend> = if args.ephemeral_secrets {
        Arc::new(MemorySecretBackend::new())
    } else {
        Arc::new(KeychainBackend::new())
    };

    info!("Using store in {:?} with {}", data_dir, secrets.backend_name());

    let manager = ConnectionConfigManager::with_settings(Arc::new(store), secrets, settings);

    match args.command {
        Command::Get { host } => match manager.get_connection_config(&host).await {
            Some(config) => print_config(&config),
            None => println!("No saved configuration for {}", host),
        },
        Command::Set {
            host,
            port,
            family,
            ca,
            cert,
            key,
            ip,
        } => {
            let config = ConnectionConfiguration {
                host,
                port,
                family,
                ca_certificate: read_pem(ca).await?,
                client_certificate: read_pem(cert).await?,
                client_key: read_pem(key).await?,
            };

            if config.is_insecure() {
                println!("No certificate material given; nothing saved for {}", config.host);
                return Ok(());
            }

            let ip = ip.unwrap_or_else(|| config.host.clone());
            manager.set_connection_config(&config, &ip).await;
        }
        Command::Clear { host } => manager.clear_connection_config(&host).await,
        Command::List => {
            for host in manager.list_connection_hosts().await {
                println!("{}", host);
            }
        }
    }

    Ok(())
}

fn print_config(config: &ConnectionConfiguration) {
    let present = |field: &Option<Vec<u8>>| if field.is_some() { "present" } else { "absent" };

    println!("host:               {}", config.host);
    println!("port:               {}", config.port);
    match config.family {
        Some(family) => println!("family:             IPv{}", u8::from(family)),
        None => println!("family:             unspecified"),
    }
    println!("CA certificate:     {}", present(&config.ca_certificate));
    println!("client certificate: {}", present(&config.client_certificate));
    println!("client key:         {}", present(&config.client_key));
}
