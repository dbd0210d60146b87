use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use validator::Validate;

use gubae::modules::auth::service::AuthService;
use gubae_config::DatabaseConfig;
use gubae_db::connect_store;
use gubae_models::RegisterRequest;

#[derive(Parser)]
#[command(name = "gubae-cli")]
#[command(about = "Gubae CLI - Administrative tools for the Gubae API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::CreateAdmin { email, password } => create_admin(email, password).await,
    };

    if let Err(e) = result {
        eprintln!("\nError: {:#}", e);
        std::process::exit(1);
    }
}

async fn create_admin(email: Option<String>, password: Option<String>) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let request = RegisterRequest { email, password };
    if let Err(errors) = request.validate() {
        bail!("Invalid admin details: {}", errors);
    }

    let config = DatabaseConfig::from_env()?;
    if config.is_memory() {
        bail!("DATABASE_URL points at the in-memory store; the admin would be lost on exit");
    }
    let store = connect_store(&config)
        .await
        .context("Failed to connect to the document store")?;

    let admin = AuthService::register(store.as_ref(), request)
        .await
        .map_err(|e| anyhow::anyhow!(e.message()))?;

    println!("\nAdmin created successfully!");
    println!("   ID: {}", admin.id);
    println!("   Email: {}", admin.email);
    Ok(())
}
