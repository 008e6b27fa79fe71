use std::sync::Arc;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use employee_asset_api::auth::password::hash_password_blocking;
use employee_asset_api::auth::TokenService;
use employee_asset_api::config::{self, AppConfig};
use employee_asset_api::database::models::{self, NewEmployee, Validate};
use employee_asset_api::database::{DatabaseManager, Gateway, PgGateway};
use employee_asset_api::routes;
use employee_asset_api::state::AppState;

#[derive(Parser)]
#[command(name = "employee-asset-api", version, about = "Employee and asset assignment tracking API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Override the listen port")]
        port: Option<u16>,
    },

    #[command(about = "Insert an employee with a login password directly into the database")]
    CreateEmployee(CreateEmployeeArgs),
}

#[derive(Args)]
struct CreateEmployeeArgs {
    #[arg(long)]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, env = "EMPLOYEE_PASSWORD", help = "Login password (or EMPLOYEE_PASSWORD)")]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting employee-asset-api in {:?} mode", config.environment);

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => serve(config, port).await,
        Command::CreateEmployee(args) => create_employee(config, args).await,
    }
}

async fn connect(config: &AppConfig) -> anyhow::Result<PgGateway> {
    let pool = DatabaseManager::connect_with(&config.database)
        .await
        .context("failed to initialize database")?;
    let gateway = PgGateway::new(pool);
    gateway
        .ensure_schema()
        .await
        .context("failed to prepare database schema")?;
    Ok(gateway)
}

async fn serve(config: &AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;

    let gateway = Arc::new(connect(config).await?);
    let tokens = TokenService::new(&config.security.jwt_secret, config.security.jwt_expiry_hours)
        .context("invalid JWT configuration")?;
    let state = AppState::new(gateway.clone(), tokens);

    let app = routes::app(state)
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(routes::cors_layer(&config.security.cors_origins));

    let bind_addr = match port {
        Some(port) => format!("{}:{}", config.server.host, port),
        None => config.bind_addr(),
    };
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    gateway.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn create_employee(config: &AppConfig, args: CreateEmployeeArgs) -> anyhow::Result<()> {
    let payload = NewEmployee {
        first_name: args.first_name,
        last_name: args.last_name,
        employee_email: args.email,
        phone_number: args.phone,
        password: Some(args.password),
        ..Default::default()
    };
    payload
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid employee: {}", e))?;

    let password = payload.password.clone().unwrap_or_default();
    let hash = hash_password_blocking(password).await?;

    let gateway = connect(config).await?;
    let employee = payload.into_record(models::new_id(), Some(hash), models::now());
    gateway.insert_employee(&employee).await?;
    gateway.close().await;

    tracing::info!(emp_id = %employee.emp_id, "Employee created");
    println!("{}", employee.emp_id);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
