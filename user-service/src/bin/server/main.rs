use std::process::ExitCode;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::user::service::UserService;
use user_service::inbound::grpc;
use user_service::inbound::grpc::UserGrpcService;
use user_service::outbound::repositories;
use user_service::outbound::repositories::SqliteUserRepository;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server ended");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), anyhow::Error> {
    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        grpc_port = config.server.grpc_port,
        "Configuration loaded"
    );

    let pool = repositories::connect(&config.database).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "sqlite",
        "Database connection pool created"
    );

    repositories::apply_schema(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let user_service = Arc::new(UserService::new(user_repository));
    let grpc_service = UserGrpcService::new(user_service);

    let grpc_address = config.server.grpc_address();
    let listener = TcpListener::bind(&grpc_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    let served = grpc::serve(
        listener,
        grpc_service,
        config.server.request_timeout(),
        async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
            tracing::info!("Shutdown signal received");
        },
    )
    .await;

    pool.close().await;
    tracing::info!(database = "sqlite", "Database connection pool closed");

    served?;
    tracing::info!("Server exited successfully");

    Ok(())
}
