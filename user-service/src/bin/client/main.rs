use std::process::ExitCode;

use rand::Rng;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::outbound::grpc::GrpcUserClient;
use user_service::proto::get_user_request::View;
use user_service::proto::User;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_client=info,user_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let connected =
        GrpcUserClient::connect(&config.client.server_url, config.client.timeout()).await;
    let client = match connected {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(
                server_url = %config.client.server_url,
                error = %e,
                "Failed connecting to server"
            );
            return ExitCode::FAILURE;
        }
    };

    let created = match client.create(random_user()).await {
        Ok(created) => created,
        Err(status) => {
            tracing::error!(
                status = ?status.code(),
                message = status.message(),
                "Failed creating user"
            );
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(user_id = created.id, "User created");

    match client.get(created.id, View::Basic).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, user = ?user, "Retrieved user");
            ExitCode::SUCCESS
        }
        Err(status) => {
            tracing::error!(
                status = ?status.code(),
                message = status.message(),
                "Failed retrieving user"
            );
            ExitCode::FAILURE
        }
    }
}

fn random_user() -> User {
    let mut rng = rand::thread_rng();

    User {
        name: format!("user_{}", rng.gen::<u32>()),
        email_address: format!("user_{}@example.com", rng.gen::<u32>()),
        alias: Some("John Doe".to_string()),
        ..Default::default()
    }
}
