#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use user_service::category::models::Category;
use user_service::category::models::CategoryId;
use user_service::category::models::CategoryName;
use user_service::category::models::CreateCategoryCommand;
use user_service::category::ports::CategoryRepository;
use user_service::config::DatabaseConfig;
use user_service::domain::user::service::UserService;
use user_service::domain::user::ports::UserServicePort;
use user_service::inbound::grpc;
use user_service::inbound::grpc::UserGrpcService;
use user_service::outbound::grpc::GrpcUserClient;
use user_service::outbound::repositories;
use user_service::outbound::repositories::SqliteCategoryRepository;
use user_service::outbound::repositories::SqliteUserRepository;
use user_service::user::models::UserId;

pub type TestService = UserGrpcService<UserService<SqliteUserRepository>>;

/// Test database helper: a private in-memory store with the schema applied
pub struct TestDb {
    pub pool: SqlitePool,
    pub categories: SqliteCategoryRepository,
}

impl TestDb {
    pub async fn new() -> Self {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        };

        let pool = repositories::connect(&config)
            .await
            .expect("Failed to open in-memory database");

        repositories::apply_schema(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            categories: SqliteCategoryRepository::new(pool.clone()),
            pool,
        }
    }

    /// Service wired to this store, called in-process without a listener
    pub fn service(&self) -> TestService {
        let user_repository = Arc::new(SqliteUserRepository::new(self.pool.clone()));
        UserGrpcService::new(Arc::new(UserService::new(user_repository)))
    }

    pub async fn create_category(&self, name: &str, admin: Option<i32>) -> Category {
        self.categories
            .create(CreateCategoryCommand::new(
                CategoryName::new(name.to_string()).unwrap(),
                admin.map(UserId),
            ))
            .await
            .expect("Failed to create category")
    }

    pub async fn count_categories_administered_by(&self, admin: i32) -> i64 {
        self.categories
            .count_by_admin(UserId(admin))
            .await
            .expect("Failed to count categories")
    }

    pub async fn categories_admin(&self, category: i32) -> Option<i32> {
        self.categories
            .find_by_id(CategoryId(category))
            .await
            .expect("Failed to load category")
            .expect("Category does not exist")
            .admin
            .map(|admin| admin.0)
    }

    pub async fn count_users(&self) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count users")
    }
}

/// Test application that spawns a real gRPC server
pub struct TestApp {
    pub address: String,
    pub db: TestDb,
    pub client: GrpcUserClient,
    shutdown: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<Result<(), tonic::transport::Error>>>,
}

impl TestApp {
    /// Spawn the server in a background task and connect a client to it
    pub async fn spawn() -> Self {
        let db = TestDb::new().await;
        let service = db.service();
        Self::spawn_with(db, service, Duration::from_secs(30)).await
    }

    /// Spawn the server around any service implementation
    pub async fn spawn_with<S>(
        db: TestDb,
        service: UserGrpcService<S>,
        request_timeout: Duration,
    ) -> Self
    where
        S: UserServicePort,
    {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let (shutdown, signal) = oneshot::channel::<()>();
        let server = tokio::spawn(grpc::serve(listener, service, request_timeout, async move {
            let _ = signal.await;
        }));

        let client = GrpcUserClient::connect(&address, Duration::from_secs(5))
            .await
            .expect("Failed to connect to test server");

        Self {
            address,
            db,
            client,
            shutdown: Some(shutdown),
            server: Some(server),
        }
    }

    /// Signal graceful shutdown and wait for the server task to finish
    pub async fn shutdown(&mut self) -> Result<(), tonic::transport::Error> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        match self.server.take() {
            Some(server) => server.await.expect("Server task panicked"),
            None => Ok(()),
        }
    }
}

pub fn user_payload(name: &str, email: &str) -> user_service::proto::User {
    user_service::proto::User {
        name: name.to_string(),
        email_address: email.to_string(),
        ..Default::default()
    }
}

pub fn category_ref(id: i32) -> user_service::proto::Category {
    user_service::proto::Category {
        id,
        ..Default::default()
    }
}
