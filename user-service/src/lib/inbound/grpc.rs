use std::future::Future;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;

use crate::domain::user::ports::UserServicePort;
use crate::proto::user_service_server::UserServiceServer;

pub mod grpc_user_server;
pub mod handlers;

pub use grpc_user_server::UserGrpcService;

/// Serve `service` on `listener` until `shutdown` resolves.
///
/// Every call is cut off after `request_timeout` and runs inside a `grpc`
/// span carrying the method path. In-flight calls finish before this returns.
pub async fn serve<S, F>(
    listener: TcpListener,
    service: UserGrpcService<S>,
    request_timeout: Duration,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    S: UserServicePort,
    F: Future<Output = ()> + Send,
{
    Server::builder()
        .timeout(request_timeout)
        .trace_fn(|request| tracing::info_span!("grpc", method = %request.uri().path()))
        .add_service(UserServiceServer::new(service))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await
}
