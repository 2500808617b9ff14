use std::time::Duration;

use anyhow::Error;
use tonic::transport::Channel;
use tonic::transport::Endpoint;
use tonic::Status;

use crate::proto::get_user_request::View;
use crate::proto::user_service_client::UserServiceClient;
use crate::proto::CreateUserReply;
use crate::proto::CreateUserRequest;
use crate::proto::DeleteUserRequest;
use crate::proto::GetUserRequest;
use crate::proto::UpdateUserRequest;
use crate::proto::User;

/// Thin wrapper over the generated client. Every call is bounded by the
/// endpoint timeout; failures are returned as the remote status untouched.
#[derive(Clone)]
pub struct GrpcUserClient {
    client: UserServiceClient<Channel>,
}

impl GrpcUserClient {
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self, Error> {
        let channel = Endpoint::from_shared(url.to_string())?
            .connect_timeout(timeout)
            .timeout(timeout)
            .connect()
            .await?;

        Ok(Self {
            client: UserServiceClient::new(channel),
        })
    }

    pub async fn create(&self, user: User) -> Result<CreateUserReply, Status> {
        let request = tonic::Request::new(CreateUserRequest { user: Some(user) });

        let mut client = self.client.clone();
        let response = client.create(request).await?;

        Ok(response.into_inner())
    }

    pub async fn get(&self, id: i32, view: View) -> Result<User, Status> {
        let request = tonic::Request::new(GetUserRequest {
            id,
            view: view.into(),
        });

        let mut client = self.client.clone();
        let response = client.get(request).await?;

        Ok(response.into_inner())
    }

    pub async fn update(&self, user: User) -> Result<User, Status> {
        let request = tonic::Request::new(UpdateUserRequest { user: Some(user) });

        let mut client = self.client.clone();
        let response = client.update(request).await?;

        Ok(response.into_inner())
    }

    pub async fn delete(&self, id: i32) -> Result<(), Status> {
        let request = tonic::Request::new(DeleteUserRequest { id });

        let mut client = self.client.clone();
        client.delete(request).await?;

        Ok(())
    }
}
