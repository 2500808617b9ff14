use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::create_user;
use super::handlers::delete_user;
use super::handlers::get_user;
use super::handlers::update_user;
use crate::domain::user::ports::UserServicePort;
use crate::proto::user_service_server::UserService as UserServiceProto;
use crate::proto::CreateUserReply;
use crate::proto::CreateUserRequest;
use crate::proto::DeleteUserRequest;
use crate::proto::GetUserRequest;
use crate::proto::UpdateUserRequest;
use crate::proto::User as ProtoUser;

pub struct UserGrpcService<S>
where
    S: UserServicePort,
{
    service: Arc<S>,
}

impl<S> UserGrpcService<S>
where
    S: UserServicePort,
{
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<S> UserServiceProto for UserGrpcService<S>
where
    S: UserServicePort,
{
    async fn create(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserReply>, Status> {
        let response = create_user::create_user(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn get(&self, request: Request<GetUserRequest>) -> Result<Response<ProtoUser>, Status> {
        let response = get_user::get_user(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn update(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<ProtoUser>, Status> {
        let response = update_user::update_user(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn delete(&self, request: Request<DeleteUserRequest>) -> Result<Response<()>, Status> {
        delete_user::delete_user(self.service.as_ref(), request.into_inner()).await?;
        Ok(Response::new(()))
    }
}
