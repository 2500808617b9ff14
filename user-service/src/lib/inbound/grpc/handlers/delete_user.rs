use tonic::Status;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::proto::DeleteUserRequest;

pub async fn delete_user<S>(service: &S, request: DeleteUserRequest) -> Result<(), Status>
where
    S: UserServicePort,
{
    service.delete_user(UserId(request.id)).await?;
    Ok(())
}
