use tonic::Status;

use super::UserFields;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::proto::CreateUserReply;
use crate::proto::CreateUserRequest;

pub async fn create_user<S>(
    service: &S,
    request: CreateUserRequest,
) -> Result<CreateUserReply, Status>
where
    S: UserServicePort,
{
    let fields = UserFields::parse(request.user)?;
    let command = CreateUserCommand::new(
        fields.name,
        fields.email,
        fields.alias,
        fields.administered,
    );

    let user = service.create_user(command).await?;

    Ok(CreateUserReply {
        id: user.id.0,
        user: Some(user.into()),
    })
}
