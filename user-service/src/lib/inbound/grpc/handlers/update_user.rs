use tonic::Status;

use super::ParseUserError;
use super::UserFields;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::proto::UpdateUserRequest;
use crate::proto::User as ProtoUser;

pub async fn update_user<S>(service: &S, request: UpdateUserRequest) -> Result<ProtoUser, Status>
where
    S: UserServicePort,
{
    let id = request
        .user
        .as_ref()
        .map(|user| UserId(user.id))
        .ok_or(ParseUserError::MissingUser)?;

    let fields = UserFields::parse(request.user)?;
    let command = UpdateUserCommand::new(
        fields.name,
        fields.email,
        fields.alias,
        fields.administered,
    );

    let user = service.update_user(id, command).await?;

    Ok(user.into())
}
