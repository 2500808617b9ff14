use tonic::Status;

use super::ParseUserError;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserView;
use crate::domain::user::ports::UserServicePort;
use crate::proto::get_user_request::View;
use crate::proto::GetUserRequest;
use crate::proto::User as ProtoUser;

pub async fn get_user<S>(service: &S, request: GetUserRequest) -> Result<ProtoUser, Status>
where
    S: UserServicePort,
{
    let view = parse_view(request.view)?;

    let user = service.get_user(UserId(request.id), view).await?;

    Ok(user.into())
}

fn parse_view(view: i32) -> Result<UserView, ParseUserError> {
    match View::try_from(view) {
        Ok(View::Unspecified) | Ok(View::Basic) => Ok(UserView::Basic),
        Ok(View::WithEdgeIds) => Ok(UserView::WithEdgeIds),
        Err(_) => Err(ParseUserError::View(view)),
    }
}
