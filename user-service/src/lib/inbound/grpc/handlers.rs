use thiserror::Error;
use tonic::Status;

use crate::domain::category::models::CategoryId;
use crate::domain::user::models::Alias;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Name;
use crate::domain::user::models::User;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::UserError;

pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod update_user;

impl From<User> for crate::proto::User {
    fn from(user: User) -> Self {
        Self {
            id: user.id.0,
            name: user.name.as_str().to_string(),
            email_address: user.email.as_str().to_string(),
            alias: user.alias.map(|alias| alias.as_str().to_string()),
            administered: user
                .administered
                .into_iter()
                .map(|id| crate::proto::Category {
                    id: id.0,
                    ..Default::default()
                })
                .collect(),
        }
    }
}

impl From<UserError> for Status {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidName(_) | UserError::InvalidEmail(_) => {
                Status::invalid_argument(err.to_string())
            }
            UserError::NotFound(_) | UserError::CategoryNotFound(_) => {
                Status::not_found(err.to_string())
            }
            UserError::DatabaseError(_) => {
                tracing::error!(error = %err, "User operation failed");
                Status::internal(err.to_string())
            }
        }
    }
}

/// User fields decoded from the wire message, ready for a domain command.
#[derive(Debug)]
pub(crate) struct UserFields {
    pub name: Name,
    pub email: EmailAddress,
    pub alias: Option<Alias>,
    pub administered: Vec<CategoryId>,
}

#[derive(Debug, Clone, Error)]
pub(crate) enum ParseUserError {
    #[error("Missing user payload")]
    MissingUser,

    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid view: {0}")]
    View(i32),
}

impl From<ParseUserError> for Status {
    fn from(err: ParseUserError) -> Self {
        Status::invalid_argument(err.to_string())
    }
}

impl UserFields {
    pub(crate) fn parse(user: Option<crate::proto::User>) -> Result<Self, ParseUserError> {
        let user = user.ok_or(ParseUserError::MissingUser)?;

        Ok(Self {
            name: Name::new(user.name)?,
            email: EmailAddress::new(user.email_address)?,
            alias: user.alias.map(Alias::new),
            administered: user
                .administered
                .iter()
                .map(|category| CategoryId(category.id))
                .collect(),
        })
    }
}
