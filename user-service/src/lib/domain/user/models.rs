use std::fmt;
use std::str::FromStr;

use crate::domain::category::models::CategoryId;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;

/// User aggregate entity.
///
/// `administered` is derived from the categories whose admin is this user and
/// is only populated when the caller asks for [`UserView::WithEdgeIds`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: Name,
    pub email: EmailAddress,
    pub alias: Option<Alias>,
    pub administered: Vec<CategoryId>,
}

/// User unique identifier, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(String);

impl Name {
    /// Create a new validated name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty
    pub fn new(name: String) -> Result<Self, NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        Ok(Self(name))
    }

    /// Wrap a value read back from the store.
    pub(crate) fn from_stored(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Only emptiness is rejected. Addresses that do not parse as RFC 5322 are
/// accepted and logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// EmailAddress value object
    ///
    /// # Errors
    /// * `Empty` - Email is empty
    pub fn new(email: String) -> Result<Self, EmailError> {
        if email.is_empty() {
            return Err(EmailError::Empty);
        }
        let address = Self(email);
        if !address.is_well_formed() {
            tracing::warn!(email = %address.0, "Email address is not RFC 5322 compliant");
        }
        Ok(address)
    }

    /// Wrap a value read back from the store.
    pub(crate) fn from_stored(email: String) -> Self {
        Self(email)
    }

    /// Whether the address parses as RFC 5322.
    pub fn is_well_formed(&self) -> bool {
        email_address::EmailAddress::from_str(&self.0).is_ok()
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Optional nickname. An empty alias is a value distinct from no alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias(String);

impl Alias {
    pub fn new(alias: String) -> Self {
        Self(alias)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// How much relation data a read returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserView {
    /// User fields only; `administered` is left empty.
    #[default]
    Basic,
    /// User fields plus the ids of every administered category.
    WithEdgeIds,
}

impl fmt::Display for UserView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserView::Basic => write!(f, "basic"),
            UserView::WithEdgeIds => write!(f, "with_edge_ids"),
        }
    }
}

/// Command to create a new user with domain types
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub name: Name,
    pub email: EmailAddress,
    pub alias: Option<Alias>,
    pub administered: Vec<CategoryId>,
}

impl CreateUserCommand {
    /// Construct a new create user command.
    ///
    /// # Arguments
    /// * `name` - Validated name
    /// * `email` - Validated email address
    /// * `alias` - Optional alias
    /// * `administered` - Existing categories the new user becomes admin of
    pub fn new(
        name: Name,
        email: EmailAddress,
        alias: Option<Alias>,
        administered: Vec<CategoryId>,
    ) -> Self {
        Self {
            name,
            email,
            alias,
            administered: dedup(administered),
        }
    }
}

/// Command to replace an existing user's fields and administered set.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub name: Name,
    pub email: EmailAddress,
    pub alias: Option<Alias>,
    pub administered: Vec<CategoryId>,
}

impl UpdateUserCommand {
    pub fn new(
        name: Name,
        email: EmailAddress,
        alias: Option<Alias>,
        administered: Vec<CategoryId>,
    ) -> Self {
        Self {
            name,
            email,
            alias,
            administered: dedup(administered),
        }
    }
}

fn dedup(mut ids: Vec<CategoryId>) -> Vec<CategoryId> {
    ids.sort();
    ids.dedup();
    ids
}
