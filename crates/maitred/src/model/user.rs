//! User entity: the partial view of a user the booking core resolves
//! against. Registration, credentials and profile data live elsewhere.

use super::UserId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;
use store_actor::{SortField, StoreEntity, UnknownSortField};

/// A registered user, reduced to identity and display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

/// Payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
}

/// Payload for updating a user. Omitted fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
}

/// User as embedded in booking and review views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// Sort fields accepted when listing users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UserSortField {
    #[default]
    Id,
}

impl FromStr for UserSortField {
    type Err = UnknownSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            other => Err(UnknownSortField(other.to_string())),
        }
    }
}

impl SortField for UserSortField {
    fn names() -> &'static [&'static str] {
        &["id"]
    }
}

impl StoreEntity for User {
    type Id = UserId;
    type Draft = UserCreate;
    type Patch = UserPatch;
    type SortField = UserSortField;
    type Filter = ();
    type UniqueKey = ();
    type Error = Infallible;

    fn from_draft(id: UserId, draft: UserCreate) -> Self {
        Self {
            id,
            name: draft.name,
        }
    }

    fn id(&self) -> UserId {
        self.id
    }

    fn apply_patch(&mut self, patch: UserPatch) -> Result<(), Infallible> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        Ok(())
    }

    fn matches(&self, _filter: &()) -> bool {
        true
    }

    fn compare(&self, other: &Self, field: UserSortField) -> Ordering {
        match field {
            UserSortField::Id => self.id.cmp(&other.id),
        }
    }
}
