//! Input objects and the member type enum

use std::fmt;
use std::str::FromStr;

use async_graphql::{Enum, InputObject};
use uuid::Uuid;

use crate::storage::{NewPost, NewProfile, NewUser, PostChanges, ProfileChanges, UserChanges};

/// Member type identifier, stored as its upper-case name
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MemberTypeId {
    #[graphql(name = "BASIC")]
    Basic,
    #[graphql(name = "BUSINESS")]
    Business,
}

impl MemberTypeId {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberTypeId::Basic => "BASIC",
            MemberTypeId::Business => "BUSINESS",
        }
    }
}

impl fmt::Display for MemberTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberTypeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BASIC" => Ok(MemberTypeId::Basic),
            "BUSINESS" => Ok(MemberTypeId::Business),
            other => Err(format!("unknown member type id: {other}")),
        }
    }
}

#[derive(InputObject)]
pub struct CreateUserInput {
    pub name: String,
    pub balance: f64,
}

impl From<CreateUserInput> for NewUser {
    fn from(input: CreateUserInput) -> Self {
        Self {
            name: input.name,
            balance: input.balance,
        }
    }
}

#[derive(InputObject, Default)]
pub struct ChangeUserInput {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

impl From<ChangeUserInput> for UserChanges {
    fn from(input: ChangeUserInput) -> Self {
        Self {
            name: input.name,
            balance: input.balance,
        }
    }
}

#[derive(InputObject)]
pub struct CreateProfileInput {
    pub is_male: bool,
    pub year_of_birth: i32,
    pub user_id: Uuid,
    pub member_type_id: MemberTypeId,
}

impl From<CreateProfileInput> for NewProfile {
    fn from(input: CreateProfileInput) -> Self {
        Self {
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            user_id: input.user_id,
            member_type_id: input.member_type_id.as_str().to_owned(),
        }
    }
}

#[derive(InputObject, Default)]
pub struct ChangeProfileInput {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub member_type_id: Option<MemberTypeId>,
}

impl From<ChangeProfileInput> for ProfileChanges {
    fn from(input: ChangeProfileInput) -> Self {
        Self {
            is_male: input.is_male,
            year_of_birth: input.year_of_birth,
            member_type_id: input.member_type_id.map(|id| id.as_str().to_owned()),
        }
    }
}

#[derive(InputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

impl From<CreatePostInput> for NewPost {
    fn from(input: CreatePostInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
            author_id: input.author_id,
        }
    }
}

#[derive(InputObject, Default)]
pub struct ChangePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<ChangePostInput> for PostChanges {
    fn from(input: ChangePostInput) -> Self {
        Self {
            title: input.title,
            content: input.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_type_id_round_trips_through_str() {
        for id in [MemberTypeId::Basic, MemberTypeId::Business] {
            assert_eq!(id.as_str().parse::<MemberTypeId>(), Ok(id));
        }
        assert!("PREMIUM".parse::<MemberTypeId>().is_err());
    }

    #[test]
    fn test_change_profile_input_maps_member_type() {
        let changes: ProfileChanges = ChangeProfileInput {
            member_type_id: Some(MemberTypeId::Business),
            ..Default::default()
        }
        .into();
        assert_eq!(changes.member_type_id.as_deref(), Some("BUSINESS"));
        assert_eq!(changes.is_male, None);
    }
}
