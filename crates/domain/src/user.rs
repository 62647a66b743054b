use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Barber,
    Client,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Barber => "BARBER",
            Self::Client => "CLIENT",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "BARBER" => Ok(Self::Barber),
            "CLIENT" => Ok(Self::Client),
            _ => Err(format!("Unknown user role: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
}

impl User {
    pub fn new(role: UserRole) -> Self {
        Self {
            id: Default::default(),
            name: None,
            email: None,
            phone: None,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
