use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directory::domain::BusinessType;

/// Account role stored on the user row; decides which screens/endpoints apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Customer,
    BusinessOwner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => models::user::ROLE_CUSTOMER,
            Role::BusinessOwner => models::user::ROLE_BUSINESS_OWNER,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            models::user::ROLE_CUSTOMER => Ok(Role::Customer),
            models::user::ROLE_BUSINESS_OWNER => Ok(Role::BusinessOwner),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Registration input; the `role` tag picks the form that was filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "camelCase")]
pub enum RegisterInput {
    Customer {
        email: String,
        password: String,
        full_name: String,
        #[serde(default)]
        phone: Option<String>,
    },
    BusinessOwner {
        email: String,
        password: String,
        business_name: String,
        business_type: BusinessType,
        location: String,
        #[serde(default)]
        phone: Option<String>,
    },
}

impl RegisterInput {
    pub fn email(&self) -> &str {
        match self {
            RegisterInput::Customer { email, .. } | RegisterInput::BusinessOwner { email, .. } => email,
        }
    }

    pub fn password(&self) -> &str {
        match self {
            RegisterInput::Customer { password, .. } | RegisterInput::BusinessOwner { password, .. } => password,
        }
    }

    pub fn phone(&self) -> Option<&str> {
        match self {
            RegisterInput::Customer { phone, .. } | RegisterInput::BusinessOwner { phone, .. } => phone.as_deref(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            RegisterInput::Customer { .. } => Role::Customer,
            RegisterInput::BusinessOwner { .. } => Role::BusinessOwner,
        }
    }

    /// Name stored on the user row; owners sign up with their business name.
    pub fn display_name(&self) -> &str {
        match self {
            RegisterInput::Customer { full_name, .. } => full_name,
            RegisterInput::BusinessOwner { business_name, .. } => business_name,
        }
    }
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Domain user (business view)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: Role,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub token: String,
}

/// Caller identity resolved once per session from the token and passed
/// explicitly into every service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthContext {
    pub fn new(user_id: Uuid, role: Role) -> Self { Self { user_id, role } }

    pub fn is_customer(&self) -> bool { self.role == Role::Customer }

    pub fn is_business_owner(&self) -> bool { self.role == Role::BusinessOwner }
}
