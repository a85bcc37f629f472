use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryFilter};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_BUSINESS_OWNER: &str = "businessOwner";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Credentials,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Credentials => Entity::has_one(crate::user_credentials::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    let email = email.trim();
    errors::check_len("email", email, 255)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') => Ok(()),
        _ => Err(errors::ModelError::Validation("invalid email".into())),
    }
}

pub fn validate_full_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("full name required".into())); }
    if name.chars().count() > 128 { return Err(errors::ModelError::Validation("full name too long (<=128)".into())); }
    Ok(())
}

pub fn validate_role(role: &str) -> Result<(), errors::ModelError> {
    match role {
        ROLE_CUSTOMER | ROLE_BUSINESS_OWNER => Ok(()),
        other => Err(errors::ModelError::Validation(format!("unknown role '{other}'"))),
    }
}

pub fn validate_phone(phone: &str) -> Result<(), errors::ModelError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() < 7 || digits.len() > 15 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(errors::ModelError::Validation("phone must be 7-15 digits, optionally prefixed with '+'".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    email: &str,
    full_name: &str,
    phone: Option<&str>,
    role: &str,
) -> Result<Model, errors::ModelError> {
    validate_email(email)?;
    validate_full_name(full_name)?;
    validate_role(role)?;
    if let Some(p) = phone { validate_phone(p)?; }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.trim().to_lowercase()),
        full_name: Set(full_name.trim().to_string()),
        phone: Set(phone.map(str::to_string)),
        role: Set(role.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(errors::from_write)
}

/// Remove an account; credentials and business cascade with it.
pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email.trim().to_lowercase()))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("no-at.com").is_err());
        assert!(validate_email("@b.com").is_err());
        assert!(validate_email("a@localhost").is_err());
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(validate_email(&long), Err(errors::ModelError::Validation(_))));
    }

    #[test]
    fn roles_are_the_two_known_tags() {
        assert!(validate_role("customer").is_ok());
        assert!(validate_role("businessOwner").is_ok());
        assert!(validate_role("admin").is_err());
    }

    #[test]
    fn phone_digits() {
        assert!(validate_phone("+233201234567").is_ok());
        assert!(validate_phone("12-34").is_err());
    }
}
