use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

pub const TYPE_CAR_WASH: &str = "carWash";
pub const TYPE_CAR_RENTAL: &str = "carRental";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "business")]
pub struct Model {
    /// Same id as the owning `user` row.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_name: String,
    pub business_type: String,
    pub location: String,
    pub image_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(user::Entity).from(Column::Id).to(user::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_business_type(t: &str) -> Result<(), errors::ModelError> {
    match t {
        TYPE_CAR_WASH | TYPE_CAR_RENTAL => Ok(()),
        other => Err(errors::ModelError::Validation(format!("business type must be carWash or carRental, got '{other}'"))),
    }
}

pub fn validate_business_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("business name required".into())); }
    errors::check_len("business name", name.trim(), 128)
}

pub fn validate_location(location: &str) -> Result<(), errors::ModelError> {
    if location.trim().is_empty() { return Err(errors::ModelError::Validation("location required".into())); }
    errors::check_len("location", location.trim(), 255)
}

pub async fn create(
    db: &DatabaseConnection,
    owner_id: Uuid,
    business_name: &str,
    business_type: &str,
    location: &str,
) -> Result<Model, errors::ModelError> {
    validate_business_name(business_name)?;
    validate_business_type(business_type)?;
    validate_location(location)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(owner_id),
        business_name: Set(business_name.trim().to_string()),
        business_type: Set(business_type.to_string()),
        location: Set(location.trim().to_string()),
        image_url: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(errors::from_write)
}
