use sea_orm::{entity::prelude::*, Set, DatabaseConnection, ActiveModelTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACCEPTED: &str = "accepted";
pub const STATUS_REJECTED: &str = "rejected";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    /// Not a foreign key: survives deletion of the service.
    pub service_id: Uuid,
    pub status: String,
    pub paid: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_status(s: &str) -> Result<(), errors::ModelError> {
    match s {
        STATUS_PENDING | STATUS_ACCEPTED | STATUS_REJECTED => Ok(()),
        other => Err(errors::ModelError::Validation(format!("unknown request status '{other}'"))),
    }
}

/// Insert a fresh booking: pending, unpaid, server timestamp.
pub async fn create(db: &DatabaseConnection, user_id: Uuid, service_id: Uuid) -> Result<Model, errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        service_id: Set(service_id),
        status: Set(STATUS_PENDING.to_string()),
        paid: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

async fn load(db: &DatabaseConnection, id: Uuid) -> Result<ActiveModel, errors::ModelError> {
    Ok(Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::NotFound("request not found".into()))?
        .into())
}

/// Unconditional overwrite of the status; `reset_paid` also clears the flag.
pub async fn update_status(db: &DatabaseConnection, id: Uuid, status: &str, reset_paid: bool) -> Result<Model, errors::ModelError> {
    validate_status(status)?;
    let mut found = load(db, id).await?;
    found.status = Set(status.to_string());
    if reset_paid {
        found.paid = Set(false);
    }
    found.updated_at = Set(Utc::now().into());
    found.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn mark_paid(db: &DatabaseConnection, id: Uuid) -> Result<Model, errors::ModelError> {
    let mut found = load(db, id).await?;
    found.paid = Set(true);
    found.updated_at = Set(Utc::now().into());
    found.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_by_services(db: &DatabaseConnection, service_ids: &[Uuid]) -> Result<Vec<Model>, errors::ModelError> {
    if service_ids.is_empty() {
        return Ok(Vec::new());
    }
    Entity::find()
        .filter(Column::ServiceId.is_in(service_ids.iter().copied()))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_by_user(db: &DatabaseConnection, user_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
