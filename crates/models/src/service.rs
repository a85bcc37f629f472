use sea_orm::{entity::prelude::*, Set, DatabaseConnection, ActiveModelTrait, EntityTrait};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{business, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    pub service_name: String,
    /// Kept as text, the way listings display it.
    pub price: String,
    pub business_type: String,
    pub car_name: Option<String>,
    pub car_description: Option<String>,
    pub seats: Option<i32>,
    pub engine_capacity: Option<i32>,
    pub transmission: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Business }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Business => Entity::belongs_to(business::Entity)
                .from(Column::BusinessId)
                .to(business::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for an insert or a full overwrite.
#[derive(Clone, Debug)]
pub struct ServiceFields {
    pub service_name: String,
    pub price: String,
    pub business_type: String,
    pub car_name: Option<String>,
    pub car_description: Option<String>,
    pub seats: Option<i32>,
    pub engine_capacity: Option<i32>,
    pub transmission: Option<String>,
    pub image_url: Option<String>,
}

pub fn validate_service_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("service name required".into())); }
    if name.chars().count() > 128 { return Err(errors::ModelError::Validation("service name too long (<=128)".into())); }
    Ok(())
}

/// `car_description` is a text column; this bounds what a listing may carry.
pub const MAX_CAR_DESCRIPTION: usize = 4000;

/// Price is text but must read as a non-negative decimal such as `25` or `19.99`.
pub fn validate_price(price: &str) -> Result<(), errors::ModelError> {
    let p = price.trim();
    if p.is_empty() { return Err(errors::ModelError::Validation("price required".into())); }
    errors::check_len("price", p, 32)?;
    match p.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(()),
        _ => Err(errors::ModelError::Validation(format!("price '{p}' is not a non-negative number"))),
    }
}

pub fn validate_fields(f: &ServiceFields) -> Result<(), errors::ModelError> {
    validate_service_name(&f.service_name)?;
    validate_price(&f.price)?;
    business::validate_business_type(&f.business_type)?;
    if let Some(car_name) = &f.car_name { errors::check_len("car name", car_name, 128)?; }
    if let Some(transmission) = &f.transmission { errors::check_len("transmission", transmission, 32)?; }
    if let Some(description) = &f.car_description { errors::check_len("car description", description, MAX_CAR_DESCRIPTION)?; }
    if f.business_type == business::TYPE_CAR_RENTAL {
        let missing = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        if missing(&f.car_name) || missing(&f.car_description) {
            return Err(errors::ModelError::Validation("car rental services need car name and description".into()));
        }
    }
    if f.seats.is_some_and(|s| s <= 0) {
        return Err(errors::ModelError::Validation("seats must be positive".into()));
    }
    if f.engine_capacity.is_some_and(|c| c <= 0) {
        return Err(errors::ModelError::Validation("engine capacity must be positive".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, business_id: Uuid, f: ServiceFields) -> Result<Model, errors::ModelError> {
    validate_fields(&f)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        business_id: Set(business_id),
        service_name: Set(f.service_name),
        price: Set(f.price),
        business_type: Set(f.business_type),
        car_name: Set(f.car_name),
        car_description: Set(f.car_description),
        seats: Set(f.seats),
        engine_capacity: Set(f.engine_capacity),
        transmission: Set(f.transmission),
        image_url: Set(f.image_url),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn overwrite(db: &DatabaseConnection, id: Uuid, f: ServiceFields) -> Result<Model, errors::ModelError> {
    validate_fields(&f)?;
    let mut found: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::NotFound("service not found".into()))?
        .into();
    found.service_name = Set(f.service_name);
    found.price = Set(f.price);
    found.business_type = Set(f.business_type);
    found.car_name = Set(f.car_name);
    found.car_description = Set(f.car_description);
    found.seats = Set(f.seats);
    found.engine_capacity = Set(f.engine_capacity);
    found.transmission = Set(f.transmission);
    found.image_url = Set(f.image_url);
    found.updated_at = Set(Utc::now().into());
    found.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Delete only the service row; requests pointing at it stay untouched.
pub async fn hard_delete(db: &DatabaseConnection, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
