use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Business category tag shared by businesses and their services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BusinessType {
    CarWash,
    CarRental,
}

impl BusinessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessType::CarWash => models::business::TYPE_CAR_WASH,
            BusinessType::CarRental => models::business::TYPE_CAR_RENTAL,
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for BusinessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            models::business::TYPE_CAR_WASH => Ok(BusinessType::CarWash),
            models::business::TYPE_CAR_RENTAL => Ok(BusinessType::CarRental),
            other => Err(format!("unknown business type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Business {
    /// Same as the owner's user id.
    pub id: Uuid,
    pub business_name: String,
    pub business_type: BusinessType,
    pub location: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewBusiness {
    pub owner_id: Uuid,
    pub business_name: String,
    pub business_type: BusinessType,
    pub location: String,
}

/// Case-insensitive substring match on the business name; a missing name
/// behaves like an empty one.
pub fn name_matches(business_name: &str, query: &str) -> bool {
    business_name.to_lowercase().contains(&query.trim().to_lowercase())
}
