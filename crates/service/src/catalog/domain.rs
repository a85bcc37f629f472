use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directory::domain::BusinessType;

/// A sellable offering owned by a business.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffer {
    pub id: Uuid,
    pub business_id: Uuid,
    pub service_name: String,
    pub price: String,
    pub business_type: BusinessType,
    pub car_name: Option<String>,
    pub car_description: Option<String>,
    pub seats: Option<i32>,
    pub engine_capacity: Option<i32>,
    pub transmission: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner-submitted form for creating or editing a service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInput {
    pub service_name: String,
    pub price: String,
    pub business_type: BusinessType,
    #[serde(default)]
    pub car_name: Option<String>,
    #[serde(default)]
    pub car_description: Option<String>,
    #[serde(default)]
    pub seats: Option<i32>,
    #[serde(default)]
    pub engine_capacity: Option<i32>,
    #[serde(default)]
    pub transmission: Option<String>,
}

impl ServiceInput {
    /// Trim text fields and drop rental-only fields from wash services.
    pub fn normalized(mut self) -> Self {
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        self.service_name = self.service_name.trim().to_string();
        self.price = self.price.trim().to_string();
        if self.business_type == BusinessType::CarWash {
            self.car_name = None;
            self.car_description = None;
            self.seats = None;
            self.engine_capacity = None;
            self.transmission = None;
        } else {
            self.car_name = clean(self.car_name);
            self.car_description = clean(self.car_description);
            self.transmission = clean(self.transmission);
        }
        self
    }

    pub fn to_fields(&self, image_url: Option<String>) -> models::service::ServiceFields {
        models::service::ServiceFields {
            service_name: self.service_name.clone(),
            price: self.price.clone(),
            business_type: self.business_type.as_str().to_string(),
            car_name: self.car_name.clone(),
            car_description: self.car_description.clone(),
            seats: self.seats,
            engine_capacity: self.engine_capacity,
            transmission: self.transmission.clone(),
            image_url,
        }
    }
}
