use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// `role` picks the form: `customer` needs `full_name`; `businessOwner`
/// needs `business_name`, `business_type` and `location`.
#[derive(ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "customer")]
    pub role: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub business_name: Option<String>,
    #[schema(example = "carWash")]
    pub business_type: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
}

#[derive(ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct ServiceInputDoc {
    pub service_name: String,
    #[schema(example = "25.00")]
    pub price: String,
    #[schema(example = "carRental")]
    pub business_type: String,
    pub car_name: Option<String>,
    pub car_description: Option<String>,
    pub seats: Option<i32>,
    pub engine_capacity: Option<i32>,
    pub transmission: Option<String>,
}

#[derive(ToSchema)]
pub struct CreateRequestDoc { pub service_id: Uuid }

#[derive(ToSchema)]
pub struct SetStatusDoc {
    #[schema(example = "accepted")]
    pub status: String,
}

#[derive(ToSchema)]
pub struct ErrorBody {
    pub status: u16,
    pub title: String,
    pub detail: Option<String>,
    pub code: Option<u16>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::businesses::list,
        crate::routes::businesses::get,
        crate::routes::businesses::services,
        crate::routes::services::get,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::services::upload_image,
        crate::routes::requests::create,
        crate::routes::requests::list,
        crate::routes::requests::get,
        crate::routes::requests::set_status,
        crate::routes::requests::set_paid,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            ServiceInputDoc,
            CreateRequestDoc,
            SetStatusDoc,
            ErrorBody,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "businesses"),
        (name = "services"),
        (name = "requests")
    )
)]
pub struct ApiDoc;
