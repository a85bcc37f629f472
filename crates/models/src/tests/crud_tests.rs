use crate::{business, request, service, user, user_credentials};
use sea_orm::EntityTrait;
use anyhow::Result;
use uuid::Uuid;

use super::setup_test_db;

fn wash_fields(name: &str) -> service::ServiceFields {
    service::ServiceFields {
        service_name: name.to_string(),
        price: "25".into(),
        business_type: business::TYPE_CAR_WASH.into(),
        car_name: None,
        car_description: None,
        seats: None,
        engine_capacity: None,
        transmission: None,
        image_url: None,
    }
}

async fn owner_with_business(db: &sea_orm::DatabaseConnection) -> Result<business::Model> {
    let email = format!("owner_{}@example.com", Uuid::new_v4());
    let owner = user::create(db, &email, "Owner", None, user::ROLE_BUSINESS_OWNER).await?;
    Ok(business::create(db, owner.id, "Sparkle Wash", business::TYPE_CAR_WASH, "Accra").await?)
}

/// Test user + credentials CRUD operations
#[tokio::test]
async fn test_user_and_credentials_crud() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let email = format!("Customer_{}@Example.com", Uuid::new_v4());
    let created = user::create(&db, &email, "Ama Mensah", Some("+233201234567"), user::ROLE_CUSTOMER).await?;
    assert_eq!(created.email, email.to_lowercase());
    assert_eq!(created.role, "customer");

    let found = user::find_by_email(&db, &email).await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));

    let c1 = user_credentials::upsert_password(&db, created.id, "hash-1".into(), "argon2").await?;
    let c2 = user_credentials::upsert_password(&db, created.id, "hash-2".into(), "argon2").await?;
    assert_eq!(c1.id, c2.id);
    assert_eq!(c2.password_hash, "hash-2");

    user::Entity::delete_by_id(created.id).exec(&db).await?;
    // credentials cascade with the user
    assert!(user_credentials::find_by_user(&db, created.id).await?.is_none());
    Ok(())
}

/// Test that invalid input never reaches the database
#[tokio::test]
async fn test_user_validation_rejects_bad_role() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let res = user::create(&db, "x@example.com", "X", None, "admin").await;
    assert!(matches!(res, Err(crate::errors::ModelError::Validation(_))));
    Ok(())
}

/// Test that a duplicate email hits the unique key as a conflict, not a raw db error
#[tokio::test]
async fn test_duplicate_email_is_conflict() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };
    let email = format!("dup_{}@example.com", Uuid::new_v4());
    let first = user::create(&db, &email, "First", None, user::ROLE_CUSTOMER).await?;
    let second = user::create(&db, &email.to_uppercase(), "Second", None, user::ROLE_CUSTOMER).await;
    assert!(matches!(second, Err(crate::errors::ModelError::Conflict(_))));
    assert!(user::hard_delete(&db, first.id).await?);
    Ok(())
}

/// Test service CRUD and that deleting a service orphans its requests
#[tokio::test]
async fn test_service_delete_leaves_requests() -> Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let biz = owner_with_business(&db).await?;
    let svc = service::create(&db, biz.id, wash_fields("Basic Wash")).await?;
    assert_eq!(svc.business_id, biz.id);

    let mut fields = wash_fields("Premium Wash");
    fields.price = "40".into();
    let updated = service::overwrite(&db, svc.id, fields).await?;
    assert_eq!(updated.service_name, "Premium Wash");
    assert_eq!(updated.price, "40");

    let customer = user::create(&db, &format!("c_{}@example.com", Uuid::new_v4()), "C", None, user::ROLE_CUSTOMER).await?;
    let req = request::create(&db, customer.id, svc.id).await?;

    assert!(service::hard_delete(&db, svc.id).await?);
    assert!(!service::hard_delete(&db, svc.id).await?);

    let orphan = request::Entity::find_by_id(req.id).one(&db).await?;
    assert_eq!(orphan.map(|r| r.service_id), Some(svc.id));

    user::Entity::delete_by_id(customer.id).exec(&db).await?;
    user::Entity::delete_by_id(biz.id).exec(&db).await?;
    Ok(())
}
