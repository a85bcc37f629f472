use async_trait::async_trait;
use common::pagination::Pagination;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{DatabaseConnection, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::directory::domain::{Business, NewBusiness};
use crate::directory::repository::BusinessRepository;
use crate::errors::ServiceError;

use models::business;

pub struct SeaOrmBusinessRepository {
    pub db: DatabaseConnection,
}

fn to_domain(m: business::Model) -> Result<Business, ServiceError> {
    Ok(Business {
        id: m.id,
        business_type: m.business_type.parse().map_err(ServiceError::Db)?,
        business_name: m.business_name,
        location: m.location,
        image_url: m.image_url,
    })
}

fn like_pattern(q: &str) -> String {
    let escaped = q.trim().to_lowercase().replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl BusinessRepository for SeaOrmBusinessRepository {
    async fn create(&self, input: NewBusiness) -> Result<Business, ServiceError> {
        let m = business::create(&self.db, input.owner_id, &input.business_name, input.business_type.as_str(), &input.location).await?;
        to_domain(m)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Business>, ServiceError> {
        let m = business::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        m.map(to_domain).transpose()
    }

    async fn search(&self, query: Option<&str>, page: Pagination) -> Result<(Vec<Business>, u64), ServiceError> {
        let mut select = business::Entity::find()
            .order_by(SimpleExpr::from(Func::lower(Expr::col(business::Column::BusinessName))), Order::Asc)
            .order_by_asc(business::Column::BusinessName);
        if let Some(q) = query.filter(|q| !q.trim().is_empty()) {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(business::Column::BusinessName)))
                    .like(LikeExpr::new(like_pattern(q)).escape('\\')),
            );
        }
        let (page_idx, per_page) = page.normalize();
        let paginator = select.paginate(&self.db, per_page);
        let total = paginator.num_items().await.map_err(|e| ServiceError::Db(e.to_string()))?;
        let rows = paginator.fetch_page(page_idx).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        let items = rows.into_iter().map(to_domain).collect::<Result<Vec<_>, _>>()?;
        Ok((items, total))
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern(" Spar%k_ "), "%spar\\%k\\_%");
    }
}
