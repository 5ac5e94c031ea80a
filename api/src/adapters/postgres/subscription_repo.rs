//! PostgreSQL adapter for SubscriptionRepository

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::entities::{
    ListFilter, NewSubscription, Subscription, SubscriptionId, SubscriptionTotals, SummaryFilter,
    UserId,
};
use crate::domain::ports::SubscriptionRepository;
use crate::entity::subscriptions;
use crate::error::DomainError;

/// PostgreSQL implementation of SubscriptionRepository
pub struct PostgresSubscriptionRepository {
    db: DatabaseConnection,
}

impl PostgresSubscriptionRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn create(&self, subscription: &NewSubscription) -> Result<Subscription, DomainError> {
        let id = SubscriptionId::new();
        let now = Utc::now().fixed_offset();

        let model = subscriptions::ActiveModel {
            id: Set(id.0),
            service_name: Set(subscription.service_name.clone()),
            price: Set(subscription.price),
            user_id: Set(subscription.user_id.0),
            start_date: Set(subscription.start_date),
            end_date: Set(subscription.end_date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let result = subscriptions::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn update(&self, subscription: &Subscription) -> Result<Subscription, DomainError> {
        let now = Utc::now().fixed_offset();

        // user_id and created_at are never rewritten
        let result = subscriptions::ActiveModel {
            id: Set(subscription.id.0),
            service_name: Set(subscription.service_name.clone()),
            price: Set(subscription.price),
            start_date: Set(subscription.start_date),
            end_date: Set(subscription.end_date),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                DomainError::NotFound(format!("Subscription {} not found", subscription.id))
            }
            e => DomainError::Database(e.to_string()),
        })?;

        Ok(result.into())
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<u64, DomainError> {
        let result = subscriptions::Entity::delete_by_id(id.0)
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    async fn list(&self, filter: &ListFilter) -> Result<Vec<Subscription>, DomainError> {
        let mut query = subscriptions::Entity::find();
        if let Some(user_id) = filter.user_id {
            query = query.filter(subscriptions::Column::UserId.eq(user_id.0));
        }

        let results = query
            .order_by_asc(subscriptions::Column::CreatedAt)
            .order_by_asc(subscriptions::Column::Id)
            .offset(filter.offset)
            .limit(filter.limit)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn summarize(&self, filter: &SummaryFilter) -> Result<SubscriptionTotals, DomainError> {
        // Any overlap with the period counts; a NULL end_date means still running
        let mut query = subscriptions::Entity::find()
            .filter(subscriptions::Column::StartDate.lte(filter.period_end))
            .filter(
                Condition::any()
                    .add(subscriptions::Column::EndDate.gte(filter.period_start))
                    .add(subscriptions::Column::EndDate.is_null()),
            );
        if let Some(user_id) = filter.user_id {
            query = query.filter(subscriptions::Column::UserId.eq(user_id.0));
        }
        if let Some(service_name) = &filter.service_name {
            query = query.filter(subscriptions::Column::ServiceName.eq(service_name.as_str()));
        }

        // SUM over zero rows is NULL
        let row: Option<(Option<Decimal>, i64)> = query
            .select_only()
            .column_as(Expr::col(subscriptions::Column::Price).sum(), "total_price")
            .column_as(Expr::col(subscriptions::Column::Id).count(), "count")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let (total_price, count) = row.unwrap_or((None, 0));

        Ok(SubscriptionTotals {
            total_price: total_price.unwrap_or(Decimal::ZERO),
            count: u64::try_from(count).unwrap_or_default(),
        })
    }
}

/// Convert SeaORM model to domain entity
impl From<subscriptions::Model> for Subscription {
    fn from(model: subscriptions::Model) -> Self {
        Subscription {
            id: SubscriptionId(model.id),
            service_name: model.service_name,
            price: model.price,
            user_id: UserId(model.user_id),
            start_date: model.start_date,
            end_date: model.end_date,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
