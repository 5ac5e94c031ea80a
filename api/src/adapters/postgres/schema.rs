//! Schema management for the subscriptions table
//!
//! The table is derived from the SeaORM entity so the two cannot drift.

use sea_orm::{
    sea_query::{Index, Table},
    ConnectionTrait, DatabaseConnection, Schema,
};

use crate::entity::subscriptions;
use crate::error::DomainError;

/// Create the table and its indexes if they do not exist yet
pub async fn apply(db: &DatabaseConnection) -> Result<(), DomainError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(subscriptions::Entity);
    table.if_not_exists();

    let user_index = Index::create()
        .if_not_exists()
        .name("idx_subscriptions_user_id")
        .table(subscriptions::Entity)
        .col(subscriptions::Column::UserId)
        .to_owned();

    let end_date_index = Index::create()
        .if_not_exists()
        .name("idx_subscriptions_end_date")
        .table(subscriptions::Entity)
        .col(subscriptions::Column::EndDate)
        .to_owned();

    for statement in [
        backend.build(&table),
        backend.build(&user_index),
        backend.build(&end_date_index),
    ] {
        db.execute(statement)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;
    }

    tracing::info!("Subscriptions schema is up to date");
    Ok(())
}

/// Drop the table (and with it, its indexes)
pub async fn revert(db: &DatabaseConnection) -> Result<(), DomainError> {
    let backend = db.get_database_backend();
    let drop = Table::drop()
        .table(subscriptions::Entity)
        .if_exists()
        .to_owned();

    db.execute(backend.build(&drop))
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;

    tracing::info!("Subscriptions schema dropped");
    Ok(())
}
