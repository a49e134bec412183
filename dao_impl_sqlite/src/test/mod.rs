
use std::sync::Arc;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::TransactionDaoImpl;

pub(crate) async fn setup_pool() -> Arc<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    crate::run_migrations(&pool).await.unwrap();
    Arc::new(pool)
}

pub(crate) fn transaction_dao(pool: Arc<SqlitePool>) -> TransactionDaoImpl {
    TransactionDaoImpl::new(pool)
}
