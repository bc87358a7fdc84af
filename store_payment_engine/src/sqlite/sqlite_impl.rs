//! `SqliteDatabase` is the SQLite implementation of [`PaymentManagement`].
use std::fmt::Debug;

use log::*;
use sqlx::{migrate, SqlitePool};

use super::db::{new_pool, payments};
use crate::{
    db_types::{NewPayment, Payment, PaymentSearchField, PaymentUpdate},
    traits::{PaymentGatewayError, PaymentManagement},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl PaymentManagement for SqliteDatabase {
    async fn insert_payment(&self, payment: NewPayment) -> Result<Payment, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        payments::insert_payment(payment, &mut conn).await
    }

    async fn fetch_payments(&self) -> Result<Vec<Payment>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        payments::fetch_payments(&mut conn).await
    }

    async fn fetch_payment(&self, id: i64) -> Result<Option<Payment>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        payments::fetch_payment(id, &mut conn).await
    }

    async fn update_payment(&self, id: i64, update: PaymentUpdate) -> Result<Option<Payment>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        payments::update_payment(id, update, &mut conn).await
    }

    async fn delete_payment(&self, id: i64) -> Result<bool, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        payments::delete_payment(id, &mut conn).await
    }

    async fn search_payments(
        &self,
        field: PaymentSearchField,
        value: &str,
    ) -> Result<Vec<Payment>, PaymentGatewayError> {
        let mut conn = self.pool.acquire().await?;
        payments::search_payments(field, value, &mut conn).await
    }
}

impl SqliteDatabase {
    /// Opens a connection pool on `url`, creating the database file if it does not exist yet.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        trace!("Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { pool })
    }

    /// Brings the schema up to date. Migrations that have already been applied are skipped.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        db_types::PaymentStatus,
        test_utils::prepare_env::TempDatabase,
    };

    async fn new_db() -> (SqliteDatabase, TempDatabase) {
        let file = TempDatabase::new().prepare().await;
        let db = SqliteDatabase::new_with_url(file.url(), 1).await.expect("Error creating database");
        (db, file)
    }

    #[tokio::test]
    async fn insert_and_fetch() {
        let (db, _file) = new_db().await;
        let first = db.insert_payment(NewPayment::new("alice", "order-1", 100.0, PaymentStatus::Success)).await.unwrap();
        let second = db.insert_payment(NewPayment::new("bob", "order-2", 12.5, PaymentStatus::Failed)).await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(first.user_id, "alice");
        assert_eq!(first.order_id, "order-1");
        assert_eq!(first.amount, 100.0);
        assert_eq!(first.status, PaymentStatus::Success);
        assert!(second.created_at >= first.created_at);

        let fetched = db.fetch_payment(second.id).await.unwrap().unwrap();
        assert_eq!(fetched, second);
        assert!(db.fetch_payment(second.id + 100).await.unwrap().is_none());

        let all = db.fetch_payments().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn empty_table() {
        let (db, _file) = new_db().await;
        assert!(db.fetch_payments().await.unwrap().is_empty());
        assert!(!db.delete_payment(1).await.unwrap());
    }

    #[tokio::test]
    async fn update_payment() {
        let (db, _file) = new_db().await;
        let payment = db.insert_payment(NewPayment::new("alice", "order-1", 100.0, PaymentStatus::Failed)).await.unwrap();

        let update = PaymentUpdate::default().with_status(PaymentStatus::Success).with_amount(150.0);
        let updated = db.update_payment(payment.id, update).await.unwrap().unwrap();
        assert_eq!(updated.id, payment.id);
        assert_eq!(updated.status, PaymentStatus::Success);
        assert_eq!(updated.amount, 150.0);
        assert_eq!(updated.user_id, "alice");
        assert_eq!(updated.created_at, payment.created_at);

        let err = db.update_payment(payment.id, PaymentUpdate::default()).await.unwrap_err();
        assert!(matches!(err, PaymentGatewayError::PaymentModificationNoOp));

        let missing = db.update_payment(payment.id + 1, PaymentUpdate::default().with_user_id("carol")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn delete_payment() {
        let (db, _file) = new_db().await;
        let payment = db.insert_payment(NewPayment::new("alice", "order-1", 100.0, PaymentStatus::Failed)).await.unwrap();
        assert!(db.delete_payment(payment.id).await.unwrap());
        assert!(!db.delete_payment(payment.id).await.unwrap());
        assert!(db.fetch_payment(payment.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_payments() {
        let (db, _file) = new_db().await;
        db.insert_payment(NewPayment::new("alice", "order-1", 100.0, PaymentStatus::Success)).await.unwrap();
        db.insert_payment(NewPayment::new("alice", "order-2", 50.0, PaymentStatus::Failed)).await.unwrap();
        db.insert_payment(NewPayment::new("bob", "order-3", 75.0, PaymentStatus::Success)).await.unwrap();

        let alice = db.search_payments(PaymentSearchField::UserId, "alice").await.unwrap();
        assert_eq!(alice.len(), 2);
        assert!(alice.iter().all(|p| p.user_id == "alice"));

        let order = db.search_payments(PaymentSearchField::OrderId, "order-3").await.unwrap();
        assert_eq!(order.len(), 1);
        assert_eq!(order[0].user_id, "bob");

        let successes = db.search_payments(PaymentSearchField::Status, "success").await.unwrap();
        assert_eq!(successes.iter().map(|p| p.order_id.as_str()).collect::<Vec<_>>(), vec!["order-1", "order-3"]);

        let nobody = db.search_payments(PaymentSearchField::UserId, "' OR '1'='1").await.unwrap();
        assert!(nobody.is_empty());
    }
}
