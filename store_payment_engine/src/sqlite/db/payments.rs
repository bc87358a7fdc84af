use chrono::Utc;
use log::{debug, trace};
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{NewPayment, Payment, PaymentSearchField, PaymentUpdate},
    traits::PaymentGatewayError,
};

/// Inserts a new payment record using the given connection. This is not atomic. You can embed this call inside a
/// transaction if you need to ensure atomicity, and pass `&mut *tx` as the connection argument.
pub async fn insert_payment(payment: NewPayment, conn: &mut SqliteConnection) -> Result<Payment, PaymentGatewayError> {
    let payment: Payment = sqlx::query_as(
        r#"
            INSERT INTO payments (user_id, order_id, amount, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(payment.user_id)
    .bind(payment.order_id)
    .bind(payment.amount)
    .bind(payment.status)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;
    debug!("📝️ Payment #{} for order [{}] stored as {}", payment.id, payment.order_id, payment.status);
    Ok(payment)
}

pub async fn fetch_payments(conn: &mut SqliteConnection) -> Result<Vec<Payment>, PaymentGatewayError> {
    let payments = sqlx::query_as("SELECT * FROM payments ORDER BY id").fetch_all(conn).await?;
    Ok(payments)
}

pub async fn fetch_payment(id: i64, conn: &mut SqliteConnection) -> Result<Option<Payment>, PaymentGatewayError> {
    let payment = sqlx::query_as("SELECT * FROM payments WHERE id = $1").bind(id).fetch_optional(conn).await?;
    Ok(payment)
}

pub async fn update_payment(
    id: i64,
    update: PaymentUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Payment>, PaymentGatewayError> {
    if update.is_empty() {
        debug!("📝️ No fields to update for payment #{id}. Update request skipped.");
        return Err(PaymentGatewayError::PaymentModificationNoOp);
    }
    let mut builder = QueryBuilder::new("UPDATE payments SET ");
    let mut set_clause = builder.separated(", ");
    if let Some(user_id) = update.user_id {
        set_clause.push("user_id = ");
        set_clause.push_bind_unseparated(user_id);
    }
    if let Some(order_id) = update.order_id {
        set_clause.push("order_id = ");
        set_clause.push_bind_unseparated(order_id);
    }
    if let Some(amount) = update.amount {
        set_clause.push("amount = ");
        set_clause.push_bind_unseparated(amount);
    }
    if let Some(status) = update.status {
        set_clause.push("status = ");
        set_clause.push_bind_unseparated(status);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING *");
    trace!("📝️ Executing query: {}", builder.sql());
    let payment = builder.build_query_as::<Payment>().fetch_optional(conn).await?;
    Ok(payment)
}

pub async fn delete_payment(id: i64, conn: &mut SqliteConnection) -> Result<bool, PaymentGatewayError> {
    let result = sqlx::query("DELETE FROM payments WHERE id = $1").bind(id).execute(conn).await?;
    Ok(result.rows_affected() > 0)
}

pub async fn search_payments(
    field: PaymentSearchField,
    value: &str,
    conn: &mut SqliteConnection,
) -> Result<Vec<Payment>, PaymentGatewayError> {
    let mut builder = QueryBuilder::new("SELECT * FROM payments WHERE ");
    builder.push(field.column());
    builder.push(" = ");
    builder.push_bind(value);
    builder.push(" ORDER BY id");
    trace!("📝️ Executing query: {}", builder.sql());
    let payments = builder.build_query_as::<Payment>().fetch_all(conn).await?;
    Ok(payments)
}
