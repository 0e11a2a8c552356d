use crate::domain::{
    models::booking::Booking,
    ports::{BookingPage, BookingQuery, BookingRepository},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn push_filters<'a>(qb: &mut QueryBuilder<'a, Sqlite>, tenant_id: &'a str, query: &'a BookingQuery) {
    qb.push(" WHERE tenant_id = ").push_bind(tenant_id);

    if let Some(staff_id) = &query.staff_id {
        qb.push(" AND staff_id = ").push_bind(staff_id);
    }
    if let Some(customer_id) = &query.customer_id {
        qb.push(" AND customer_id = ").push_bind(customer_id);
    }
    if let Some(status) = query.status {
        qb.push(" AND status = ").push_bind(status);
    }
    if let Some(from) = query.from {
        qb.push(" AND start_time >= ").push_bind(from);
    }
    if let Some(to) = query.to {
        qb.push(" AND start_time <= ").push_bind(to);
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, tenant_id, customer_id, service_id, staff_id, start_time,
                                   end_time, status, price, deposit, notes, cancelled_at,
                                   created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&booking.id)
        .bind(&booking.tenant_id)
        .bind(&booking.customer_id)
        .bind(&booking.service_id)
        .bind(&booking.staff_id)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.status)
        .bind(booking.price)
        .bind(booking.deposit)
        .bind(&booking.notes)
        .bind(booking.cancelled_at)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, tenant_id: &str, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE tenant_id = ? AND id = ?")
            .bind(tenant_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_tenant(
        &self,
        tenant_id: &str,
        query: &BookingQuery,
    ) -> Result<BookingPage, AppError> {
        let mut count_qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM bookings");
        push_filters(&mut count_qb, tenant_id, query);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = query.offset.unwrap_or(0).max(0);

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM bookings");
        push_filters(&mut qb, tenant_id, query);
        qb.push(" ORDER BY start_time ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let bookings = qb
            .build_query_as::<Booking>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(BookingPage { bookings, total })
    }

    async fn list_by_customer(
        &self,
        tenant_id: &str,
        customer_id: &str,
    ) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE tenant_id = ? AND customer_id = ? ORDER BY start_time ASC",
        )
        .bind(tenant_id)
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn list_active_in_range(
        &self,
        tenant_id: &str,
        staff_id: Option<&str>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Booking>, AppError> {
        // One staff bucket only: the unassigned bucket is staff_id IS
        // NULL, not "any staff".
        match staff_id {
            Some(sid) => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings
                 WHERE tenant_id = ? AND staff_id = ? AND status != 'cancelled'
                   AND start_time < ? AND end_time > ?",
            )
            .bind(tenant_id)
            .bind(sid)
            .bind(end)
            .bind(start)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database),
            None => sqlx::query_as::<_, Booking>(
                "SELECT * FROM bookings
                 WHERE tenant_id = ? AND staff_id IS NULL AND status != 'cancelled'
                   AND start_time < ? AND end_time > ?",
            )
            .bind(tenant_id)
            .bind(end)
            .bind(start)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database),
        }
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = ?, notes = ?, cancelled_at = ?, updated_at = ?
             WHERE id = ? AND tenant_id = ?
             RETURNING *",
        )
        .bind(booking.status)
        .bind(&booking.notes)
        .bind(booking.cancelled_at)
        .bind(booking.updated_at)
        .bind(&booking.id)
        .bind(&booking.tenant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
