use crate::database::{model::reservation::ReservationRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::reservation::{
    event::{CreateReservation, DeleteReservation},
    Location, Reservation, TimeSlot,
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};

// 排他制約違反とシリアライズ失敗は重複予約として扱う
const EXCLUSION_VIOLATION: &str = "23P01";
const SERIALIZATION_FAILURE: &str = "40001";

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(
            r#"
                SELECT title, contact_person, email, location, start_time, end_time
                FROM reservations
                ORDER BY start_time ASC, location ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Reservation::try_from)
        .collect()
    }

    async fn create(&self, event: CreateReservation) -> AppResult<Reservation> {
        let mut tx = self.db.begin().await?;

        // 重複チェックと INSERT の間に他の予約が割り込まないようにする
        self.set_transaction_serializable(&mut tx).await?;

        // 同じ部屋で時間帯が重なる予約がないか確認する
        // 重複条件（端点の接触も重複とみなす）:
        //     existing.start <= new.end AND existing.end >= new.start
        {
            let overlap: Option<(String,)> = sqlx::query_as(
                r#"
                    SELECT title
                    FROM reservations
                    WHERE location = $1
                      AND start_time <= $3
                      AND end_time >= $2
                    LIMIT 1
                "#,
            )
            .bind(event.location.as_ref())
            .bind(event.slot.start)
            .bind(event.slot.end)
            .fetch_optional(&mut *tx)
            .await
            .map_err(write_error(event.location, AppError::SpecificOperationError))?;

            if let Some((title,)) = overlap {
                tracing::warn!(
                    location = %event.location,
                    existing = %title,
                    "reservation overlaps an existing one"
                );
                return Err(overlap_error(event.location));
            }
        }

        let row = sqlx::query_as::<_, ReservationRow>(
            r#"
                INSERT INTO reservations
                (title, contact_person, email, location, start_time, end_time)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING title, contact_person, email, location, start_time, end_time
            "#,
        )
        .bind(&event.title)
        .bind(&event.contact_person)
        .bind(&event.email)
        .bind(event.location.as_ref())
        .bind(event.slot.start)
        .bind(event.slot.end)
        .fetch_one(&mut *tx)
        .await
        .map_err(write_error(event.location, AppError::SpecificOperationError))?;

        tx.commit()
            .await
            .map_err(write_error(event.location, AppError::TransactionError))?;

        Reservation::try_from(row)
    }

    async fn find(&self, location: Location, slot: TimeSlot) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, ReservationRow>(
            r#"
                SELECT title, contact_person, email, location, start_time, end_time
                FROM reservations
                WHERE location = $1
                  AND start_time = $2
                  AND end_time = $3
                LIMIT 1
            "#,
        )
        .bind(location.as_ref())
        .bind(slot.start)
        .bind(slot.end)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Reservation::try_from)
        .transpose()
    }

    async fn delete(&self, event: DeleteReservation) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                DELETE FROM reservations
                WHERE location = $1
                  AND start_time = $2
                  AND end_time = $3
                  AND contact_person = $4
            "#,
        )
        .bind(event.location.as_ref())
        .bind(event.slot.start)
        .bind(event.slot.end)
        .bind(&event.contact_person)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("reservation not found".into()));
        }

        Ok(())
    }
}

impl ReservationRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}

fn overlap_error(location: Location) -> AppError {
    AppError::Conflict(format!(
        "{location} is already reserved at this time, choose another time or location"
    ))
}

fn write_error(
    location: Location,
    otherwise: fn(sqlx::Error) -> AppError,
) -> impl Fn(sqlx::Error) -> AppError {
    move |e| {
        let code = e
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code.into_owned());
        match code.as_deref() {
            Some(EXCLUSION_VIOLATION | SERIALIZATION_FAILURE) => {
                tracing::warn!(
                    location = %location,
                    error.message = %e,
                    "concurrent reservation rejected"
                );
                overlap_error(location)
            }
            _ => otherwise(e),
        }
    }
}
