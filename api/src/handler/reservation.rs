use crate::{
    extractor::{ClaimedContactPerson, JsonBody, QueryParams},
    model::reservation::{
        CreateReservationRequest, DeleteReservationQuery, ReservationResponse, ReservationSummary,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::reservation::{event::DeleteReservation, Location};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};
use strum::VariantNames;

pub async fn show_reservation_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<ReservationSummary>>> {
    registry
        .reservation_repository()
        .find_all()
        .await
        .map(|reservations| {
            reservations
                .into_iter()
                .map(ReservationSummary::from)
                .collect()
        })
        .map(Json)
}

pub async fn register_reservation(
    State(registry): State<AppRegistry>,
    JsonBody(req): JsonBody<CreateReservationRequest>,
) -> AppResult<(StatusCode, Json<ReservationResponse>)> {
    req.validate()?;

    let policy = registry.booking_policy();
    let event = req.into_event(policy.clock())?;
    // 営業時間外・週末の予約はここで弾く。重複の確認はリポジトリ側で行う
    policy.check(&event.slot)?;

    let reservation = registry.reservation_repository().create(event).await?;
    tracing::info!(
        location = %reservation.location,
        start = %reservation.slot.start,
        end = %reservation.slot.end,
        "reservation created"
    );

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

pub async fn cancel_reservation(
    ClaimedContactPerson(claimed): ClaimedContactPerson,
    State(registry): State<AppRegistry>,
    QueryParams(query): QueryParams<DeleteReservationQuery>,
) -> AppResult<StatusCode> {
    query.validate()?;

    let (location, slot) = query.into_key(registry.booking_policy().clock())?;
    let repository = registry.reservation_repository();

    let reservation = repository
        .find(location, slot)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("reservation not found".into()))?;

    if !claimed.matches(&reservation.contact_person) {
        return Err(AppError::ForbiddenOperation(
            "contact person verification failed".into(),
        ));
    }

    // 照合済みの登録値そのもので削除する
    repository
        .delete(DeleteReservation::new(
            location,
            slot,
            reservation.contact_person,
        ))
        .await?;
    tracing::info!(location = %location, start = %slot.start, "reservation deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn show_location_list() -> Json<Vec<&'static str>> {
    Json(Location::VARIANTS.to_vec())
}
