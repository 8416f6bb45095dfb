use crate::model::reservation::{
    event::{CreateReservation, DeleteReservation},
    Location, Reservation, TimeSlot,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // すべての予約を開始時刻の昇順で取得する
    async fn find_all(&self) -> AppResult<Vec<Reservation>>;
    // 重複チェックを行ったうえで予約を作成する。重複時は AppError::Conflict
    async fn create(&self, event: CreateReservation) -> AppResult<Reservation>;
    // 部屋と時間帯が完全に一致する予約を取得する
    async fn find(&self, location: Location, slot: TimeSlot) -> AppResult<Option<Reservation>>;
    // 部屋・時間帯・担当者が一致する予約を削除する
    async fn delete(&self, event: DeleteReservation) -> AppResult<()>;
}
