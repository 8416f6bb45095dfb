use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("contact person is required to verify the reservation owner")]
    MissingIdentity,
    #[error("{0}")]
    UnauthorizedError(String),
    #[error("{0}")]
    ForbiddenOperation(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    ConversionEntityError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) | AppError::MissingIdentity => {
                StatusCode::BAD_REQUEST
            }
            AppError::UnauthorizedError(_) | AppError::ForbiddenOperation(_) => {
                StatusCode::FORBIDDEN
            }
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // バックエンドのエラーメッセージはそのままクライアントへ返す
    fn message(&self) -> String {
        match self {
            AppError::TransactionError(e) | AppError::SpecificOperationError(e) => {
                format!("{self} {e}")
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        match status_code {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(
                    error.cause_chain = ?self,
                    error.message = %self,
                    "Unexpected error happened"
                );
            }
            StatusCode::CONFLICT | StatusCode::FORBIDDEN => {
                tracing::warn!(error.message = %self, "Request refused");
            }
            _ => {
                tracing::debug!(error.message = %self, "Client error");
            }
        }

        let body = Json(serde_json::json!({ "error": self.message() }));
        (status_code, body).into_response()
    }
}

// エラー型が AppError なものを扱える Result 型
pub type AppResult<T> = Result<T, AppError>;
