use crate::application::member::MemberApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub struct ApiError(MemberApplicationError);

impl From<MemberApplicationError> for ApiError {
    fn from(err: MemberApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self.0 {
            // 404 Not Found - リクエストされた会員が存在しない
            MemberApplicationError::MemberNotFound(id) => (
                StatusCode::NOT_FOUND,
                "MEMBER_NOT_FOUND",
                format!("Member {} not found", id),
            ),

            // 409 Conflict - 同名の会員が既に存在する
            MemberApplicationError::DuplicateMember(ref name) => (
                StatusCode::CONFLICT,
                "DUPLICATE_MEMBER",
                format!("Member name already taken: {}", name),
            ),

            // 422 Unprocessable Entity - 入力値の検証エラー
            MemberApplicationError::InvalidMemberName(ref e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_MEMBER_NAME",
                e.to_string(),
            ),

            // 500 Internal Server Error - システム障害
            // 内部エラーの詳細はログに記録し、クライアントには一般的なメッセージのみを返す
            MemberApplicationError::StoreError(ref e) => {
                tracing::error!(error = ?e, "Member store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MEMBER_STORE_ERROR",
                    "Failed to access member store".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
