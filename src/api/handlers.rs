use crate::application::member::MemberRegistry;
use crate::domain::MemberId;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    types::{MemberRegisteredResponse, MemberResponse, RegisterMemberRequest},
};

/// ハンドラー間で共有されるアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub registry: MemberRegistry,
}

/// POST /members - 会員を登録
///
/// 強制されるビジネスルール:
/// - 会員名が空でないこと
/// - 同名の会員が存在しないこと（重複時は409）
pub async fn register_member(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterMemberRequest>,
) -> Result<(StatusCode, Json<MemberRegisteredResponse>), ApiError> {
    let member_id = state.registry.register(req.to_command()).await?;

    Ok((
        StatusCode::CREATED,
        Json(MemberRegisteredResponse {
            member_id: member_id.value(),
        }),
    ))
}

/// GET /members/:id - 会員をIDで取得
pub async fn get_member_by_id(
    State(state): State<Arc<AppState>>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member = state
        .registry
        .find_one(MemberId::from_uuid(member_id))
        .await?;

    Ok(Json(MemberResponse::from(member)))
}

/// GET /members - 全会員を登録日時順に取得
pub async fn list_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = state.registry.find_members().await?;

    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}
