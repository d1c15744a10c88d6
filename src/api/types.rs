use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Member, commands::RegisterMember};

/// 会員登録リクエスト（POST /members）
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterMemberRequest {
    pub name: String,
}

impl RegisterMemberRequest {
    /// リクエストをコマンドに変換（登録日時はサーバー時刻）
    pub fn to_command(&self) -> RegisterMember {
        RegisterMember::now(self.name.clone())
    }
}

/// 会員登録レスポンス
#[derive(Debug, Deserialize, Serialize)]
pub struct MemberRegisteredResponse {
    pub member_id: Uuid,
}

/// 会員レスポンス（GET /members/:id と GET /members）
#[derive(Debug, Deserialize, Serialize)]
pub struct MemberResponse {
    pub member_id: Uuid,
    pub name: String,
    pub joined_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            member_id: member.id.value(),
            name: member.name.into_inner(),
            joined_at: member.joined_at,
        }
    }
}

/// エラーレスポンス
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
