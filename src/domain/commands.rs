use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// コマンド：会員を登録する
///
/// `name`は未検証の入力値。検証は登録処理の中で行う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterMember {
    pub name: String,
    pub joined_at: DateTime<Utc>,
}

impl RegisterMember {
    /// 現在時刻で登録するコマンドを作成
    pub fn now(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            joined_at: Utc::now(),
        }
    }
}
