use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::errors::MemberNameError;

/// 会員名の最大文字数（membersテーブルのVARCHAR(255)に対応）
pub const MEMBER_NAME_MAX_LEN: usize = 255;

/// 会員ID - 会員集約の識別子
///
/// ストアが永続化時に採番する。採番後は不変。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(Uuid);

impl MemberId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// 会員名
///
/// 不変条件：
/// - 空文字・空白のみは不可
/// - 制御文字（NUL等）は不可。PostgreSQLのtext型はNULを格納できない
/// - 255文字以下
///
/// 重複判定は大文字小文字を区別する完全一致のため、入力値をそのまま保持する
/// （トリムや正規化はしない）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberName(String);

impl MemberName {
    /// 会員名を検証して生成する
    ///
    /// # エラー
    /// - 空文字・空白のみの場合は`MemberNameError::Empty`
    /// - 制御文字を含む場合は`MemberNameError::ControlCharacter`
    /// - 255文字を超える場合は`MemberNameError::TooLong`
    pub fn new(name: impl Into<String>) -> Result<Self, MemberNameError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(MemberNameError::Empty);
        }

        if let Some(found) = name.chars().find(|c| c.is_control()) {
            return Err(MemberNameError::ControlCharacter { found });
        }

        let len = name.chars().count();
        if len > MEMBER_NAME_MAX_LEN {
            return Err(MemberNameError::TooLong {
                max: MEMBER_NAME_MAX_LEN,
                actual: len,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MemberName {
    type Error = MemberNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MemberName> for String {
    fn from(name: MemberName) -> Self {
        name.0
    }
}

impl AsRef<str> for MemberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
