use crate::domain::{MemberId, MemberNameError};
use crate::ports::MemberStoreError;
use thiserror::Error;

/// 会員管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum MemberApplicationError {
    /// 同名の会員が既に存在する（同じ名前での再試行は不可）
    #[error("Member already exists: {0}")]
    DuplicateMember(String),

    /// 会員が見つからない
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    /// 会員名が不正
    #[error("Invalid member name: {0}")]
    InvalidMemberName(#[from] MemberNameError),

    /// MemberStoreのエラー
    #[error("Member store error")]
    StoreError(#[source] MemberStoreError),
}

impl From<MemberStoreError> for MemberApplicationError {
    fn from(err: MemberStoreError) -> Self {
        match err {
            MemberStoreError::DuplicateName(name) => MemberApplicationError::DuplicateMember(name),
            other => MemberApplicationError::StoreError(other),
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, MemberApplicationError>;
