use crate::domain::{Member, MemberId, MemberName, NewMember};
use async_trait::async_trait;
use thiserror::Error;

/// 会員ストアのエラー
#[derive(Debug, Error)]
pub enum MemberStoreError {
    /// ストア側の一意制約により同名の会員を拒否した
    #[error("member name already exists: {0}")]
    DuplicateName(String),

    /// バックエンド（DB接続・クエリ等）の障害
    #[error("member store backend error")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<sqlx::Error> for MemberStoreError {
    fn from(err: sqlx::Error) -> Self {
        MemberStoreError::Backend(Box::new(err))
    }
}

impl From<sqlx::migrate::MigrateError> for MemberStoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        MemberStoreError::Backend(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, MemberStoreError>;

/// 会員ストアポート
///
/// 会員コレクションの永続化を抽象化する。
/// ストアは会員コレクションを排他的に所有し、IDの採番も担う。
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// 重複確認と登録をまとめて行うトランザクションを開始する
    ///
    /// トランザクションが生きている間、同名の会員に対する他のトランザクションの
    /// 重複確認・登録は待たされる。
    async fn begin(&self) -> Result<Box<dyn MemberStoreTransaction>>;

    /// 名前が完全一致する会員をすべて返す（該当なしなら空）
    async fn find_by_name(&self, name: &MemberName) -> Result<Vec<Member>>;

    /// 会員を永続化し、新しいIDを採番して返す
    async fn insert(&self, member: NewMember) -> Result<MemberId>;

    /// IDで会員を取得する
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>>;

    /// 全会員を登録日時順に返す
    async fn find_all(&self) -> Result<Vec<Member>>;
}

/// 会員ストアのトランザクションスコープ
///
/// `commit`せずにdropした場合、スコープ内の書き込みはすべて破棄される。
#[async_trait]
pub trait MemberStoreTransaction: Send {
    /// 名前が完全一致する会員をすべて返す
    ///
    /// 以降このトランザクションが終わるまで、同名の登録は他から割り込まれない。
    async fn find_by_name(&mut self, name: &MemberName) -> Result<Vec<Member>>;

    /// 会員を永続化し、新しいIDを採番して返す
    async fn insert(&mut self, member: NewMember) -> Result<MemberId>;

    /// 書き込みを確定し、スコープを解放する
    async fn commit(self: Box<Self>) -> Result<()>;
}
