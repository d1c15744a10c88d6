use crate::domain::{Member, MemberId, commands::RegisterMember, member};
use crate::ports::MemberStore;
use std::sync::Arc;

use super::errors::{MemberApplicationError, Result};

/// 会員登録サービス
///
/// 会員名の一意性を登録時に保証する。
/// 自身は状態を持たず、会員コレクションはすべてMemberStoreが所有する。
#[derive(Clone)]
pub struct MemberRegistry {
    store: Arc<dyn MemberStore>,
}

impl MemberRegistry {
    pub fn new(store: Arc<dyn MemberStore>) -> Self {
        Self { store }
    }

    /// 会員を登録する
    ///
    /// ビジネスルール：
    /// - 会員名は空でないこと（255文字以下）
    /// - 同名の会員が存在しないこと（大文字小文字を区別する完全一致）
    ///
    /// # 一貫性保証
    ///
    /// 重複確認と登録は同じストアトランザクション内で行う。
    /// 同名の並行登録は直列化され、成功するのは1件だけ。
    /// エラー時はトランザクションがdropされ、何も永続化されない。
    ///
    /// # 戻り値
    /// ストアが採番した会員ID
    pub async fn register(&self, cmd: RegisterMember) -> Result<MemberId> {
        // 1. 会員名の検証
        let candidate = member::new_member(cmd.name, cmd.joined_at)?;

        // 2. トランザクション開始
        let mut tx = self.store.begin().await?;

        // 3. 重複確認
        let existing = tx.find_by_name(&candidate.name).await?;
        if !existing.is_empty() {
            tracing::warn!(name = %candidate.name, "rejected duplicate member registration");
            return Err(MemberApplicationError::DuplicateMember(
                candidate.name.into_inner(),
            ));
        }

        // 4. 登録（IDはストアが採番）
        let name = candidate.name.clone();
        let member_id = tx.insert(candidate).await?;

        // 5. 確定
        tx.commit().await?;

        tracing::info!(%member_id, %name, "member registered");
        Ok(member_id)
    }

    /// IDで会員を取得する
    pub async fn find_one(&self, id: MemberId) -> Result<Member> {
        tracing::debug!(member_id = %id, "looking up member");

        self.store
            .find_by_id(id)
            .await?
            .ok_or(MemberApplicationError::MemberNotFound(id))
    }

    /// 全会員を登録日時順に取得する
    pub async fn find_members(&self) -> Result<Vec<Member>> {
        Ok(self.store.find_all().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MemberName, MemberNameError, NewMember};
    use crate::ports::member_store::{self, MemberStoreError, MemberStoreTransaction};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    /// 重複確認は空を返すが、INSERTで一意制約違反を返すストア
    ///
    /// 事前確認をすり抜けた重複がストアの一意制約で止まる場合を再現する。
    struct RacingStore;

    struct RacingTransaction;

    #[async_trait]
    impl MemberStoreTransaction for RacingTransaction {
        async fn find_by_name(&mut self, _name: &MemberName) -> member_store::Result<Vec<Member>> {
            Ok(vec![])
        }

        async fn insert(&mut self, member: NewMember) -> member_store::Result<MemberId> {
            Err(MemberStoreError::DuplicateName(member.name.into_inner()))
        }

        async fn commit(self: Box<Self>) -> member_store::Result<()> {
            panic!("commit must not be called after a failed insert")
        }
    }

    #[async_trait]
    impl MemberStore for RacingStore {
        async fn begin(&self) -> member_store::Result<Box<dyn MemberStoreTransaction>> {
            Ok(Box::new(RacingTransaction))
        }

        async fn find_by_name(&self, _name: &MemberName) -> member_store::Result<Vec<Member>> {
            Ok(vec![])
        }

        async fn insert(&self, member: NewMember) -> member_store::Result<MemberId> {
            Err(MemberStoreError::DuplicateName(member.name.into_inner()))
        }

        async fn find_by_id(&self, _id: MemberId) -> member_store::Result<Option<Member>> {
            Ok(None)
        }

        async fn find_all(&self) -> member_store::Result<Vec<Member>> {
            Ok(vec![])
        }
    }

    /// begin()の呼び出し回数を数えるストア
    #[derive(Default)]
    struct CountingStore {
        begins: Mutex<usize>,
    }

    #[async_trait]
    impl MemberStore for CountingStore {
        async fn begin(&self) -> member_store::Result<Box<dyn MemberStoreTransaction>> {
            *self.begins.lock().unwrap() += 1;
            Ok(Box::new(RacingTransaction))
        }

        async fn find_by_name(&self, _name: &MemberName) -> member_store::Result<Vec<Member>> {
            Ok(vec![])
        }

        async fn insert(&self, _member: NewMember) -> member_store::Result<MemberId> {
            unreachable!()
        }

        async fn find_by_id(&self, _id: MemberId) -> member_store::Result<Option<Member>> {
            Ok(None)
        }

        async fn find_all(&self) -> member_store::Result<Vec<Member>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_unique_violation_at_insert_maps_to_duplicate_member() {
        let registry = MemberRegistry::new(Arc::new(RacingStore));

        let result = registry.register(RegisterMember::now("alice")).await;

        assert!(matches!(
            result,
            Err(MemberApplicationError::DuplicateMember(ref name)) if name == "alice"
        ));
    }

    #[tokio::test]
    async fn test_invalid_name_is_rejected_before_touching_store() {
        let store = Arc::new(CountingStore::default());
        let registry = MemberRegistry::new(store.clone());

        let result = registry
            .register(RegisterMember {
                name: "  ".to_string(),
                joined_at: Utc::now(),
            })
            .await;

        assert!(matches!(
            result,
            Err(MemberApplicationError::InvalidMemberName(MemberNameError::Empty))
        ));
        assert_eq!(*store.begins.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_one_not_found() {
        let registry = MemberRegistry::new(Arc::new(RacingStore));
        let id = MemberId::new();

        let result = registry.find_one(id).await;

        assert!(matches!(result, Err(MemberApplicationError::MemberNotFound(missing)) if missing == id));
    }
}
