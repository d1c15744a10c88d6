use crate::domain::{Member, MemberId, MemberName, NewMember};
use crate::ports::member_store::{
    MemberStore as MemberStoreTrait, MemberStoreError, MemberStoreTransaction, Result,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{OwnedRwLockWriteGuard, RwLock};

/// In-memory implementation of MemberStore
///
/// Members are kept in insertion order behind a `tokio::sync::RwLock`.
/// Lookups share the read lock; a transaction holds the write lock until it
/// commits or is dropped, so check-then-insert sequences never interleave.
#[derive(Default)]
pub struct MemberStore {
    members: Arc<RwLock<Vec<Member>>>,
}

impl MemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored members
    pub async fn len(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.members.read().await.is_empty()
    }
}

fn matching(members: &[Member], name: &MemberName) -> Vec<Member> {
    members.iter().filter(|m| &m.name == name).cloned().collect()
}

/// Insert with the uniqueness backstop applied, assigning a fresh id
fn insert_unique(members: &mut Vec<Member>, member: NewMember) -> Result<MemberId> {
    if members.iter().any(|m| m.name == member.name) {
        return Err(MemberStoreError::DuplicateName(member.name.into_inner()));
    }

    let id = MemberId::new();
    members.push(Member::from_new(id, member));
    Ok(id)
}

#[async_trait]
impl MemberStoreTrait for MemberStore {
    async fn begin(&self) -> Result<Box<dyn MemberStoreTransaction>> {
        let guard = self.members.clone().write_owned().await;
        Ok(Box::new(Transaction {
            guard,
            pending: Vec::new(),
        }))
    }

    async fn find_by_name(&self, name: &MemberName) -> Result<Vec<Member>> {
        let members = self.members.read().await;
        Ok(matching(&members, name))
    }

    async fn insert(&self, member: NewMember) -> Result<MemberId> {
        let mut members = self.members.write().await;
        insert_unique(&mut members, member)
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>> {
        let members = self.members.read().await;
        Ok(members.iter().find(|m| m.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Member>> {
        let mut members = self.members.read().await.clone();
        // sort_by_key is stable, so equal timestamps keep insertion order
        members.sort_by_key(|m| m.joined_at);
        Ok(members)
    }
}

/// Transaction scope over the in-memory store
///
/// Writes are staged in `pending` and only applied on commit.
struct Transaction {
    guard: OwnedRwLockWriteGuard<Vec<Member>>,
    pending: Vec<Member>,
}

#[async_trait]
impl MemberStoreTransaction for Transaction {
    async fn find_by_name(&mut self, name: &MemberName) -> Result<Vec<Member>> {
        let mut found = matching(&self.guard, name);
        found.extend(matching(&self.pending, name));
        Ok(found)
    }

    async fn insert(&mut self, member: NewMember) -> Result<MemberId> {
        if self.guard.iter().any(|m| m.name == member.name) {
            return Err(MemberStoreError::DuplicateName(member.name.into_inner()));
        }
        insert_unique(&mut self.pending, member)
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let Transaction { mut guard, pending } = *self;
        guard.extend(pending);
        Ok(())
    }
}
