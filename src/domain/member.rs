use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{MemberId, MemberName, MemberNameError};

/// 未永続化の会員
///
/// IDはまだ採番されていない。`MemberStore::insert`に渡すと
/// ストアがIDを割り当てて`Member`になる。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMember {
    pub name: MemberName,
    pub joined_at: DateTime<Utc>,
}

/// 会員集約
///
/// 不変条件：永続化済みの会員同士で`name`が重複しない
/// （登録時にMemberRegistryが検査し、ストアの一意制約が裏付ける）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: MemberName,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// 採番済みIDと未永続化の会員から会員を組み立てる
    pub fn from_new(id: MemberId, member: NewMember) -> Self {
        Self {
            id,
            name: member.name,
            joined_at: member.joined_at,
        }
    }
}

/// 純粋関数：登録候補の会員を作成する
///
/// 会員名を検証し、IDなしの会員を返す。副作用なし。
pub fn new_member(
    name: impl Into<String>,
    joined_at: DateTime<Utc>,
) -> Result<NewMember, MemberNameError> {
    Ok(NewMember {
        name: MemberName::new(name)?,
        joined_at,
    })
}
