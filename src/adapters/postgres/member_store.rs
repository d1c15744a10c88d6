use crate::domain::{Member, MemberId, MemberName, NewMember};
use crate::ports::member_store::{
    MemberStore as MemberStoreTrait, MemberStoreError, MemberStoreTransaction, Result,
};
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Row, postgres::PgRow};

/// PostgreSQLの行データをMemberに変換する
///
/// DBに保存された名前も値オブジェクトの検証を通す。
/// 不正な値が混入していた場合はバックエンドエラーとして扱う。
fn map_row_to_member(row: &PgRow) -> Result<Member> {
    let name: String = row.get("name");
    let name = MemberName::new(name).map_err(|e| MemberStoreError::Backend(Box::new(e)))?;

    Ok(Member {
        id: MemberId::from_uuid(row.get("member_id")),
        name,
        joined_at: row.get("joined_at"),
    })
}

/// INSERT時のエラーを変換する
///
/// `members_name_key`の一意制約違反は`DuplicateName`にする。
fn map_insert_error(err: sqlx::Error, name: &MemberName) -> MemberStoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            MemberStoreError::DuplicateName(name.to_string())
        }
        _ => MemberStoreError::from(err),
    }
}

async fn select_by_name(conn: &mut PgConnection, name: &MemberName) -> Result<Vec<Member>> {
    let rows = sqlx::query(
        r#"
        SELECT member_id, name, joined_at
        FROM members
        WHERE name = $1
        ORDER BY joined_at ASC, seq ASC
        "#,
    )
    .bind(name.as_str())
    .fetch_all(conn)
    .await?;

    rows.iter().map(map_row_to_member).collect()
}

async fn insert_member(conn: &mut PgConnection, member: NewMember) -> Result<MemberId> {
    let id: uuid::Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO members (name, joined_at)
        VALUES ($1, $2)
        RETURNING member_id
        "#,
    )
    .bind(member.name.as_str())
    .bind(member.joined_at)
    .fetch_one(conn)
    .await
    .map_err(|e| map_insert_error(e, &member.name))?;

    Ok(MemberId::from_uuid(id))
}

/// MemberStoreのPostgreSQL実装
///
/// 会員IDは`gen_random_uuid()`でDB側が採番する。
/// 登録日時が同じ会員は`seq`（挿入順の連番）で並べる。
/// 名前の一意性は`members_name_key`制約が最終的に保証する。
pub struct MemberStore {
    pool: PgPool,
}

impl MemberStore {
    /// PostgreSQLコネクションプールから新しいMemberStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// `migrations/`のマイグレーションを適用する
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl MemberStoreTrait for MemberStore {
    /// トランザクションを開始する
    ///
    /// 同名の登録の直列化は`find_by_name`で取得するアドバイザリロックで行う。
    async fn begin(&self) -> Result<Box<dyn MemberStoreTransaction>> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(Transaction { tx }))
    }

    async fn find_by_name(&self, name: &MemberName) -> Result<Vec<Member>> {
        let mut conn = self.pool.acquire().await?;
        select_by_name(&mut conn, name).await
    }

    /// 単発のINSERT（自動コミット）
    ///
    /// 重複は一意制約違反として`DuplicateName`で返る。
    async fn insert(&self, member: NewMember) -> Result<MemberId> {
        let mut conn = self.pool.acquire().await?;
        insert_member(&mut conn, member).await
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>> {
        let row = sqlx::query(
            r#"
            SELECT member_id, name, joined_at
            FROM members
            WHERE member_id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_member).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Member>> {
        let rows = sqlx::query(
            r#"
            SELECT member_id, name, joined_at
            FROM members
            ORDER BY joined_at ASC, seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_member).collect()
    }
}

/// PostgreSQLトランザクションによるスコープ
///
/// commitせずにdropされるとsqlxがROLLBACKする。
struct Transaction {
    tx: sqlx::Transaction<'static, Postgres>,
}

#[async_trait]
impl MemberStoreTransaction for Transaction {
    /// 名前をキーにしたアドバイザリロックを取ってから検索する
    ///
    /// `pg_advisory_xact_lock`はトランザクション終了（COMMIT/ROLLBACK）で解放される。
    /// これにより同名の重複確認と登録が並行トランザクション間で直列化される。
    async fn find_by_name(&mut self, name: &MemberName) -> Result<Vec<Member>> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(name.as_str())
            .execute(&mut *self.tx)
            .await?;

        select_by_name(&mut self.tx, name).await
    }

    async fn insert(&mut self, member: NewMember) -> Result<MemberId> {
        insert_member(&mut self.tx, member).await
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }
}
