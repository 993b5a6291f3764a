//! Member repository
//!
//! - update: UPDATE ... RETURNING inside a transaction
//! - delete: detaches the member's sessions and removes the row atomically
//! - name lookup: exact match, lowest id wins on duplicates

use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::DbError;
use crate::models::MemberInput;

/// Member record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub age: i64,
}

impl Member {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            age: row.try_get("age")?,
        })
    }
}

/// Member repository
pub struct MemberRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MemberRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every member in id order.
    pub async fn list(&self) -> Result<Vec<Member>, DbError> {
        let rows = sqlx::query("SELECT id, name, age FROM members ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        let members = rows
            .iter()
            .map(Member::from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(members)
    }

    /// Get a single member by id.
    pub async fn get(&self, id: i64) -> Result<Member, DbError> {
        let row = sqlx::query("SELECT id, name, age FROM members WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(Member::from_row(&row)?)
    }

    /// Insert a member; the id is generated by the store.
    pub async fn create(&self, input: &MemberInput) -> Result<Member, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO members (name, age)
            VALUES (?, ?)
            RETURNING id, name, age
            "#,
        )
        .bind(&input.name)
        .bind(input.age)
        .fetch_one(self.pool)
        .await?;

        let member = Member::from_row(&row)?;
        tracing::info!(member_id = member.id, "member created");
        Ok(member)
    }

    /// Replace name and age of an existing member.
    pub async fn update(&self, id: i64, input: &MemberInput) -> Result<Member, DbError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            UPDATE members SET name = ?, age = ?
            WHERE id = ?
            RETURNING id, name, age
            "#,
        )
        .bind(&input.name)
        .bind(input.age)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(id))?;

        let member = Member::from_row(&row)?;
        tx.commit().await?;

        tracing::info!(member_id = id, "member updated");
        Ok(member)
    }

    /// Delete a member.
    ///
    /// Sessions owned by the member keep their rows but lose the owner
    /// (`member_id` becomes NULL) in the same transaction, so nothing is
    /// left pointing at a removed id.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let detached = sqlx::query("UPDATE workout_sessions SET member_id = NULL WHERE member_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            // Dropping the transaction rolls back the detach
            return Err(not_found(id));
        }

        tx.commit().await?;
        tracing::info!(member_id = id, detached_sessions = detached, "member deleted");
        Ok(())
    }

    /// First member with exactly this name; lowest id wins when several
    /// members share it.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Member>, DbError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, age FROM members
            WHERE name = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.as_ref().map(Member::from_row).transpose()?)
    }
}

fn not_found(id: i64) -> DbError {
    DbError::NotFound {
        resource: "member",
        id: id.to_string(),
    }
}
