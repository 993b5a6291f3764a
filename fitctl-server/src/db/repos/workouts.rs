//! Workout session repository
//!
//! Sessions reference their member through `member_id`. The foreign key is
//! enforced by the store, so scheduling for an unknown member surfaces as a
//! constraint error from sqlx rather than a NotFound.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{DbError, MemberRepo};
use crate::models::WorkoutInput;

/// Workout session record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkoutSession {
    pub session_id: i64,
    /// NULL once the owning member has been deleted
    pub member_id: Option<i64>,
    pub session_date: NaiveDate,
    pub session_time: String,
    pub activity: String,
}

impl WorkoutSession {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            session_id: row.try_get("session_id")?,
            member_id: row.try_get("member_id")?,
            session_date: row.try_get("session_date")?,
            session_time: row.try_get("session_time")?,
            activity: row.try_get("activity")?,
        })
    }
}

/// Outcome of looking up workouts by member name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedWorkouts {
    /// No member has this name
    UnknownMember,
    /// The first matching member and their sessions (possibly none)
    Found(Vec<WorkoutSession>),
}

/// Workout session repository
pub struct WorkoutRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> WorkoutRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every session in id order.
    pub async fn list(&self) -> Result<Vec<WorkoutSession>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT session_id, member_id, session_date, session_time, activity
            FROM workout_sessions
            ORDER BY session_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        collect(&rows)
    }

    /// Get a single session by id.
    pub async fn get(&self, session_id: i64) -> Result<WorkoutSession, DbError> {
        let row = sqlx::query(
            r#"
            SELECT session_id, member_id, session_date, session_time, activity
            FROM workout_sessions
            WHERE session_id = ?
            "#,
        )
        .bind(session_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| not_found(session_id))?;

        Ok(WorkoutSession::from_row(&row)?)
    }

    /// Schedule a session. Fails with a constraint error if `member_id`
    /// does not reference an existing member.
    pub async fn create(&self, input: &WorkoutInput) -> Result<WorkoutSession, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO workout_sessions (member_id, session_date, session_time, activity)
            VALUES (?, ?, ?, ?)
            RETURNING session_id, member_id, session_date, session_time, activity
            "#,
        )
        .bind(input.member_id)
        .bind(input.session_date)
        .bind(&input.session_time)
        .bind(&input.activity)
        .fetch_one(self.pool)
        .await?;

        let session = WorkoutSession::from_row(&row)?;
        tracing::info!(
            session_id = session.session_id,
            member_id = input.member_id,
            "workout scheduled"
        );
        Ok(session)
    }

    /// Replace all four business fields of an existing session.
    pub async fn update(
        &self,
        session_id: i64,
        input: &WorkoutInput,
    ) -> Result<WorkoutSession, DbError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            UPDATE workout_sessions
            SET member_id = ?, session_date = ?, session_time = ?, activity = ?
            WHERE session_id = ?
            RETURNING session_id, member_id, session_date, session_time, activity
            "#,
        )
        .bind(input.member_id)
        .bind(input.session_date)
        .bind(&input.session_time)
        .bind(&input.activity)
        .bind(session_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| not_found(session_id))?;

        let session = WorkoutSession::from_row(&row)?;
        tx.commit().await?;

        tracing::info!(session_id, "workout session updated");
        Ok(session)
    }

    /// Sessions owned by one member.
    pub async fn list_for_member(&self, member_id: i64) -> Result<Vec<WorkoutSession>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT session_id, member_id, session_date, session_time, activity
            FROM workout_sessions
            WHERE member_id = ?
            ORDER BY session_id
            "#,
        )
        .bind(member_id)
        .fetch_all(self.pool)
        .await?;

        collect(&rows)
    }

    /// Resolve a member by exact name (lowest id on duplicates) and list
    /// their sessions.
    pub async fn find_by_member_name(&self, name: &str) -> Result<NamedWorkouts, DbError> {
        let Some(member) = MemberRepo::new(self.pool).find_by_name(name).await? else {
            tracing::debug!(name, "no member with this name");
            return Ok(NamedWorkouts::UnknownMember);
        };

        let sessions = self.list_for_member(member.id).await?;
        tracing::debug!(member_id = member.id, count = sessions.len(), "workouts by name");
        Ok(NamedWorkouts::Found(sessions))
    }
}

fn collect(rows: &[SqliteRow]) -> Result<Vec<WorkoutSession>, DbError> {
    let sessions = rows
        .iter()
        .map(WorkoutSession::from_row)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(sessions)
}

fn not_found(session_id: i64) -> DbError {
    DbError::NotFound {
        resource: "workout session",
        id: session_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_memory_pool, migrations};
    use crate::models::MemberInput;

    async fn setup() -> SqlitePool {
        let pool = create_memory_pool().await.expect("pool");
        migrations::run(&pool).await.expect("migrations");
        pool
    }

    async fn member(pool: &SqlitePool, name: &str) -> i64 {
        MemberRepo::new(pool)
            .create(&MemberInput {
                name: name.into(),
                age: 33,
            })
            .await
            .unwrap()
            .id
    }

    fn session(member_id: i64, day: u32, activity: &str) -> WorkoutInput {
        WorkoutInput {
            member_id,
            session_date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            session_time: "07:00".into(),
            activity: activity.into(),
        }
    }

    #[tokio::test]
    async fn name_lookup_returns_exactly_members_sessions() {
        let pool = setup().await;
        let alice = member(&pool, "Alice").await;
        let bob = member(&pool, "Bob").await;
        let repo = WorkoutRepo::new(&pool);

        let a1 = repo.create(&session(alice, 1, "Yoga")).await.unwrap();
        repo.create(&session(bob, 2, "Boxing")).await.unwrap();
        let a2 = repo.create(&session(alice, 3, "Swim")).await.unwrap();

        let found = repo.find_by_member_name("Alice").await.unwrap();
        assert_eq!(found, NamedWorkouts::Found(vec![a1, a2]));
    }

    #[tokio::test]
    async fn name_lookup_distinguishes_unknown_member_from_no_sessions() {
        let pool = setup().await;
        member(&pool, "Idle").await;
        let repo = WorkoutRepo::new(&pool);

        assert_eq!(
            repo.find_by_member_name("Nobody").await.unwrap(),
            NamedWorkouts::UnknownMember
        );
        assert_eq!(
            repo.find_by_member_name("Idle").await.unwrap(),
            NamedWorkouts::Found(vec![])
        );
    }

    #[tokio::test]
    async fn update_every_field_without_duplicates() {
        let pool = setup().await;
        let alice = member(&pool, "Alice").await;
        let bob = member(&pool, "Bob").await;
        let repo = WorkoutRepo::new(&pool);

        let created = repo.create(&session(alice, 1, "Yoga")).await.unwrap();
        let changed = WorkoutInput {
            member_id: bob,
            session_date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            session_time: "evening".into(),
            activity: "Pilates".into(),
        };
        repo.update(created.session_id, &changed).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].session_id, created.session_id);
        assert_eq!(all[0].member_id, Some(bob));
        assert_eq!(all[0].session_date, changed.session_date);
        assert_eq!(all[0].session_time, "evening");
        assert_eq!(all[0].activity, "Pilates");
    }

    #[tokio::test]
    async fn update_missing_session_is_not_found() {
        let pool = setup().await;
        let alice = member(&pool, "Alice").await;

        let err = WorkoutRepo::new(&pool)
            .update(42, &session(alice, 1, "Yoga"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "workout session", .. }));
    }

    #[tokio::test]
    async fn unknown_member_rejected_by_constraint() {
        let pool = setup().await;
        let repo = WorkoutRepo::new(&pool);

        let err = repo.create(&session(777, 1, "Yoga")).await.unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleting_member_detaches_sessions() {
        let pool = setup().await;
        let alice = member(&pool, "Alice").await;
        let repo = WorkoutRepo::new(&pool);
        let created = repo.create(&session(alice, 1, "Yoga")).await.unwrap();

        MemberRepo::new(&pool).delete(alice).await.unwrap();

        let orphan = repo.get(created.session_id).await.unwrap();
        assert_eq!(orphan.member_id, None);
        assert!(repo.list_for_member(alice).await.unwrap().is_empty());
    }
}
