use crate::domain::{AccessScope, EmployeeId, Mood, MoodFeedback, MoodId};
use crate::{Error, Result};
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const SELECT_JOINED: &str = "SELECT m.id, m.employee_id, m.mood, m.feedback, m.date, m.created_at, \
     e.name AS employee_name, e.email AS employee_email \
     FROM mood_feedbacks m \
     JOIN employees e ON m.employee_id = e.id";

fn row_to_mood(row: &PgRow) -> Result<MoodFeedback> {
    let mood: String = row.try_get("mood")?;
    Ok(MoodFeedback {
        id: MoodId::new(row.try_get("id")?),
        employee_id: EmployeeId::new(row.try_get("employee_id")?),
        mood: Mood::parse(&mood)
            .map_err(|_| Error::internal(format!("Unknown stored mood '{mood}'")))?,
        feedback: row.try_get("feedback")?,
        date: row.try_get("date")?,
        created_at: row.try_get("created_at")?,
        employee_name: row.try_get("employee_name")?,
        employee_email: row.try_get("employee_email")?,
    })
}

pub async fn list(
    pool: &PgPool,
    scope: AccessScope,
    limit: i64,
    offset: i64,
) -> Result<Vec<MoodFeedback>> {
    let rows = match scope.employee_id() {
        None => {
            sqlx::query(&format!(
                "{SELECT_JOINED} ORDER BY m.date DESC, m.created_at DESC LIMIT $1 OFFSET $2"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        Some(employee_id) => {
            sqlx::query(&format!(
                "{SELECT_JOINED} WHERE m.employee_id = $1 \
                 ORDER BY m.date DESC, m.created_at DESC LIMIT $2 OFFSET $3"
            ))
            .bind(employee_id.into_inner())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(row_to_mood).collect()
}

pub async fn count(pool: &PgPool, scope: AccessScope) -> Result<i64> {
    let row = match scope.employee_id() {
        None => {
            sqlx::query("SELECT COUNT(*) AS total FROM mood_feedbacks")
                .fetch_one(pool)
                .await?
        }
        Some(employee_id) => {
            sqlx::query("SELECT COUNT(*) AS total FROM mood_feedbacks WHERE employee_id = $1")
                .bind(employee_id.into_inner())
                .fetch_one(pool)
                .await?
        }
    };
    Ok(row.try_get("total")?)
}

pub async fn find(pool: &PgPool, scope: AccessScope, id: MoodId) -> Result<Option<MoodFeedback>> {
    let row = match scope.employee_id() {
        None => {
            sqlx::query(&format!("{SELECT_JOINED} WHERE m.id = $1"))
                .bind(id.into_inner())
                .fetch_optional(pool)
                .await?
        }
        Some(employee_id) => {
            sqlx::query(&format!(
                "{SELECT_JOINED} WHERE m.id = $1 AND m.employee_id = $2"
            ))
            .bind(id.into_inner())
            .bind(employee_id.into_inner())
            .fetch_optional(pool)
            .await?
        }
    };

    row.map(|row| row_to_mood(&row)).transpose()
}

async fn fetch_joined(pool: &PgPool, id: MoodId) -> Result<MoodFeedback> {
    let row = sqlx::query(&format!("{SELECT_JOINED} WHERE m.id = $1"))
        .bind(id.into_inner())
        .fetch_one(pool)
        .await?;
    row_to_mood(&row)
}

pub async fn insert(
    pool: &PgPool,
    employee_id: EmployeeId,
    mood: Mood,
    feedback: Option<&str>,
    date: NaiveDate,
) -> Result<MoodFeedback> {
    let row = sqlx::query(
        "INSERT INTO mood_feedbacks (employee_id, mood, feedback, date) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(employee_id.into_inner())
    .bind(mood.as_str())
    .bind(feedback)
    .bind(date)
    .fetch_one(pool)
    .await?;

    fetch_joined(pool, MoodId::new(row.try_get("id")?)).await
}

pub async fn update(
    pool: &PgPool,
    id: MoodId,
    mood: Mood,
    feedback: Option<&str>,
    date: NaiveDate,
) -> Result<MoodFeedback> {
    sqlx::query("UPDATE mood_feedbacks SET mood = $1, feedback = $2, date = $3 WHERE id = $4")
        .bind(mood.as_str())
        .bind(feedback)
        .bind(date)
        .bind(id.into_inner())
        .execute(pool)
        .await?;

    fetch_joined(pool, id).await
}

pub async fn delete(pool: &PgPool, id: MoodId) -> Result<()> {
    sqlx::query("DELETE FROM mood_feedbacks WHERE id = $1")
        .bind(id.into_inner())
        .execute(pool)
        .await?;
    Ok(())
}

/// Export rows, newest first; soft-deleted rows are excluded
pub async fn export(pool: &PgPool, scope: AccessScope) -> Result<Vec<MoodFeedback>> {
    let rows = match scope.employee_id() {
        None => {
            sqlx::query(&format!(
                "{SELECT_JOINED} WHERE m.deleted_at IS NULL ORDER BY m.date DESC"
            ))
            .fetch_all(pool)
            .await?
        }
        Some(employee_id) => {
            sqlx::query(&format!(
                "{SELECT_JOINED} WHERE m.employee_id = $1 AND m.deleted_at IS NULL \
                 ORDER BY m.date DESC"
            ))
            .bind(employee_id.into_inner())
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(row_to_mood).collect()
}
