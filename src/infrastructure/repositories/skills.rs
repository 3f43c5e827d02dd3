use crate::domain::{AccessScope, EmployeeId, Progress, SkillDevelopment, SkillId};
use crate::Result;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const SELECT_JOINED: &str = "SELECT s.id, s.employee_id, s.skill_name, s.learning_activity, \
     s.progress, s.date, s.created_at, \
     e.name AS employee_name, e.email AS employee_email \
     FROM skill_developments s \
     JOIN employees e ON s.employee_id = e.id";

fn row_to_skill(row: &PgRow) -> Result<SkillDevelopment> {
    let progress: i32 = row.try_get("progress")?;
    Ok(SkillDevelopment {
        id: SkillId::new(row.try_get("id")?),
        employee_id: EmployeeId::new(row.try_get("employee_id")?),
        skill_name: row.try_get("skill_name")?,
        learning_activity: row.try_get("learning_activity")?,
        progress: Progress::clamped(i64::from(progress)).into_inner(),
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
) -> Result<Vec<SkillDevelopment>> {
    let rows = match scope.employee_id() {
        None => {
            sqlx::query(&format!(
                "{SELECT_JOINED} ORDER BY s.date DESC, s.created_at DESC LIMIT $1 OFFSET $2"
            ))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        Some(employee_id) => {
            sqlx::query(&format!(
                "{SELECT_JOINED} WHERE s.employee_id = $1 \
                 ORDER BY s.date DESC, s.created_at DESC LIMIT $2 OFFSET $3"
            ))
            .bind(employee_id.into_inner())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(row_to_skill).collect()
}

pub async fn count(pool: &PgPool, scope: AccessScope) -> Result<i64> {
    let row = match scope.employee_id() {
        None => {
            sqlx::query("SELECT COUNT(*) AS total FROM skill_developments")
                .fetch_one(pool)
                .await?
        }
        Some(employee_id) => {
            sqlx::query("SELECT COUNT(*) AS total FROM skill_developments WHERE employee_id = $1")
                .bind(employee_id.into_inner())
                .fetch_one(pool)
                .await?
        }
    };
    Ok(row.try_get("total")?)
}

pub async fn find(
    pool: &PgPool,
    scope: AccessScope,
    id: SkillId,
) -> Result<Option<SkillDevelopment>> {
    let row = match scope.employee_id() {
        None => {
            sqlx::query(&format!("{SELECT_JOINED} WHERE s.id = $1"))
                .bind(id.into_inner())
                .fetch_optional(pool)
                .await?
        }
        Some(employee_id) => {
            sqlx::query(&format!(
                "{SELECT_JOINED} WHERE s.id = $1 AND s.employee_id = $2"
            ))
            .bind(id.into_inner())
            .bind(employee_id.into_inner())
            .fetch_optional(pool)
            .await?
        }
    };

    row.map(|row| row_to_skill(&row)).transpose()
}

async fn fetch_joined(pool: &PgPool, id: SkillId) -> Result<SkillDevelopment> {
    let row = sqlx::query(&format!("{SELECT_JOINED} WHERE s.id = $1"))
        .bind(id.into_inner())
        .fetch_one(pool)
        .await?;
    row_to_skill(&row)
}

pub async fn insert(
    pool: &PgPool,
    employee_id: EmployeeId,
    skill_name: &str,
    learning_activity: Option<&str>,
    progress: Progress,
    date: NaiveDate,
) -> Result<SkillDevelopment> {
    let row = sqlx::query(
        "INSERT INTO skill_developments (employee_id, skill_name, learning_activity, progress, date) \
         VALUES ($1, $2, $3, $4, $5) RETURNING id",
    )
    .bind(employee_id.into_inner())
    .bind(skill_name)
    .bind(learning_activity)
    .bind(progress.as_i32())
    .bind(date)
    .fetch_one(pool)
    .await?;

    fetch_joined(pool, SkillId::new(row.try_get("id")?)).await
}

pub async fn update(
    pool: &PgPool,
    id: SkillId,
    skill_name: &str,
    learning_activity: Option<&str>,
    progress: Progress,
    date: NaiveDate,
) -> Result<SkillDevelopment> {
    sqlx::query(
        "UPDATE skill_developments \
         SET skill_name = $1, learning_activity = $2, progress = $3, date = $4 \
         WHERE id = $5",
    )
    .bind(skill_name)
    .bind(learning_activity)
    .bind(progress.as_i32())
    .bind(date)
    .bind(id.into_inner())
    .execute(pool)
    .await?;

    fetch_joined(pool, id).await
}

pub async fn delete(pool: &PgPool, id: SkillId) -> Result<()> {
    sqlx::query("DELETE FROM skill_developments WHERE id = $1")
        .bind(id.into_inner())
        .execute(pool)
        .await?;
    Ok(())
}

/// Export rows, newest first; soft-deleted rows are excluded
pub async fn export(pool: &PgPool, scope: AccessScope) -> Result<Vec<SkillDevelopment>> {
    let rows = match scope.employee_id() {
        None => {
            sqlx::query(&format!(
                "{SELECT_JOINED} WHERE s.deleted_at IS NULL ORDER BY s.date DESC"
            ))
            .fetch_all(pool)
            .await?
        }
        Some(employee_id) => {
            sqlx::query(&format!(
                "{SELECT_JOINED} WHERE s.employee_id = $1 AND s.deleted_at IS NULL \
                 ORDER BY s.date DESC"
            ))
            .bind(employee_id.into_inner())
            .fetch_all(pool)
            .await?
        }
    };

    rows.iter().map(row_to_skill).collect()
}
