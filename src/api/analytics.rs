//! Dashboard analytics and CSV export

use crate::api::AppState;
use crate::domain::AuthenticatedUser;
use crate::infrastructure::repositories::analytics;
use crate::infrastructure::repositories::{moods, skills, work_logs};
use crate::{Error, Result};
use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};

const DEFAULT_WINDOW_DAYS: i32 = 30;
const MAX_WINDOW_DAYS: i32 = 365;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/export/{type}", get(export))
}

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub days: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub work_logs: analytics::WorkLogStats,
    pub moods: Vec<analytics::MoodCount>,
    pub skills: Vec<analytics::SkillProgress>,
    pub activity: Vec<analytics::DailyActivity>,
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardResponse>> {
    let days = params
        .days
        .unwrap_or(DEFAULT_WINDOW_DAYS)
        .clamp(1, MAX_WINDOW_DAYS);
    let scope = user.scope();

    let work_logs = analytics::work_log_stats(&state.pool, scope, days).await?;
    let moods = analytics::mood_counts(&state.pool, scope, days).await?;
    let skills = analytics::top_skills(&state.pool, scope, days).await?;
    let activity = analytics::daily_activity(&state.pool, scope, days).await?;

    Ok(Json(DashboardResponse {
        work_logs,
        moods,
        skills,
        activity,
    }))
}

async fn export(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(export_type): Path<String>,
) -> Result<Response> {
    let scope = user.scope();

    let (filename, csv) = match export_type.as_str() {
        "work-logs" => {
            let rows = work_logs::export(&state.pool, scope).await?;
            ("work_logs_export.csv", work_logs_csv(&rows))
        }
        "skills" => {
            let rows = skills::export(&state.pool, scope).await?;
            ("skills_export.csv", skills_csv(&rows))
        }
        "moods" => {
            let rows = moods::export(&state.pool, scope).await?;
            ("moods_export.csv", moods_csv(&rows))
        }
        _ => return Err(Error::validation("type", "Invalid export type")),
    };

    let csv = csv.ok_or_else(|| Error::not_found("Export data"))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Quote a CSV field, doubling embedded quotes
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_document(header: &str, rows: Vec<String>) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(header.to_string());
    lines.extend(rows);
    Some(lines.join("\n"))
}

fn work_logs_csv(rows: &[crate::domain::WorkLog]) -> Option<String> {
    csv_document(
        "id,employee_id,employee_name,date,task_description,status,comments,created_at",
        rows.iter()
            .map(|log| {
                format!(
                    "{},{},{},{},{},{},{},{}",
                    log.id,
                    log.employee_id,
                    csv_field(&log.employee_name),
                    log.date,
                    csv_field(&log.task_description),
                    log.status.as_str(),
                    csv_field(log.comments.as_deref().unwrap_or("")),
                    log.created_at.to_rfc3339(),
                )
            })
            .collect(),
    )
}

fn skills_csv(rows: &[crate::domain::SkillDevelopment]) -> Option<String> {
    csv_document(
        "id,employee_id,employee_name,date,skill_name,learning_activity,progress,created_at",
        rows.iter()
            .map(|skill| {
                format!(
                    "{},{},{},{},{},{},{},{}",
                    skill.id,
                    skill.employee_id,
                    csv_field(&skill.employee_name),
                    skill.date,
                    csv_field(&skill.skill_name),
                    csv_field(skill.learning_activity.as_deref().unwrap_or("")),
                    skill.progress,
                    skill.created_at.to_rfc3339(),
                )
            })
            .collect(),
    )
}

fn moods_csv(rows: &[crate::domain::MoodFeedback]) -> Option<String> {
    csv_document(
        "id,employee_id,employee_name,date,mood,feedback,created_at",
        rows.iter()
            .map(|entry| {
                format!(
                    "{},{},{},{},{},{},{}",
                    entry.id,
                    entry.employee_id,
                    csv_field(&entry.employee_name),
                    entry.date,
                    entry.mood.as_str(),
                    csv_field(entry.feedback.as_deref().unwrap_or("")),
                    entry.created_at.to_rfc3339(),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeId, Mood, MoodFeedback, MoodId};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn test_csv_field_escaping() {
        assert_eq!(csv_field("plain"), "\"plain\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("with,comma"), "\"with,comma\"");
    }

    #[test]
    fn test_empty_export_yields_none() {
        assert!(moods_csv(&[]).is_none());
    }

    #[test]
    fn test_moods_csv_layout() {
        let entry = MoodFeedback {
            id: MoodId::new(1),
            employee_id: EmployeeId::new(2),
            mood: Mood::Happy,
            feedback: Some("All good".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            employee_name: "Casey".to_string(),
            employee_email: "casey@example.com".to_string(),
        };
        let csv = moods_csv(&[entry]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,employee_id,employee_name,date,mood,feedback,created_at"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("1,2,\"Casey\",2025-06-01,happy,\"All good\","));
    }
}
