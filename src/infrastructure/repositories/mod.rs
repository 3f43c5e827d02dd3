//! Repositories: all SQL lives here
//!
//! Every collection query takes an [`AccessScope`](crate::domain::AccessScope):
//! HR and managers query unscoped, employees are pinned to their own rows.
//! Row-level misses surface as `None` so handlers answer 404, never 403.

pub mod analytics;
pub mod employees;
pub mod moods;
pub mod skills;
pub mod work_logs;
