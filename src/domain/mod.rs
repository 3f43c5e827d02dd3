//! Domain types for the DayFlow backend
//!
//! Validated newtypes and entities shared by the API and persistence
//! layers. Validation limits mirror what the API accepts: these types
//! cannot be constructed with out-of-range values.

pub mod employee;
pub mod identifiers;
pub mod mood;
pub mod skill;
pub mod work_log;

pub use employee::{AccessScope, AuthenticatedUser, EmailAddress, Employee, EmployeeName, Role};
pub use identifiers::{EmployeeId, MoodId, SkillId, WorkLogId};
pub use mood::{FeedbackText, Mood, MoodFeedback};
pub use skill::{LearningActivity, Progress, SkillDevelopment, SkillName};
pub use work_log::{CommentText, TaskDescription, WorkLog, WorkLogStatus};
