//! Diesel row models for pipeline persistence.

use super::schema::{
    evaluation_points, selection_flow_patterns, selection_informations,
    selection_questionnaires, task_groups, tasks,
};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;

/// Query result row for task groups.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_groups)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskGroupRow {
    /// Group identifier.
    pub id: i64,
    /// Candidate.
    pub job_seeker_id: i64,
    /// Posting.
    pub job_information_id: i64,
    /// Selection-flow template.
    pub selection_flow_pattern_id: Option<i64>,
    /// Alliance visibility flag.
    pub is_double_sided: bool,
    /// Self-application flag.
    pub is_self_application: bool,
    /// Joining date.
    pub joining_date: Option<NaiveDate>,
    /// Last RA-side request.
    pub ra_last_requested_at: Option<DateTime<Utc>>,
    /// Last CA-side request.
    pub ca_last_requested_at: Option<DateTime<Utc>>,
    /// Last RA-side view.
    pub ra_last_watched_at: Option<DateTime<Utc>>,
    /// Last CA-side view.
    pub ca_last_watched_at: Option<DateTime<Utc>>,
    /// External employer name.
    pub external_company_name: Option<String>,
    /// External job title.
    pub external_job_title: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest metadata change.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task groups.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_groups)]
pub struct NewTaskGroupRow {
    /// Candidate.
    pub job_seeker_id: i64,
    /// Posting.
    pub job_information_id: i64,
    /// Selection-flow template.
    pub selection_flow_pattern_id: Option<i64>,
    /// Alliance visibility flag.
    pub is_double_sided: bool,
    /// Self-application flag.
    pub is_self_application: bool,
    /// External employer name.
    pub external_company_name: Option<String>,
    /// External job title.
    pub external_job_title: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest metadata change.
    pub updated_at: DateTime<Utc>,
}

/// Metadata changeset for task groups.
///
/// The pairing columns are absent: a group never changes its job seeker or
/// posting.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = task_groups)]
#[diesel(treat_none_as_null = true)]
pub struct TaskGroupChangeset {
    /// Selection-flow template.
    pub selection_flow_pattern_id: Option<i64>,
    /// Alliance visibility flag.
    pub is_double_sided: bool,
    /// Self-application flag.
    pub is_self_application: bool,
    /// Joining date.
    pub joining_date: Option<NaiveDate>,
    /// Last RA-side request.
    pub ra_last_requested_at: Option<DateTime<Utc>>,
    /// Last CA-side request.
    pub ca_last_requested_at: Option<DateTime<Utc>>,
    /// Last RA-side view.
    pub ra_last_watched_at: Option<DateTime<Utc>>,
    /// Last CA-side view.
    pub ca_last_watched_at: Option<DateTime<Utc>>,
    /// External employer name.
    pub external_company_name: Option<String>,
    /// External job title.
    pub external_job_title: Option<String>,
    /// Latest metadata change.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for tasks.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub id: i64,
    /// Owning group.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub task_group_id: i64,
    /// Raw phase category.
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub phase_category: i32,
    /// Raw phase sub-category.
    #[diesel(sql_type = diesel::sql_types::Integer)]
    pub phase_sub_category: i32,
    /// Executing side label.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub staff_type: String,
    /// Executing staff member.
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    pub executed_staff_id: i64,
    /// Deadline day.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Date>)]
    pub deadline_day: Option<NaiveDate>,
    /// Deadline time of day.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Time>)]
    pub deadline_time: Option<NaiveTime>,
    /// Free-form remarks.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub remarks: String,
    /// Guidance text.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub guidance: String,
    /// Condition notes.
    #[diesel(sql_type = diesel::sql_types::Text)]
    pub condition_note: String,
    /// Double-sided check flag.
    #[diesel(sql_type = diesel::sql_types::Bool)]
    pub is_check_double_sided: bool,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
}

/// Insert model for tasks.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Owning group.
    pub task_group_id: i64,
    /// Raw phase category.
    pub phase_category: i32,
    /// Raw phase sub-category.
    pub phase_sub_category: i32,
    /// Executing side label.
    pub staff_type: String,
    /// Executing staff member.
    pub executed_staff_id: i64,
    /// Deadline day.
    pub deadline_day: Option<NaiveDate>,
    /// Deadline time of day.
    pub deadline_time: Option<NaiveTime>,
    /// Free-form remarks.
    pub remarks: String,
    /// Guidance text.
    pub guidance: String,
    /// Condition notes.
    pub condition_note: String,
    /// Double-sided check flag.
    pub is_check_double_sided: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for evaluation points.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = evaluation_points)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EvaluationPointRow {
    /// Evaluation identifier.
    pub id: i64,
    /// Evaluated task.
    pub task_id: i64,
    /// Positive observations.
    pub good_points: String,
    /// Negative observations.
    pub bad_points: String,
    /// Verdict label.
    pub verdict: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for evaluation points.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = evaluation_points)]
pub struct NewEvaluationPointRow {
    /// Evaluated task.
    pub task_id: i64,
    /// Positive observations.
    pub good_points: String,
    /// Negative observations.
    pub bad_points: String,
    /// Verdict label.
    pub verdict: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for questionnaires.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = selection_questionnaires)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct QuestionnaireRow {
    /// Questionnaire identifier.
    pub id: i64,
    /// Triggering task.
    pub task_id: i64,
    /// Job seeker expected to answer.
    pub job_seeker_id: i64,
    /// Link token.
    pub access_token: uuid::Uuid,
    /// Answered flag.
    pub is_answered: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for questionnaires.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = selection_questionnaires)]
pub struct NewQuestionnaireRow {
    /// Triggering task.
    pub task_id: i64,
    /// Job seeker expected to answer.
    pub job_seeker_id: i64,
    /// Link token.
    pub access_token: uuid::Uuid,
    /// Answered flag.
    pub is_answered: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Query result row for selection-flow templates.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = selection_flow_patterns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SelectionFlowPatternRow {
    /// Template identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
}

/// Query result row for template steps.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = selection_informations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SelectionStepRow {
    /// Raw phase category.
    pub phase_category: i32,
    /// Target passing rate in percent.
    pub passing_rate: Option<i16>,
    /// Example of a passing profile.
    pub pass_example: String,
    /// Example of a failing profile.
    pub fail_example: String,
    /// Post-step questionnaire flag.
    pub requires_questionnaire: bool,
}

/// Insert model for template steps.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = selection_informations)]
pub struct NewSelectionStepRow {
    /// Owning template.
    pub selection_flow_pattern_id: i64,
    /// Zero-based position within the template.
    pub position: i32,
    /// Raw phase category.
    pub phase_category: i32,
    /// Target passing rate in percent.
    pub passing_rate: Option<i16>,
    /// Example of a passing profile.
    pub pass_example: String,
    /// Example of a failing profile.
    pub fail_example: String,
    /// Post-step questionnaire flag.
    pub requires_questionnaire: bool,
}
