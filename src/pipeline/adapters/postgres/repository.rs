//! `PostgreSQL` repository implementation for the pipeline task log.

use super::{
    blocking_helpers::{PipelinePgPool, run_blocking},
    models::{
        EvaluationPointRow, NewEvaluationPointRow, NewQuestionnaireRow, NewSelectionStepRow,
        NewTaskGroupRow, NewTaskRow, QuestionnaireRow, SelectionFlowPatternRow, SelectionStepRow,
        TaskGroupChangeset, TaskGroupRow, TaskRow,
    },
    schema::{
        evaluation_points, job_informations, job_seekers, selection_flow_patterns,
        selection_informations, selection_questionnaires, task_groups, tasks,
    },
};
use crate::pipeline::{
    domain::{
        AgentId, AppendedTask, Deadline, EvaluationInput, EvaluationPoint, EvaluationPointId,
        EvaluationVerdict, ExternalPosting, JobInformationId, JobSeekerId,
        NewSelectionFlowPattern, NewTaskGroup, Ownership, PersistedTaskData,
        PersistedTaskGroupData, Phase, PhaseCategory, PipelineEntry, SelectionFlowPattern,
        SelectionFlowPatternId, SelectionQuestionnaire, SelectionQuestionnaireId, SelectionStep,
        SideActivity, StaffId, StaffType, Task, TaskDetails, TaskDraft, TaskGroup,
        TaskGroupHistory, TaskGroupId, TaskId, TaskSatellites,
    },
    ports::{
        EntryScope, OwnedHistory, PipelineRepository, PipelineRepositoryError,
        PipelineRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Array, BigInt, Bool, Date, Nullable, Text, Time};
use std::collections::HashMap;
use uuid::Uuid;

/// `PostgreSQL`-backed pipeline repository.
///
/// Group creation, task appends with their satellites, and template storage
/// each run in a single transaction.
#[derive(Debug, Clone)]
pub struct PostgresPipelineRepository {
    pool: PipelinePgPool,
}

impl PostgresPipelineRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PipelinePgPool) -> Self {
        Self { pool }
    }
}

impl From<DieselError> for PipelineRepositoryError {
    fn from(err: DieselError) -> Self {
        classify("transaction")(err)
    }
}

/// Maps integrity violations to constraint errors and everything else to
/// persistence errors.
pub(crate) fn classify(operation: &'static str) -> impl Fn(DieselError) -> PipelineRepositoryError {
    move |err| match err {
        DieselError::DatabaseError(
            kind @ (DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::NotNullViolation
            | DatabaseErrorKind::CheckViolation),
            info,
        ) => PipelineRepositoryError::constraint(operation, format!("{kind:?}: {}", info.message())),
        other => PipelineRepositoryError::persistence(operation, other),
    }
}

#[async_trait]
impl PipelineRepository for PostgresPipelineRepository {
    async fn create_group(
        &self,
        group: NewTaskGroup,
        first_task: TaskDraft,
        satellites: TaskSatellites,
    ) -> PipelineRepositoryResult<TaskGroupHistory> {
        const OP: &str = "create_group";
        let new_group = to_new_group_row(group);
        run_blocking(&self.pool, OP, move |connection| {
            connection.transaction::<_, PipelineRepositoryError, _>(|tx| {
                let group_row = diesel::insert_into(task_groups::table)
                    .values(&new_group)
                    .returning(TaskGroupRow::as_returning())
                    .get_result::<TaskGroupRow>(tx)
                    .map_err(classify(OP))?;
                let task = insert_task(tx, OP, group_row.id, &first_task)?;
                insert_satellites(tx, OP, &task, group_row.job_seeker_id, satellites)?;
                TaskGroupHistory::new(row_to_group(group_row), vec![task])
                    .map_err(|err| PipelineRepositoryError::persistence(OP, err))
            })
        })
        .await
    }

    async fn append_task(
        &self,
        task_group_id: TaskGroupId,
        draft: TaskDraft,
        satellites: TaskSatellites,
    ) -> PipelineRepositoryResult<AppendedTask> {
        const OP: &str = "append_task";
        run_blocking(&self.pool, OP, move |connection| {
            connection.transaction::<_, PipelineRepositoryError, _>(|tx| {
                let job_seeker_id = task_groups::table
                    .find(task_group_id.value())
                    .select(task_groups::job_seeker_id)
                    .first::<i64>(tx)
                    .optional()
                    .map_err(classify(OP))?
                    .ok_or(PipelineRepositoryError::not_found(
                        OP,
                        "task_group",
                        task_group_id.value(),
                    ))?;

                let task = insert_task(tx, OP, task_group_id.value(), &draft)?;
                let (evaluation_point, questionnaire) =
                    insert_satellites(tx, OP, &task, job_seeker_id, satellites)?;
                Ok(AppendedTask {
                    task,
                    evaluation_point,
                    questionnaire,
                })
            })
        })
        .await
    }

    async fn update_latest_task(
        &self,
        task_id: TaskId,
        details: TaskDetails,
    ) -> PipelineRepositoryResult<Task> {
        const OP: &str = "update_latest_task";
        run_blocking(&self.pool, OP, move |connection| {
            let updated = diesel::sql_query(concat!(
                "UPDATE tasks SET deadline_day = $2, deadline_time = $3, remarks = $4, ",
                "guidance = $5, condition_note = $6, is_check_double_sided = $7 ",
                "WHERE id = $1 AND id = (",
                "SELECT MAX(latest.id) FROM tasks AS latest ",
                "WHERE latest.task_group_id = tasks.task_group_id) ",
                "RETURNING id, task_group_id, phase_category, phase_sub_category, staff_type, ",
                "executed_staff_id, deadline_day, deadline_time, remarks, guidance, ",
                "condition_note, is_check_double_sided, created_at",
            ))
            .bind::<BigInt, _>(task_id.value())
            .bind::<Nullable<Date>, _>(details.deadline.day)
            .bind::<Nullable<Time>, _>(details.deadline.time)
            .bind::<Text, _>(&details.remarks)
            .bind::<Text, _>(&details.guidance)
            .bind::<Text, _>(&details.condition_note)
            .bind::<Bool, _>(details.is_check_double_sided)
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(classify(OP))?;

            if let Some(row) = updated {
                return row_to_task(OP, row);
            }
            let exists = tasks::table
                .find(task_id.value())
                .select(tasks::id)
                .first::<i64>(connection)
                .optional()
                .map_err(classify(OP))?;
            Err(match exists {
                Some(_) => PipelineRepositoryError::constraint(
                    OP,
                    format!("task {task_id} is not the latest task of its group"),
                ),
                None => PipelineRepositoryError::not_found(OP, "task", task_id.value()),
            })
        })
        .await
    }

    async fn update_group(&self, group: &TaskGroup) -> PipelineRepositoryResult<()> {
        const OP: &str = "update_group";
        let id = group.id().value();
        let job_seeker_id = group.job_seeker_id().value();
        let job_information_id = group.job_information_id().value();
        let changeset = to_group_changeset(group);
        run_blocking(&self.pool, OP, move |connection| {
            let updated = diesel::update(
                task_groups::table
                    .find(id)
                    .filter(task_groups::job_seeker_id.eq(job_seeker_id))
                    .filter(task_groups::job_information_id.eq(job_information_id)),
            )
            .set(&changeset)
            .execute(connection)
            .map_err(classify(OP))?;
            if updated > 0 {
                return Ok(());
            }
            let exists = task_groups::table
                .find(id)
                .select(task_groups::id)
                .first::<i64>(connection)
                .optional()
                .map_err(classify(OP))?;
            Err(match exists {
                Some(_) => PipelineRepositoryError::constraint(OP, "task group pairing is immutable"),
                None => PipelineRepositoryError::not_found(OP, "task_group", id),
            })
        })
        .await
    }

    async fn find_group(&self, id: TaskGroupId) -> PipelineRepositoryResult<Option<TaskGroup>> {
        const OP: &str = "find_group";
        run_blocking(&self.pool, OP, move |connection| {
            let row = task_groups::table
                .find(id.value())
                .select(TaskGroupRow::as_select())
                .first::<TaskGroupRow>(connection)
                .optional()
                .map_err(classify(OP))?;
            Ok(row.map(row_to_group))
        })
        .await
    }

    async fn find_group_by_pair(
        &self,
        job_seeker_id: JobSeekerId,
        job_information_id: JobInformationId,
    ) -> PipelineRepositoryResult<Option<TaskGroup>> {
        const OP: &str = "find_group_by_pair";
        run_blocking(&self.pool, OP, move |connection| {
            let row = task_groups::table
                .filter(task_groups::job_seeker_id.eq(job_seeker_id.value()))
                .filter(task_groups::job_information_id.eq(job_information_id.value()))
                .select(TaskGroupRow::as_select())
                .first::<TaskGroupRow>(connection)
                .optional()
                .map_err(classify(OP))?;
            Ok(row.map(row_to_group))
        })
        .await
    }

    async fn find_groups_by_ids(
        &self,
        ids: &[TaskGroupId],
    ) -> PipelineRepositoryResult<Vec<TaskGroup>> {
        const OP: &str = "find_groups_by_ids";
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.value()).collect();
        run_blocking(&self.pool, OP, move |connection| {
            let rows = task_groups::table
                .filter(task_groups::id.eq_any(raw_ids))
                .order(task_groups::id.asc())
                .select(TaskGroupRow::as_select())
                .load::<TaskGroupRow>(connection)
                .map_err(classify(OP))?;
            Ok(rows.into_iter().map(row_to_group).collect())
        })
        .await
    }

    async fn find_tasks_by_ids(&self, ids: &[TaskId]) -> PipelineRepositoryResult<Vec<Task>> {
        const OP: &str = "find_tasks_by_ids";
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw_ids: Vec<i64> = ids.iter().map(|id| id.value()).collect();
        run_blocking(&self.pool, OP, move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq_any(raw_ids))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(classify(OP))?;
            rows.into_iter().map(|row| row_to_task(OP, row)).collect()
        })
        .await
    }

    async fn history(
        &self,
        id: TaskGroupId,
    ) -> PipelineRepositoryResult<Option<TaskGroupHistory>> {
        const OP: &str = "history";
        run_blocking(&self.pool, OP, move |connection| {
            let Some(group_row) = task_groups::table
                .find(id.value())
                .select(TaskGroupRow::as_select())
                .first::<TaskGroupRow>(connection)
                .optional()
                .map_err(classify(OP))?
            else {
                return Ok(None);
            };
            let rows = tasks::table
                .filter(tasks::task_group_id.eq(id.value()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(classify(OP))?;
            let log = rows
                .into_iter()
                .map(|row| row_to_task(OP, row))
                .collect::<PipelineRepositoryResult<Vec<_>>>()?;
            TaskGroupHistory::new(row_to_group(group_row), log)
                .map(Some)
                .map_err(|err| PipelineRepositoryError::persistence(OP, err))
        })
        .await
    }

    async fn latest_entries(
        &self,
        scope: EntryScope,
    ) -> PipelineRepositoryResult<Vec<PipelineEntry>> {
        const OP: &str = "latest_entries";
        run_blocking(&self.pool, OP, move |connection| {
            let groups = load_scoped_groups(connection, OP, scope)?;
            if groups.is_empty() {
                return Ok(Vec::new());
            }
            let group_ids: Vec<i64> = groups.iter().map(|(row, _)| row.id).collect();
            let mut latest: HashMap<i64, Task> = diesel::sql_query(concat!(
                "SELECT DISTINCT ON (task_group_id) id, task_group_id, phase_category, ",
                "phase_sub_category, staff_type, executed_staff_id, deadline_day, ",
                "deadline_time, remarks, guidance, condition_note, is_check_double_sided, ",
                "created_at FROM tasks WHERE task_group_id = ANY($1) ",
                "ORDER BY task_group_id, id DESC",
            ))
            .bind::<Array<BigInt>, _>(group_ids)
            .load::<TaskRow>(connection)
            .map_err(classify(OP))?
            .into_iter()
            .map(|row| row_to_task(OP, row).map(|task| (group_key(&task), task)))
            .collect::<PipelineRepositoryResult<_>>()?;

            Ok(groups
                .into_iter()
                .filter_map(|(group_row, ownership)| {
                    let task = latest.remove(&group_row.id)?;
                    Some(PipelineEntry {
                        group: row_to_group(group_row),
                        latest: task,
                        ownership,
                    })
                })
                .collect())
        })
        .await
    }

    async fn histories(&self, scope: EntryScope) -> PipelineRepositoryResult<Vec<OwnedHistory>> {
        const OP: &str = "histories";
        run_blocking(&self.pool, OP, move |connection| {
            let groups = load_scoped_groups(connection, OP, scope)?;
            if groups.is_empty() {
                return Ok(Vec::new());
            }
            let group_ids: Vec<i64> = groups.iter().map(|(row, _)| row.id).collect();
            let rows = tasks::table
                .filter(tasks::task_group_id.eq_any(group_ids))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(classify(OP))?;
            let mut logs: HashMap<i64, Vec<Task>> = HashMap::new();
            for row in rows {
                let task = row_to_task(OP, row)?;
                logs.entry(group_key(&task)).or_default().push(task);
            }

            groups
                .into_iter()
                .filter_map(|(group_row, ownership)| {
                    let log = logs.remove(&group_row.id)?;
                    Some(
                        TaskGroupHistory::new(row_to_group(group_row), log)
                            .map(|history| OwnedHistory { history, ownership })
                            .map_err(|err| PipelineRepositoryError::persistence(OP, err)),
                    )
                })
                .collect()
        })
        .await
    }

    async fn find_evaluation_point(
        &self,
        task_id: TaskId,
    ) -> PipelineRepositoryResult<Option<EvaluationPoint>> {
        const OP: &str = "find_evaluation_point";
        run_blocking(&self.pool, OP, move |connection| {
            evaluation_points::table
                .filter(evaluation_points::task_id.eq(task_id.value()))
                .select(EvaluationPointRow::as_select())
                .first::<EvaluationPointRow>(connection)
                .optional()
                .map_err(classify(OP))?
                .map(|row| row_to_evaluation_point(OP, row))
                .transpose()
        })
        .await
    }

    async fn find_questionnaire(
        &self,
        task_id: TaskId,
    ) -> PipelineRepositoryResult<Option<SelectionQuestionnaire>> {
        const OP: &str = "find_questionnaire";
        run_blocking(&self.pool, OP, move |connection| {
            let row = selection_questionnaires::table
                .filter(selection_questionnaires::task_id.eq(task_id.value()))
                .select(QuestionnaireRow::as_select())
                .first::<QuestionnaireRow>(connection)
                .optional()
                .map_err(classify(OP))?;
            Ok(row.map(row_to_questionnaire))
        })
        .await
    }

    async fn store_selection_flow(
        &self,
        pattern: NewSelectionFlowPattern,
    ) -> PipelineRepositoryResult<SelectionFlowPattern> {
        const OP: &str = "store_selection_flow";
        run_blocking(&self.pool, OP, move |connection| {
            connection.transaction::<_, PipelineRepositoryError, _>(|tx| {
                let pattern_id = diesel::insert_into(selection_flow_patterns::table)
                    .values(selection_flow_patterns::name.eq(&pattern.name))
                    .returning(selection_flow_patterns::id)
                    .get_result::<i64>(tx)
                    .map_err(classify(OP))?;
                let step_rows = pattern
                    .steps
                    .iter()
                    .enumerate()
                    .map(|(position, step)| to_step_row(pattern_id, position, step))
                    .collect::<PipelineRepositoryResult<Vec<_>>>()?;
                if !step_rows.is_empty() {
                    diesel::insert_into(selection_informations::table)
                        .values(&step_rows)
                        .execute(tx)
                        .map_err(classify(OP))?;
                }
                Ok(SelectionFlowPattern {
                    id: SelectionFlowPatternId::new(pattern_id),
                    name: pattern.name,
                    steps: pattern.steps,
                })
            })
        })
        .await
    }

    async fn find_selection_flow(
        &self,
        id: SelectionFlowPatternId,
    ) -> PipelineRepositoryResult<Option<SelectionFlowPattern>> {
        const OP: &str = "find_selection_flow";
        run_blocking(&self.pool, OP, move |connection| {
            let Some(pattern_row) = selection_flow_patterns::table
                .find(id.value())
                .select(SelectionFlowPatternRow::as_select())
                .first::<SelectionFlowPatternRow>(connection)
                .optional()
                .map_err(classify(OP))?
            else {
                return Ok(None);
            };
            let steps = selection_informations::table
                .filter(selection_informations::selection_flow_pattern_id.eq(pattern_row.id))
                .order(selection_informations::position.asc())
                .select(SelectionStepRow::as_select())
                .load::<SelectionStepRow>(connection)
                .map_err(classify(OP))?
                .into_iter()
                .map(|row| row_to_step(OP, row))
                .collect::<PipelineRepositoryResult<Vec<_>>>()?;
            Ok(Some(SelectionFlowPattern {
                id: SelectionFlowPatternId::new(pattern_row.id),
                name: pattern_row.name,
                steps,
            }))
        })
        .await
    }
}

type OwnershipColumns = (i64, Option<i64>, i64, Option<i64>);

fn load_scoped_groups(
    connection: &mut PgConnection,
    operation: &'static str,
    scope: EntryScope,
) -> PipelineRepositoryResult<Vec<(TaskGroupRow, Ownership)>> {
    let base = task_groups::table
        .inner_join(job_seekers::table)
        .inner_join(job_informations::table)
        .select((
            TaskGroupRow::as_select(),
            (
                job_seekers::agent_id,
                job_seekers::agent_staff_id,
                job_informations::agent_id,
                job_informations::agent_staff_id,
            ),
        ))
        .order(task_groups::id.asc())
        .into_boxed();
    let query = match scope {
        EntryScope::All => base,
        EntryScope::JobSeeker(id) => base.filter(task_groups::job_seeker_id.eq(id.value())),
        EntryScope::Staff(id) => base.filter(
            job_seekers::agent_staff_id
                .eq(id.value())
                .or(job_informations::agent_staff_id.eq(id.value())),
        ),
        EntryScope::Agent(id) => base.filter(
            job_seekers::agent_id
                .eq(id.value())
                .or(job_informations::agent_id.eq(id.value())),
        ),
    };
    let rows = query
        .load::<(TaskGroupRow, OwnershipColumns)>(connection)
        .map_err(classify(operation))?;
    Ok(rows
        .into_iter()
        .map(|(group_row, (ca_agent, ca_staff, ra_agent, ra_staff))| {
            let ownership = Ownership {
                ca_agent_id: AgentId::new(ca_agent),
                ca_staff_id: ca_staff.map(StaffId::new),
                ra_agent_id: AgentId::new(ra_agent),
                ra_staff_id: ra_staff.map(StaffId::new),
            };
            (group_row, ownership)
        })
        .collect())
}

fn insert_task(
    connection: &mut PgConnection,
    operation: &'static str,
    task_group_id: i64,
    draft: &TaskDraft,
) -> PipelineRepositoryResult<Task> {
    let row = diesel::insert_into(tasks::table)
        .values(&to_new_task_row(task_group_id, draft))
        .returning(TaskRow::as_returning())
        .get_result::<TaskRow>(connection)
        .map_err(classify(operation))?;
    row_to_task(operation, row)
}

/// Stores the satellites of a freshly inserted task.
///
/// Must run inside the transaction that inserted `task`; a rejected
/// satellite rolls the task back with it.
fn insert_satellites(
    connection: &mut PgConnection,
    operation: &'static str,
    task: &Task,
    job_seeker_id: i64,
    satellites: TaskSatellites,
) -> PipelineRepositoryResult<(Option<EvaluationPoint>, Option<SelectionQuestionnaire>)> {
    let evaluation_point = match satellites.evaluation {
        Some(input) => Some(insert_evaluation_point(connection, operation, task, input)?),
        None => None,
    };
    let questionnaire = match satellites.questionnaire_token {
        Some(token) => Some(insert_questionnaire(
            connection,
            operation,
            task,
            job_seeker_id,
            token,
        )?),
        None => None,
    };
    Ok((evaluation_point, questionnaire))
}

fn insert_evaluation_point(
    connection: &mut PgConnection,
    operation: &'static str,
    task: &Task,
    input: EvaluationInput,
) -> PipelineRepositoryResult<EvaluationPoint> {
    let row = diesel::insert_into(evaluation_points::table)
        .values(&NewEvaluationPointRow {
            task_id: task.id().value(),
            good_points: input.good_points,
            bad_points: input.bad_points,
            verdict: input.verdict.as_str().to_owned(),
            created_at: task.created_at(),
        })
        .returning(EvaluationPointRow::as_returning())
        .get_result::<EvaluationPointRow>(connection)
        .map_err(classify(operation))?;
    row_to_evaluation_point(operation, row)
}

fn insert_questionnaire(
    connection: &mut PgConnection,
    operation: &'static str,
    task: &Task,
    job_seeker_id: i64,
    access_token: Uuid,
) -> PipelineRepositoryResult<SelectionQuestionnaire> {
    let row = diesel::insert_into(selection_questionnaires::table)
        .values(&NewQuestionnaireRow {
            task_id: task.id().value(),
            job_seeker_id,
            access_token,
            is_answered: false,
            created_at: task.created_at(),
        })
        .returning(QuestionnaireRow::as_returning())
        .get_result::<QuestionnaireRow>(connection)
        .map_err(classify(operation))?;
    Ok(row_to_questionnaire(row))
}

fn to_new_group_row(group: NewTaskGroup) -> NewTaskGroupRow {
    let (external_company_name, external_job_title) = group
        .external
        .map_or((None, None), |posting| {
            (Some(posting.company_name), Some(posting.job_title))
        });
    NewTaskGroupRow {
        job_seeker_id: group.job_seeker_id.value(),
        job_information_id: group.job_information_id.value(),
        selection_flow_pattern_id: group.selection_flow_pattern_id.map(SelectionFlowPatternId::value),
        is_double_sided: group.is_double_sided,
        is_self_application: group.is_self_application,
        external_company_name,
        external_job_title,
        created_at: group.created_at,
        updated_at: group.created_at,
    }
}

fn to_group_changeset(group: &TaskGroup) -> TaskGroupChangeset {
    let activity = group.activity();
    TaskGroupChangeset {
        selection_flow_pattern_id: group.selection_flow_pattern_id().map(SelectionFlowPatternId::value),
        is_double_sided: group.is_double_sided(),
        is_self_application: group.is_self_application(),
        joining_date: group.joining_date(),
        ra_last_requested_at: activity.ra_last_requested_at,
        ca_last_requested_at: activity.ca_last_requested_at,
        ra_last_watched_at: activity.ra_last_watched_at,
        ca_last_watched_at: activity.ca_last_watched_at,
        external_company_name: group.external().map(|posting| posting.company_name.clone()),
        external_job_title: group.external().map(|posting| posting.job_title.clone()),
        updated_at: group.updated_at(),
    }
}

fn row_to_group(row: TaskGroupRow) -> TaskGroup {
    let external = match (row.external_company_name, row.external_job_title) {
        (Some(company_name), Some(job_title)) => Some(ExternalPosting {
            company_name,
            job_title,
        }),
        _ => None,
    };
    TaskGroup::from_persisted(PersistedTaskGroupData {
        id: TaskGroupId::new(row.id),
        job_seeker_id: JobSeekerId::new(row.job_seeker_id),
        job_information_id: JobInformationId::new(row.job_information_id),
        selection_flow_pattern_id: row.selection_flow_pattern_id.map(SelectionFlowPatternId::new),
        is_double_sided: row.is_double_sided,
        is_self_application: row.is_self_application,
        joining_date: row.joining_date,
        activity: SideActivity {
            ra_last_requested_at: row.ra_last_requested_at,
            ca_last_requested_at: row.ca_last_requested_at,
            ra_last_watched_at: row.ra_last_watched_at,
            ca_last_watched_at: row.ca_last_watched_at,
        },
        external,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn to_new_task_row(task_group_id: i64, draft: &TaskDraft) -> NewTaskRow {
    let (phase_category, phase_sub_category) = draft.phase().raw();
    let details = draft.details();
    NewTaskRow {
        task_group_id,
        phase_category,
        phase_sub_category,
        staff_type: draft.staff_type().as_str().to_owned(),
        executed_staff_id: draft.executed_staff_id().value(),
        deadline_day: details.deadline.day,
        deadline_time: details.deadline.time,
        remarks: details.remarks.clone(),
        guidance: details.guidance.clone(),
        condition_note: details.condition_note.clone(),
        is_check_double_sided: details.is_check_double_sided,
        created_at: draft.created_at(),
    }
}

fn row_to_task(operation: &'static str, row: TaskRow) -> PipelineRepositoryResult<Task> {
    let phase = Phase::from_raw(row.phase_category, row.phase_sub_category)
        .map_err(|err| PipelineRepositoryError::persistence(operation, err))?;
    let staff_type = StaffType::try_from(row.staff_type.as_str())
        .map_err(|err| PipelineRepositoryError::persistence(operation, err))?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(row.id),
        task_group_id: TaskGroupId::new(row.task_group_id),
        phase,
        staff_type,
        executed_staff_id: StaffId::new(row.executed_staff_id),
        details: TaskDetails {
            deadline: Deadline {
                day: row.deadline_day,
                time: row.deadline_time,
            },
            remarks: row.remarks,
            guidance: row.guidance,
            condition_note: row.condition_note,
            is_check_double_sided: row.is_check_double_sided,
        },
        created_at: row.created_at,
    }))
}

const fn group_key(task: &Task) -> i64 {
    task.task_group_id().value()
}

fn row_to_evaluation_point(
    operation: &'static str,
    row: EvaluationPointRow,
) -> PipelineRepositoryResult<EvaluationPoint> {
    let verdict = EvaluationVerdict::try_from(row.verdict.as_str())
        .map_err(|err| PipelineRepositoryError::persistence(operation, err))?;
    Ok(EvaluationPoint {
        id: EvaluationPointId::new(row.id),
        task_id: TaskId::new(row.task_id),
        input: EvaluationInput {
            good_points: row.good_points,
            bad_points: row.bad_points,
            verdict,
        },
        created_at: row.created_at,
    })
}

fn row_to_questionnaire(row: QuestionnaireRow) -> SelectionQuestionnaire {
    SelectionQuestionnaire {
        id: SelectionQuestionnaireId::new(row.id),
        task_id: TaskId::new(row.task_id),
        job_seeker_id: JobSeekerId::new(row.job_seeker_id),
        access_token: row.access_token,
        is_answered: row.is_answered,
        created_at: row.created_at,
    }
}

fn to_step_row(
    selection_flow_pattern_id: i64,
    index: usize,
    step: &SelectionStep,
) -> PipelineRepositoryResult<NewSelectionStepRow> {
    let position = i32::try_from(index)
        .map_err(|err| PipelineRepositoryError::persistence("store_selection_flow", err))?;
    Ok(NewSelectionStepRow {
        selection_flow_pattern_id,
        position,
        phase_category: step.phase_category.code(),
        passing_rate: step.passing_rate.map(i16::from),
        pass_example: step.pass_example.clone(),
        fail_example: step.fail_example.clone(),
        requires_questionnaire: step.requires_questionnaire,
    })
}

fn row_to_step(
    operation: &'static str,
    row: SelectionStepRow,
) -> PipelineRepositoryResult<SelectionStep> {
    let phase_category = PhaseCategory::try_from(row.phase_category)
        .map_err(|err| PipelineRepositoryError::persistence(operation, err))?;
    let passing_rate = row
        .passing_rate
        .map(u8::try_from)
        .transpose()
        .map_err(|err| PipelineRepositoryError::persistence(operation, err))?;
    Ok(SelectionStep {
        phase_category,
        passing_rate,
        pass_example: row.pass_example,
        fail_example: row.fail_example,
        requires_questionnaire: row.requires_questionnaire,
    })
}
