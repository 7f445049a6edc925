//! Diesel schema for pipeline persistence.

diesel::table! {
    /// Job seeker ownership maintained by the job seeker subsystem.
    job_seekers (id) {
        /// Job seeker identifier.
        id -> Int8,
        /// Owning (CA-side) agency.
        agent_id -> Int8,
        /// Owning (CA-side) staff member.
        agent_staff_id -> Nullable<Int8>,
    }
}

diesel::table! {
    /// Posting ownership maintained by the posting subsystem.
    job_informations (id) {
        /// Posting identifier.
        id -> Int8,
        /// Owning (RA-side) agency.
        agent_id -> Int8,
        /// Owning (RA-side) staff member.
        agent_staff_id -> Nullable<Int8>,
    }
}

diesel::table! {
    /// Selection-flow templates.
    selection_flow_patterns (id) {
        /// Template identifier.
        id -> Int8,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Ordered steps of a selection-flow template.
    selection_informations (id) {
        /// Step identifier.
        id -> Int8,
        /// Owning template.
        selection_flow_pattern_id -> Int8,
        /// Zero-based position within the template.
        position -> Int4,
        /// Phase category the step maps to.
        phase_category -> Int4,
        /// Target passing rate in percent.
        passing_rate -> Nullable<Int2>,
        /// Example of a passing profile.
        pass_example -> Text,
        /// Example of a failing profile.
        fail_example -> Text,
        /// Post-step questionnaire flag.
        requires_questionnaire -> Bool,
    }
}

diesel::table! {
    /// Candidacy containers, one per job seeker and posting pairing.
    task_groups (id) {
        /// Group identifier.
        id -> Int8,
        /// Candidate.
        job_seeker_id -> Int8,
        /// Posting.
        job_information_id -> Int8,
        /// Selection-flow template.
        selection_flow_pattern_id -> Nullable<Int8>,
        /// Alliance visibility flag.
        is_double_sided -> Bool,
        /// Self-application flag.
        is_self_application -> Bool,
        /// Joining date.
        joining_date -> Nullable<Date>,
        /// Last RA-side request.
        ra_last_requested_at -> Nullable<Timestamptz>,
        /// Last CA-side request.
        ca_last_requested_at -> Nullable<Timestamptz>,
        /// Last RA-side view.
        ra_last_watched_at -> Nullable<Timestamptz>,
        /// Last CA-side view.
        ca_last_watched_at -> Nullable<Timestamptz>,
        /// External employer name.
        #[max_length = 255]
        external_company_name -> Nullable<Varchar>,
        /// External job title.
        #[max_length = 255]
        external_job_title -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Latest metadata change.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only phase-transition log.
    tasks (id) {
        /// Task identifier; ordering defines event order.
        id -> Int8,
        /// Owning group.
        task_group_id -> Int8,
        /// Raw phase category.
        phase_category -> Int4,
        /// Raw phase sub-category.
        phase_sub_category -> Int4,
        /// Executing side.
        #[max_length = 2]
        staff_type -> Varchar,
        /// Executing staff member.
        executed_staff_id -> Int8,
        /// Deadline day.
        deadline_day -> Nullable<Date>,
        /// Deadline time of day.
        deadline_time -> Nullable<Time>,
        /// Free-form remarks.
        remarks -> Text,
        /// Guidance text.
        guidance -> Text,
        /// Condition notes.
        condition_note -> Text,
        /// Double-sided check flag.
        is_check_double_sided -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Evaluation notes attached to a task.
    evaluation_points (id) {
        /// Evaluation identifier.
        id -> Int8,
        /// Evaluated task.
        task_id -> Int8,
        /// Positive observations.
        good_points -> Text,
        /// Negative observations.
        bad_points -> Text,
        /// Verdict label.
        #[max_length = 20]
        verdict -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Post-step questionnaires issued to job seekers.
    selection_questionnaires (id) {
        /// Questionnaire identifier.
        id -> Int8,
        /// Triggering task.
        task_id -> Int8,
        /// Job seeker expected to answer.
        job_seeker_id -> Int8,
        /// Link token.
        access_token -> Uuid,
        /// Answered flag.
        is_answered -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(task_groups -> job_seekers (job_seeker_id));
diesel::joinable!(task_groups -> job_informations (job_information_id));
diesel::joinable!(tasks -> task_groups (task_group_id));
diesel::joinable!(selection_informations -> selection_flow_patterns (selection_flow_pattern_id));

diesel::allow_tables_to_appear_in_same_query!(
    job_seekers,
    job_informations,
    selection_flow_patterns,
    selection_informations,
    task_groups,
    tasks,
    evaluation_points,
    selection_questionnaires,
);
