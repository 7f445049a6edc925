//! Diesel schema for interview timelines.

diesel::table! {
    /// Interview dates recorded per job seeker.
    interview_timelines (id) {
        /// Timeline identifier.
        id -> Int8,
        /// Job seeker the dates belong to.
        job_seeker_id -> Int8,
        /// Date of the first interview.
        first_interview_date -> Nullable<Date>,
        /// Date of the most recent interview.
        interview_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
