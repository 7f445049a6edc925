//! Blocking operation helpers shared by the `PostgreSQL` adapters.
//!
//! Diesel is synchronous; every query runs on tokio's blocking pool so the
//! async executor's worker threads stay free.

use crate::pipeline::ports::{PipelineRepositoryError, PipelineRepositoryResult};
use diesel::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by the adapters.
pub type PipelinePgPool = Pool<ConnectionManager<PgConnection>>;

/// Checks a connection out of `pool` and runs `f` on the blocking pool.
///
/// Pool and join failures surface as persistence errors tagged with
/// `operation`.
pub(crate) async fn run_blocking<F, T>(
    pool: &PipelinePgPool,
    operation: &'static str,
    f: F,
) -> PipelineRepositoryResult<T>
where
    F: FnOnce(&mut PgConnection) -> PipelineRepositoryResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = pool
            .get()
            .map_err(|err| PipelineRepositoryError::persistence(operation, err))?;
        f(&mut connection)
    })
    .await
    .map_err(|err| PipelineRepositoryError::persistence(operation, err))?
}
