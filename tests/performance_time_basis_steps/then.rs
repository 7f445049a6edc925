//! Then steps for performance time-basis BDD scenarios.

use super::world::PerformanceWorld;
use rstest_bdd_macros::then;

#[then("the count is {expected:u64}")]
fn count_is(world: &PerformanceWorld, expected: u64) -> Result<(), eyre::Report> {
    let actual = world
        .last_count
        .ok_or_else(|| eyre::eyre!("missing count in scenario world"))?;
    eyre::ensure!(actual == expected, "expected count {expected}, found {actual}");
    Ok(())
}
