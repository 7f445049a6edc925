//! When steps for performance time-basis BDD scenarios.

use super::world::{AGENCY, PerformanceWorld, run_async};
use eyre::WrapErr;
use recruitflow::performance::domain::{Kpi, PerformanceScope, ReportingMonth, TimeBasis};
use recruitflow::pipeline::domain::StaffType;
use rstest_bdd_macros::when;

fn parse_basis(name: &str) -> Result<TimeBasis, eyre::Report> {
    match name {
        "activity" => Ok(TimeBasis::ActivityMonth),
        "interview" => Ok(TimeBasis::InterviewMonth),
        other => Err(eyre::eyre!("unknown time basis in scenario: {other}")),
    }
}

fn parse_kpi(name: &str) -> Result<Kpi, eyre::Report> {
    Kpi::ALL
        .into_iter()
        .find(|kpi| kpi.as_str() == name)
        .ok_or_else(|| eyre::eyre!("unknown KPI in scenario: {name}"))
}

fn parse_month(text: &str) -> Result<ReportingMonth, eyre::Report> {
    let (year, month) = text
        .split_once('-')
        .ok_or_else(|| eyre::eyre!("expected YYYY-MM, got {text}"))?;
    Ok(ReportingMonth::new(year.parse()?, month.parse()?)?)
}

#[when(r#"the agency counts "{kpi}" by "{basis}" month for "{month}""#)]
fn agency_counts(
    world: &mut PerformanceWorld,
    kpi: String,
    basis: String,
    month: String,
) -> Result<(), eyre::Report> {
    let count = run_async(world.reports.count(
        PerformanceScope::agent(AGENCY, StaffType::Ca),
        parse_basis(&basis)?,
        parse_month(&month)?,
        parse_kpi(&kpi)?,
    ))
    .wrap_err("count KPI for scenario")?;
    world.last_count = Some(count);
    Ok(())
}
