use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::format_system_time,
    state::report::{CycleReport, FetchFailure},
};

/// Fetch that failed during the last refresh cycle.
#[derive(Debug, Serialize, ToSchema)]
pub struct FetchFailureDto {
    /// Upstream resource, e.g. `players` or `standings:AFM`.
    pub target: String,
    pub error: String,
}

impl From<&FetchFailure> for FetchFailureDto {
    fn from(failure: &FetchFailure) -> Self {
        Self {
            target: failure.target.to_string(),
            error: failure.error.clone(),
        }
    }
}

/// Summary of a settled refresh cycle.
#[derive(Debug, Serialize, ToSchema)]
pub struct CycleReportDto {
    pub id: Uuid,
    /// RFC 3339 timestamp.
    pub started_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    pub succeeded: usize,
    pub failures: Vec<FetchFailureDto>,
}

impl From<&CycleReport> for CycleReportDto {
    fn from(report: &CycleReport) -> Self {
        Self {
            id: report.id,
            started_at: format_system_time(report.started_at),
            finished_at: report.finished_at.map(format_system_time),
            succeeded: report.succeeded,
            failures: report.failures.iter().map(FetchFailureDto::from).collect(),
        }
    }
}

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded" when the last cycle had failures).
    pub status: String,
    /// True until the first refresh cycle has settled.
    pub loading: bool,
    pub cycles_in_flight: usize,
    /// Kiosk screens subscribed to the public event stream.
    pub connected_screens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_cycle: Option<CycleReportDto>,
}

impl HealthResponse {
    /// Build the response from the last settled cycle, if any.
    pub fn from_report(
        report: Option<&CycleReport>,
        loading: bool,
        cycles_in_flight: usize,
        connected_screens: usize,
    ) -> Self {
        let degraded = report.is_some_and(|report| !report.failures.is_empty());
        Self {
            status: if degraded { "degraded" } else { "ok" }.to_string(),
            loading,
            cycles_in_flight,
            connected_screens,
            last_cycle: report.map(CycleReportDto::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::report::FetchTarget;

    #[test]
    fn failures_mark_service_degraded() {
        let mut report = CycleReport::start();
        report.record::<(), &str>(FetchTarget::MachineStandings("AFM".into()), &Err("502"));
        let report = report.finish();

        let response = HealthResponse::from_report(Some(&report), false, 0, 2);
        assert_eq!(response.status, "degraded");
        let last = response.last_cycle.unwrap();
        assert_eq!(last.failures[0].target, "standings:AFM");
        assert!(last.finished_at.is_some());
    }

    #[test]
    fn no_cycle_yet_is_ok_and_loading() {
        let response = HealthResponse::from_report(None, true, 1, 0);
        assert_eq!(response.status, "ok");
        assert_eq!(response.cycles_in_flight, 1);
        assert!(response.loading);
        assert!(response.last_cycle.is_none());
    }
}
