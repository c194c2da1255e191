//! Run orchestration: the single owned state behind every rendering surface.

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::catalog::Catalog;
use crate::core::evaluate::{Verdict, evaluate};
use crate::core::mission::Mission;
use crate::core::run::{RunInFlight, RunResult, RunState};
use crate::io::service::{RunService, ServiceError};

/// Everything a rendering surface needs: run state, verdict, active mission.
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub state: RunState,
    /// `None` until a completed run has been evaluated, and again after the
    /// selection changes: a verdict is specific to the mission it was
    /// computed for.
    pub verdict: Option<Verdict>,
    pub mission: Option<Mission>,
}

/// Owns the catalog, the run lifecycle and the last verdict.
///
/// All mutation goes through the transition methods below; rendering
/// surfaces only ever read a [`ViewState`] snapshot.
#[derive(Debug, Default)]
pub struct Session {
    catalog: Catalog,
    state: RunState,
    verdict: Option<Verdict>,
    /// Test source of the last completed run, kept while `Done` so an
    /// explicit re-evaluation can re-check the keyword criterion.
    tests_source: Option<String>,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    /// Degraded session with no missions loaded. Runs stay possible;
    /// evaluation yields [`Verdict::NoMission`].
    pub fn without_catalog() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// Select a mission by id. Unknown ids are a silent no-op.
    ///
    /// When the selection actually changes, the displayed verdict is cleared:
    /// it was computed for the previous mission. Stored run counts stay as
    /// they are and are not re-evaluated unless [`Session::reevaluate`] is
    /// called.
    pub fn select_mission(&mut self, id: &str) -> bool {
        let changed = self.catalog.select(id);
        if changed {
            debug!(mission = id, "mission selected, verdict cleared");
            self.verdict = None;
        }
        changed
    }

    /// Reserve the session for a new run.
    ///
    /// Refused while a run is in flight. On success the previous result,
    /// verdict and test source are discarded before any request goes out, so
    /// no stale data survives a resubmission.
    pub fn begin_run(&mut self) -> Result<(), RunInFlight> {
        self.state.try_begin()?;
        self.verdict = None;
        self.tests_source = None;
        debug!("run started");
        Ok(())
    }

    /// Settle the in-flight run.
    ///
    /// A success stores the result and evaluates it against the current
    /// mission; a failure stores the message only. Ignored when no run is in
    /// flight, so a late settlement can never attach a second result.
    pub fn finish_run(&mut self, outcome: Result<RunResult, ServiceError>, tests_source: &str) {
        match outcome {
            Ok(result) => {
                let verdict = evaluate(self.catalog.current(), &result, tests_source);
                if !self.state.settle_success(result) {
                    warn!("dropping run settlement: no run in flight");
                    return;
                }
                debug!(verdict = ?verdict, "run completed");
                self.verdict = Some(verdict);
                self.tests_source = Some(tests_source.to_string());
            }
            Err(err) => {
                if !self.state.settle_failure(err.to_string()) {
                    warn!("dropping run failure: no run in flight");
                    return;
                }
                debug!(error = %err, "run failed");
            }
        }
    }

    /// Guard, call the service, settle. The convenience path for synchronous
    /// callers; the only error returned is the in-flight rejection. Service
    /// failures become the `Error` state instead.
    pub fn submit(
        &mut self,
        service: &dyn RunService,
        code: &str,
        tests: &str,
    ) -> Result<(), RunInFlight> {
        self.begin_run()?;
        let outcome = service.run(code, tests);
        self.finish_run(outcome, tests);
        Ok(())
    }

    /// Re-run the evaluator for the stored result against the currently
    /// selected mission. Selection changes never do this implicitly. No-op
    /// unless a completed run is stored.
    pub fn reevaluate(&mut self) {
        let Some(tests_source) = &self.tests_source else {
            return;
        };
        let Some(result) = self.state.result() else {
            return;
        };
        self.verdict = Some(evaluate(self.catalog.current(), result, tests_source));
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> ViewState {
        ViewState {
            state: self.state.clone(),
            verdict: self.verdict.clone(),
            mission: self.catalog.current().cloned(),
        }
    }
}
