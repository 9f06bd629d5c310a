//! Per-session store of completed stage results.
//!
//! The session lives as long as one TUI run or one CLI invocation. It keeps
//! the latest result of each stage (for display and export) and the ROI
//! snapshot the scenario stage compares against.

use std::collections::BTreeMap;

use crate::engine::StageResult;
use crate::engine::formulas::RoiSnapshot;
use crate::error::{CalcError, Result};
use crate::types::{RoiFormula, Stage};

/// Message shown when the scenario stage runs before the ROI stage.
pub const ROI_NOT_READY_MESSAGE: &str = "Please complete the ROI calculation first.";

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Latest result per stage, iterated in canonical order
    results: BTreeMap<Stage, StageResult>,
    roi_snapshot: Option<RoiSnapshot>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The error a dependent stage reports when the ROI stage has not run.
    pub fn roi_not_ready() -> CalcError {
        CalcError::not_ready(ROI_NOT_READY_MESSAGE)
    }

    /// Store a successful result, replacing any earlier one for its stage.
    ///
    /// An ROI result also refreshes the snapshot, tagged with the formula
    /// it was computed with, and drops the scenario result built on the
    /// previous snapshot.
    pub fn record(&mut self, result: StageResult, formula: RoiFormula) {
        if let StageResult::Roi { input, result: roi } = &result {
            self.roi_snapshot = Some(RoiSnapshot::new(input, roi, formula));
            self.results.remove(&Stage::Scenario);
        }
        self.results.insert(result.stage(), result);
    }

    /// The ROI figures the scenario stage builds on.
    pub fn roi_snapshot(&self) -> Result<&RoiSnapshot> {
        self.roi_snapshot.as_ref().ok_or_else(Self::roi_not_ready)
    }

    pub fn result(&self, stage: Stage) -> Option<&StageResult> {
        self.results.get(&stage)
    }

    pub fn is_completed(&self, stage: Stage) -> bool {
        self.results.contains_key(&stage)
    }

    /// Completed results in canonical stage order.
    pub fn completed(&self) -> impl Iterator<Item = &StageResult> {
        self.results.values()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Forget everything, as at the start of a new session.
    pub fn clear(&mut self) {
        self.results.clear();
        self.roi_snapshot = None;
    }
}
