//! Run orchestration
//!
//! One run: resolve the boost function, enumerate monitors, apply the level
//! to each in enumeration order. Nothing is rolled back; a monitor already
//! boosted stays boosted whatever happens later in the run.

use crate::brightness::BrightnessLevel;
use crate::error::Result;
use crate::hdr::{BoostCapability, BoostTarget};
use crate::monitor::{MonitorHandle, MonitorRecord, MonitorSource};
use tracing::{debug, error, info};

/// Where a run currently is
///
/// `Start -> LibraryLoaded -> FunctionResolved -> Applying* -> Done`, with
/// `Failed` reachable from `Start` (library missing) and `LibraryLoaded`
/// (ordinal missing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing done yet
    Start,
    /// Compositor library is loaded
    LibraryLoaded,
    /// Boost function resolved, monitors not yet touched
    FunctionResolved,
    /// Applying to the monitor at `index` in enumeration order
    Applying {
        /// Position in the enumerated sequence
        index: usize,
    },
    /// Every enumerated monitor has been passed to the boost function
    Done,
    /// The boost function could not be acquired; no monitor was touched
    Failed,
}

impl RunState {
    /// Whether `next` is a legal successor of `self`
    pub fn can_advance_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Start, Self::LibraryLoaded | Self::Failed)
            | (Self::LibraryLoaded, Self::FunctionResolved | Self::Failed)
            | (Self::FunctionResolved, Self::Applying { index: 0 } | Self::Done)
            | (Self::Applying { .. }, Self::Done) => true,
            (Self::Applying { index }, Self::Applying { index: next_index }) => {
                next_index == index + 1
            }
            _ => false,
        }
    }

    /// Whether the run is over
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// What a finished run did
#[derive(Debug, Clone, PartialEq)]
pub struct BoostReport {
    /// Level applied to every monitor
    pub level: BrightnessLevel,
    /// Monitors passed to the boost function, in call order
    pub monitors: Vec<MonitorHandle>,
    /// Every state the run went through
    pub history: Vec<RunState>,
}

/// Drives one boost run through its states
#[derive(Debug)]
pub struct BoostRun {
    state: RunState,
    history: Vec<RunState>,
}

impl Default for BoostRun {
    fn default() -> Self {
        Self::new()
    }
}

impl BoostRun {
    /// A run in `Start`
    pub fn new() -> Self {
        Self {
            state: RunState::Start,
            history: vec![RunState::Start],
        }
    }

    /// Current state
    pub fn state(&self) -> RunState {
        self.state
    }

    /// States visited so far, starting with `Start`
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    fn advance(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "illegal run transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!("Run state {:?} -> {:?}", self.state, next);
        self.state = next;
        self.history.push(next);
    }

    /// Execute the run
    ///
    /// See [`BoostRun::execute_with`].
    pub fn execute<F, S>(
        &mut self,
        capability: BoostCapability<F>,
        source: &S,
        level: BrightnessLevel,
    ) -> Result<BoostReport>
    where
        F: BoostTarget,
        S: MonitorSource,
    {
        self.execute_with(capability, source, level, |_| {})
    }

    /// Execute the run, calling `before_apply` right before each monitor is
    /// boosted
    ///
    /// Monitors are enumerated only once the function is resolved, so a
    /// failed probe touches nothing. Each call starts a fresh run.
    pub fn execute_with<F, S, O>(
        &mut self,
        capability: BoostCapability<F>,
        source: &S,
        level: BrightnessLevel,
        mut before_apply: O,
    ) -> Result<BoostReport>
    where
        F: BoostTarget,
        S: MonitorSource,
        O: FnMut(&MonitorRecord),
    {
        *self = Self::new();

        if capability.library_loaded() {
            self.advance(RunState::LibraryLoaded);
        }

        let boost = match capability.into_result() {
            Ok(boost) => boost,
            Err(e) => {
                error!("Boost function unavailable: {}", e);
                self.advance(RunState::Failed);
                return Err(e);
            }
        };
        self.advance(RunState::FunctionResolved);

        let monitors = source.enumerate_monitors();
        info!("Applying brightness {} to {} monitor(s)", level, monitors.len());

        let mut applied = Vec::with_capacity(monitors.len());
        for (index, monitor) in monitors.iter().enumerate() {
            self.advance(RunState::Applying { index });
            before_apply(monitor);
            boost.apply(monitor.handle, level);
            applied.push(monitor.handle);
        }

        self.advance(RunState::Done);
        info!("Brightness applied to {} monitor(s)", applied.len());

        Ok(BoostReport {
            level,
            monitors: applied,
            history: self.history.clone(),
        })
    }
}
