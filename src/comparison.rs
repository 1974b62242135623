//! Side-by-side comparison run: two step tickers joined by a completion barrier.

use crate::visualizer::{DsInfo, DsType};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info};

const SIDES: usize = 2;

/// Fires once after `required` distinct participants have signalled within the
/// same generation. Signals carrying an older generation are ignored.
#[derive(Debug)]
pub struct CompletionBarrier {
    required: usize,
    generation: u64,
    arrived: HashSet<usize>,
    fired: bool,
}

impl CompletionBarrier {
    pub fn new(required: usize) -> Self {
        Self {
            required,
            generation: 0,
            arrived: HashSet::new(),
            fired: false,
        }
    }

    /// Starts a new generation and returns its number.
    pub fn reset(&mut self) -> u64 {
        self.generation += 1;
        self.arrived.clear();
        self.fired = false;
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` for exactly one signal per generation: the one that
    /// completes the set.
    pub fn signal(&mut self, generation: u64, participant: usize) -> bool {
        if generation != self.generation || self.fired {
            return false;
        }
        self.arrived.insert(participant);
        if self.arrived.len() >= self.required {
            self.fired = true;
            return true;
        }
        false
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    Idle,
    Running,
    Complete,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideSnapshot {
    pub info: DsInfo,
    pub step: usize,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSnapshot {
    pub state: RunState,
    pub left: SideSnapshot,
    pub right: SideSnapshot,
    pub max_step: usize,
    pub dataset: Vec<i64>,
    pub target: i64,
    pub completed_runs: u64,
}

pub type CompletionCallback = Arc<dyn Fn(u64) + Send + Sync>;

struct DriverState {
    state: RunState,
    structures: [DsType; SIDES],
    steps: [usize; SIDES],
    done: [bool; SIDES],
    barrier: CompletionBarrier,
    tickers: Vec<JoinHandle<()>>,
    completed_runs: u64,
}

impl DriverState {
    fn stop(&mut self) {
        for handle in self.tickers.drain(..) {
            handle.abort();
        }
    }
}

pub struct ComparisonDriver {
    inner: Arc<Mutex<DriverState>>,
    dataset: Arc<Vec<i64>>,
    target: i64,
    step_interval: Duration,
    on_complete: Option<CompletionCallback>,
}

impl ComparisonDriver {
    pub fn new(dataset: Vec<i64>, target: i64, step_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DriverState {
                state: RunState::Idle,
                structures: [DsType::Bst, DsType::Array],
                steps: [0; SIDES],
                done: [false; SIDES],
                barrier: CompletionBarrier::new(SIDES),
                tickers: Vec::new(),
                completed_runs: 0,
            })),
            dataset: Arc::new(dataset),
            target,
            step_interval,
            on_complete: None,
        }
    }

    /// Called with the run generation each time both sides finish.
    pub fn with_on_complete(mut self, callback: CompletionCallback) -> Self {
        self.on_complete = Some(callback);
        self
    }

    /// Last step before a side reports completion.
    pub fn max_step(&self) -> usize {
        self.dataset.len() + 1
    }

    /// Starts a run from idle or complete. No-op while running.
    pub async fn run(&self) -> ComparisonSnapshot {
        let mut s = self.inner.lock().await;
        if s.state != RunState::Running {
            s.stop();
            let generation = s.barrier.reset();
            s.state = RunState::Running;
            s.steps = [0; SIDES];
            s.done = [false; SIDES];

            for side in 0..SIDES {
                let handle = tokio::spawn(tick(
                    Arc::downgrade(&self.inner),
                    side,
                    generation,
                    self.max_step(),
                    self.step_interval,
                    self.on_complete.clone(),
                ));
                s.tickers.push(handle);
            }
            info!(
                "Comparison run {} started: {} vs {}",
                generation, s.structures[0], s.structures[1]
            );
        }
        self.snapshot_of(&s)
    }

    pub async fn reset(&self) -> ComparisonSnapshot {
        let mut s = self.inner.lock().await;
        Self::reset_locked(&mut s);
        self.snapshot_of(&s)
    }

    /// Changing either side always returns the driver to idle.
    pub async fn set_structures(&self, left: DsType, right: DsType) -> ComparisonSnapshot {
        let mut s = self.inner.lock().await;
        s.structures = [left, right];
        Self::reset_locked(&mut s);
        self.snapshot_of(&s)
    }

    pub async fn snapshot(&self) -> ComparisonSnapshot {
        let s = self.inner.lock().await;
        self.snapshot_of(&s)
    }

    fn reset_locked(s: &mut DriverState) {
        s.stop();
        // invalidate anything still in flight from the aborted run
        s.barrier.reset();
        s.state = RunState::Idle;
        s.steps = [0; SIDES];
        s.done = [false; SIDES];
    }

    fn snapshot_of(&self, s: &DriverState) -> ComparisonSnapshot {
        let side = |i: usize| SideSnapshot {
            info: s.structures[i].info(),
            step: s.steps[i],
            done: s.done[i],
        };
        ComparisonSnapshot {
            state: s.state,
            left: side(0),
            right: side(1),
            max_step: self.max_step(),
            dataset: self.dataset.to_vec(),
            target: self.target,
            completed_runs: s.completed_runs,
        }
    }
}

impl Drop for ComparisonDriver {
    fn drop(&mut self) {
        if let Ok(mut s) = self.inner.try_lock() {
            s.stop();
        }
    }
}

async fn tick(
    state: Weak<Mutex<DriverState>>,
    side: usize,
    generation: u64,
    max_step: usize,
    period: Duration,
    on_complete: Option<CompletionCallback>,
) {
    let mut ticker = interval_at(Instant::now() + period, period);

    loop {
        ticker.tick().await;

        // the driver is gone
        let Some(state) = state.upgrade() else { return };
        let mut s = state.lock().await;
        if s.barrier.generation() != generation {
            return;
        }

        if s.steps[side] < max_step {
            s.steps[side] += 1;
            continue;
        }

        s.done[side] = true;
        debug!("Comparison side {} finished run {}", side, generation);
        if s.barrier.signal(generation, side) {
            s.state = RunState::Complete;
            s.completed_runs += 1;
            s.tickers.clear();
            drop(s);

            info!("Comparison run {} complete", generation);
            if let Some(callback) = &on_complete {
                callback(generation);
            }
        }
        return;
    }
}
