//! Dispatcher lifecycle and counters, shared between the admission loop,
//! every task, and the consumer's handle.

use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Lifecycle of one dispatch. Moves forward only; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DispatchState {
    /// Created, nothing admitted yet.
    Idle,
    /// Admission loop is still launching tasks.
    Running,
    /// Every task launched, some still in flight.
    Draining,
    /// Last result written; the output stream closes with it.
    Closed,
}

impl DispatchState {
    fn from_u8(v: u8) -> Self {
        match v {
            0 => DispatchState::Idle,
            1 => DispatchState::Running,
            2 => DispatchState::Draining,
            _ => DispatchState::Closed,
        }
    }
}

#[derive(Debug)]
pub(super) struct DispatchStats {
    total: usize,
    state: AtomicU8,
    launched: AtomicUsize,
    completed: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl DispatchStats {
    pub(super) fn new(total: usize) -> Self {
        Self {
            total,
            state: AtomicU8::new(DispatchState::Idle as u8),
            launched: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub(super) fn total(&self) -> usize {
        self.total
    }

    pub(super) fn state(&self) -> DispatchState {
        DispatchState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub(super) fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }

    pub(super) fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    pub(super) fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub(super) fn start(&self) {
        self.advance(DispatchState::Idle, DispatchState::Running);
    }

    /// A permit was acquired and the task spawned.
    pub(super) fn task_launched(&self) {
        self.launched.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    /// Fetch and hash finished; the permit is released right after.
    pub(super) fn fetch_finished(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    /// The task's result is written; its sender is dropped right after.
    pub(super) fn task_completed(&self) {
        let done = self.completed.fetch_add(1, Ordering::SeqCst) + 1;
        if done == self.total {
            self.advance(DispatchState::Draining, DispatchState::Closed);
        }
    }

    /// Admission loop is finished; its sender is dropped right after.
    pub(super) fn admission_done(&self) {
        self.advance(DispatchState::Running, DispatchState::Draining);
        if self.completed() == self.total {
            self.advance(DispatchState::Draining, DispatchState::Closed);
        }
    }

    fn advance(&self, from: DispatchState, to: DispatchState) {
        let _ = self
            .state
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst);
    }
}
