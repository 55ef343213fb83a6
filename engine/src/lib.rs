pub mod app;
pub mod graphics;
pub mod pixels_renderer;
pub mod render;
pub mod timer;
pub mod ui;
pub mod view_tree;

use std::time::Duration;

/// Append-only record of per-frame snapshots.
#[derive(Debug)]
pub struct TimeMachine<State> {
    states: Vec<State>,
}

impl<State> TimeMachine<State> {
    pub fn new(initial_state: State) -> Self {
        Self {
            states: vec![initial_state],
        }
    }

    pub fn frame(&self) -> usize {
        self.states.len() - 1
    }

    pub fn state(&self) -> &State {
        &self.states[self.frame()]
    }

    pub fn state_at(&self, frame: usize) -> Option<&State> {
        self.states.get(frame)
    }

    pub fn history(&self) -> &[State] {
        &self.states
    }

    pub fn record(&mut self, state: State) -> usize {
        self.states.push(state);
        self.frame()
    }
}

/// Something that can be driven frame by frame without a window.
pub trait Simulation {
    type Action;
    type Snapshot;

    /// Applies the actions of one frame, then lets `dt` of time pass.
    fn apply(&mut self, actions: &[Self::Action], dt: Duration);
    fn snapshot(&self) -> Self::Snapshot;
}

/// Drives a [`Simulation`] with scripted input, recording a snapshot after every frame.
#[derive(Debug)]
pub struct HeadlessRunner<S: Simulation> {
    sim: S,
    timemachine: TimeMachine<S::Snapshot>,
}

impl<S: Simulation> HeadlessRunner<S> {
    pub fn new(sim: S) -> Self {
        let initial = sim.snapshot();
        Self {
            sim,
            timemachine: TimeMachine::new(initial),
        }
    }

    pub fn frame(&self) -> usize {
        self.timemachine.frame()
    }

    pub fn snapshot(&self) -> &S::Snapshot {
        self.timemachine.state()
    }

    pub fn history(&self) -> &[S::Snapshot] {
        self.timemachine.history()
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    pub fn into_inner(self) -> S {
        self.sim
    }

    pub fn step(&mut self, actions: &[S::Action], dt: Duration) -> usize {
        self.sim.apply(actions, dt);
        let snapshot = self.sim.snapshot();
        self.timemachine.record(snapshot)
    }

    /// Steps `frames` times with no input.
    pub fn idle(&mut self, frames: usize, dt: Duration) -> usize {
        let mut last = self.frame();
        for _ in 0..frames {
            last = self.step(&[], dt);
        }
        last
    }

    pub fn run<I>(&mut self, frames: I, dt: Duration) -> usize
    where
        I: IntoIterator<Item = Vec<S::Action>>,
    {
        let mut last = self.frame();
        for actions in frames {
            last = self.step(&actions, dt);
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timemachine_records_in_order() {
        let mut tm = TimeMachine::new(0);
        tm.record(1);
        tm.record(2);
        assert_eq!(tm.state(), &2);
        assert_eq!(tm.frame(), 2);
        assert_eq!(tm.state_at(1), Some(&1));
        assert_eq!(tm.history(), &[0, 1, 2]);
    }

    #[derive(Debug, Default)]
    struct Stopwatch {
        elapsed: Duration,
        laps: u32,
    }

    impl Simulation for Stopwatch {
        type Action = ();
        type Snapshot = (u64, u32);

        fn apply(&mut self, actions: &[()], dt: Duration) {
            self.laps += actions.len() as u32;
            self.elapsed += dt;
        }

        fn snapshot(&self) -> (u64, u32) {
            (self.elapsed.as_millis() as u64, self.laps)
        }
    }

    #[test]
    fn runner_records_snapshot_per_frame() {
        let mut runner = HeadlessRunner::new(Stopwatch::default());
        let dt = Duration::from_millis(100);

        runner.step(&[()], dt);
        runner.idle(2, dt);
        runner.run([vec![(), ()]], dt);

        assert_eq!(runner.frame(), 4);
        assert_eq!(
            runner.history(),
            &[(0, 0), (100, 1), (200, 1), (300, 1), (400, 3)]
        );
        assert_eq!(runner.into_inner().laps, 3);
    }
}
