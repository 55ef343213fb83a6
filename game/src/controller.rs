//! The game's state machine.
//!
//! `WaitingToStart` counts down from [`TIME_TO_START`], `Playing` counts down from
//! [`INITIAL_TIME`] and is refreshed by every accepted letter press, and the round ends in
//! `GameOver` (time ran out) or `Finished` (all 26 letters selected). Both terminal states wait
//! for a restart. All timing runs on an owned [`Scheduler`], advanced by the caller.

use std::fmt;
use std::time::Duration;

use engine::Simulation;
use engine::timer::{Firing, Scheduler, TimerId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::display::{self, Visor};
use crate::letters::{Letter, SelectionState};
use crate::sfx::TickCue;
use crate::settings::DEFAULT_COLUMNS;
use crate::tile;

/// Seconds on the clock at the start of a round and after every accepted press.
pub const INITIAL_TIME: u32 = 15;
/// Seconds shown before a round starts.
pub const TIME_TO_START: u32 = 3;
pub const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    WaitingToStart,
    Playing,
    GameOver,
    Finished,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Finished)
    }
}

/// Events the screen sends back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    LetterPressed(Letter),
    RestartRequested,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKey {
    StartCountdown,
    Round,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerSnapshot {
    pub status: GameStatus,
    pub game_time: u32,
    pub start_countdown: u32,
    pub selected: usize,
}

pub struct Controller {
    status: GameStatus,
    selection: SelectionState,
    game_time: u32,
    start_countdown: u32,
    timers: Scheduler<TimerKey>,
    cue: Box<dyn TickCue>,
    columns: u32,
    container_height: Option<u32>,
    torn_down: bool,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("status", &self.status)
            .field("selection", &self.selection)
            .field("game_time", &self.game_time)
            .field("start_countdown", &self.start_countdown)
            .field("timers", &self.timers)
            .field("columns", &self.columns)
            .field("container_height", &self.container_height)
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl Controller {
    pub fn new(cue: Box<dyn TickCue>) -> Self {
        Self::with_columns(cue, DEFAULT_COLUMNS)
    }

    pub fn with_columns(cue: Box<dyn TickCue>, columns: u32) -> Self {
        let mut timers = Scheduler::new();
        timers.arm(TimerKey::StartCountdown, TICK);
        Self {
            status: GameStatus::WaitingToStart,
            selection: SelectionState::new(),
            game_time: INITIAL_TIME,
            start_countdown: TIME_TO_START,
            timers,
            cue,
            columns: columns.max(1),
            container_height: None,
            torn_down: false,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn is_selected(&self, letter: Letter) -> bool {
        self.selection.is_selected(letter)
    }

    pub fn game_time(&self) -> u32 {
        self.game_time
    }

    pub fn start_countdown(&self) -> u32 {
        self.start_countdown
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn active_timer(&self, key: TimerKey) -> Option<TimerId> {
        self.timers.active_id(key)
    }

    pub fn armed_timers(&self) -> usize {
        self.timers.armed_count()
    }

    /// Virtual time since the controller was created.
    pub fn clock(&self) -> Duration {
        self.timers.now()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn visor(&self) -> Visor {
        display::visor(self.status, self.game_time, self.start_countdown)
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            status: self.status,
            game_time: self.game_time,
            start_countdown: self.start_countdown,
            selected: self.selection.len(),
        }
    }

    /// Records the measured height of the letters container.
    pub fn measure_container(&mut self, height: u32) {
        if self.container_height != Some(height) {
            debug!(height, "letters container measured");
            self.container_height = Some(height);
        }
    }

    /// Per-tile height once the container has been measured, `None` before layout.
    pub fn tile_height(&self) -> Option<u32> {
        self.container_height
            .map(|h| tile::tile_height(h, self.columns))
    }

    /// Applies one action. Returns whether it changed anything.
    pub fn dispatch(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::LetterPressed(letter) => self.press(letter),
            GameAction::RestartRequested => self.restart(),
        }
    }

    /// Applies `actions` in order, then lets `dt` pass. Presses are therefore accepted before
    /// any timer that falls due within the same update.
    pub fn update(&mut self, actions: &[GameAction], dt: Duration) {
        for action in actions {
            self.dispatch(*action);
        }
        self.advance(dt);
    }

    /// Lets `dt` of time pass, reacting to each timer firing in chronological order.
    pub fn advance(&mut self, dt: Duration) {
        if self.torn_down {
            return;
        }
        let until = self.timers.now().saturating_add(dt);
        while let Some(firing) = self.timers.next_due(until) {
            self.on_timer(firing);
        }
        self.timers.settle(until);
    }

    /// Selects `letter` and refreshes the round clock.
    ///
    /// Ignored outside `Playing` and for letters that are already selected.
    pub fn press(&mut self, letter: Letter) -> bool {
        if self.torn_down || self.status != GameStatus::Playing {
            debug!(%letter, status = ?self.status, "press ignored");
            return false;
        }
        if !self.selection.select(letter) {
            return false;
        }
        debug!(%letter, selected = self.selection.len(), "letter selected");
        self.restart_round_timer();
        self.check_complete();
        true
    }

    /// Goes back to `WaitingToStart` from a terminal state.
    pub fn restart(&mut self) -> bool {
        if self.torn_down || !self.status.is_terminal() {
            return false;
        }
        self.timers.cancel(TimerKey::Round);
        self.start_countdown = TIME_TO_START;
        self.status = GameStatus::WaitingToStart;
        self.timers.arm(TimerKey::StartCountdown, TICK);
        info!("restart requested, waiting to start");
        true
    }

    /// Cancels every timer. Nothing fires afterwards and further input is ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.timers.cancel_all();
        self.torn_down = true;
        debug!("controller torn down");
    }

    fn on_timer(&mut self, firing: Firing<TimerKey>) {
        match firing.key {
            TimerKey::StartCountdown => self.start_tick(),
            TimerKey::Round => self.round_tick(),
        }
    }

    fn start_tick(&mut self) {
        if self.start_countdown > 0 {
            self.start_countdown -= 1;
            return;
        }
        self.timers.cancel(TimerKey::StartCountdown);
        self.selection.clear();
        self.start_countdown = TIME_TO_START;
        self.status = GameStatus::Playing;
        self.restart_round_timer();
        info!("round started");
    }

    fn round_tick(&mut self) {
        self.game_time = self.game_time.saturating_sub(1);
        if self.game_time == 0 {
            self.timers.cancel(TimerKey::Round);
            self.status = GameStatus::GameOver;
            info!(selected = self.selection.len(), "time is up");
        } else {
            self.cue.play();
        }
    }

    fn restart_round_timer(&mut self) {
        self.game_time = INITIAL_TIME;
        self.timers.arm(TimerKey::Round, TICK);
    }

    // Only a press grows the selection, so this runs after each accepted press.
    fn check_complete(&mut self) {
        if !self.selection.is_complete() {
            return;
        }
        if self.status == GameStatus::Playing {
            self.timers.cancel(TimerKey::Round);
            self.status = GameStatus::Finished;
            info!(time_left = self.game_time, "all letters selected");
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl Simulation for Controller {
    type Action = GameAction;
    type Snapshot = ControllerSnapshot;

    fn apply(&mut self, actions: &[GameAction], dt: Duration) {
        self.update(actions, dt);
    }

    fn snapshot(&self) -> ControllerSnapshot {
        Controller::snapshot(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::letters::LETTERS;
    use crate::sfx::SilentCue;

    fn playing() -> Controller {
        let mut c = Controller::new(Box::new(SilentCue));
        c.advance(TICK * 4);
        assert_eq!(c.status(), GameStatus::Playing);
        c
    }

    #[test]
    fn only_one_timer_runs_at_a_time() {
        let mut c = Controller::new(Box::new(SilentCue));
        assert!(c.active_timer(TimerKey::StartCountdown).is_some());
        assert!(c.active_timer(TimerKey::Round).is_none());

        c.advance(TICK * 4);
        assert!(c.active_timer(TimerKey::StartCountdown).is_none());
        assert!(c.active_timer(TimerKey::Round).is_some());
        assert_eq!(c.armed_timers(), 1);
    }

    #[test]
    fn press_rearms_round_timer_with_new_id() {
        let mut c = playing();
        let before = c.active_timer(TimerKey::Round);
        assert!(c.press(LETTERS[0]));
        let after = c.active_timer(TimerKey::Round);
        assert!(after.is_some());
        assert_ne!(before, after);
        assert_eq!(c.armed_timers(), 1);
    }

    #[test]
    fn repeated_press_does_not_refresh_clock() {
        let mut c = playing();
        c.press(LETTERS[1]);
        c.advance(TICK * 3);
        assert_eq!(c.game_time(), 12);

        assert!(!c.press(LETTERS[1]));
        assert_eq!(c.game_time(), 12);
    }

    #[test]
    fn restart_is_ignored_while_playing() {
        let mut c = playing();
        assert!(!c.restart());
        assert_eq!(c.status(), GameStatus::Playing);
    }

    #[test]
    fn last_press_finishes_and_the_round_clock_never_fires_again() {
        let mut c = playing();
        for letter in LETTERS {
            assert!(c.press(letter));
        }
        assert_eq!(c.status(), GameStatus::Finished);
        assert!(c.active_timer(TimerKey::Round).is_none());

        c.advance(TICK * (INITIAL_TIME + 5));
        assert_eq!(c.status(), GameStatus::Finished);
        assert_eq!(c.game_time(), INITIAL_TIME);
    }

    #[test]
    fn drop_after_teardown_is_harmless() {
        let mut c = playing();
        c.teardown();
        c.teardown();
        assert_eq!(c.armed_timers(), 0);
        drop(c);
    }
}
