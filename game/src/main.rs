use std::time::Duration;

use engine::app::{AppConfig, AppContext, AppError, GameApp, run_game};
use engine::graphics::SurfaceSize;
use engine::view_tree::ViewTree;
use tracing::info;
use tracing_subscriber::EnvFilter;
use winit::dpi::PhysicalSize;

use letter_rush::controller::{Controller, GameAction};
use letter_rush::settings::{GameSettings, SettingsStore};
use letter_rush::sfx::cue_from_settings;
use letter_rush::view::{build_view, screen_layout, typed_actions};

struct LetterRushApp {
    settings: GameSettings,
}

impl GameApp for LetterRushApp {
    type State = Controller;
    type Action = GameAction;

    fn init_state(&mut self, _ctx: &mut AppContext) -> Controller {
        let cue = cue_from_settings(&self.settings.audio);
        Controller::with_columns(cue, self.settings.layout.columns)
    }

    fn build_view(&self, state: &Controller, size: SurfaceSize) -> ViewTree<GameAction> {
        build_view(state, size)
    }

    fn typed_actions(&self, typed: &[char]) -> Vec<GameAction> {
        typed_actions(typed)
    }

    fn on_resize(&mut self, state: &mut Controller, size: SurfaceSize) {
        state.measure_container(screen_layout(size).letters.h);
    }

    fn update_state(&mut self, state: &mut Controller, actions: &[GameAction], dt: Duration) {
        state.update(actions, dt);
    }

    fn shutdown(&mut self, state: &mut Controller) {
        state.teardown();
    }
}

fn main() -> Result<(), AppError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = SettingsStore::from_env();
    let settings = store.load();
    info!(path = %store.path().display(), columns = settings.layout.columns, "settings loaded");

    let config = AppConfig {
        title: "Letter Rush".to_string(),
        desired_size: PhysicalSize::new(settings.window.width, settings.window.height),
        clamp_to_monitor: true,
        vsync: true,
    };
    run_game(config, LetterRushApp { settings })
}
