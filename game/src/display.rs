use serde::Serialize;

use crate::controller::GameStatus;

/// Below this many seconds the countdown turns red.
pub const ALERT_THRESHOLD_SECS: u32 = 10;

pub const GAME_OVER_MESSAGE: &str = "YOU LOST!";
pub const FINISHED_MESSAGE: &str = "ALL DONE!";
pub const RESTART_LABEL: &str = "PLAY AGAIN";

/// What the top of the screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visor {
    pub text: String,
    pub alert: bool,
    pub show_restart: bool,
}

/// `MM:SS`, zero padded.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn visor(status: GameStatus, game_time: u32, start_countdown: u32) -> Visor {
    let text = match status {
        GameStatus::WaitingToStart => {
            return Visor {
                text: format!("STARTING IN\n{}...", format_time(start_countdown)),
                alert: false,
                show_restart: false,
            };
        }
        GameStatus::Playing => format_time(game_time),
        GameStatus::GameOver => GAME_OVER_MESSAGE.to_string(),
        GameStatus::Finished => FINISHED_MESSAGE.to_string(),
    };
    Visor {
        text,
        alert: game_time < ALERT_THRESHOLD_SECS,
        show_restart: status.is_terminal(),
    }
}
