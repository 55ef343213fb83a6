use engine::graphics::{CpuRenderer, SurfaceSize};
use engine::render::draw_view;
use engine::view_tree::{UiInput, ViewTree, hit_test};

use letter_rush::controller::{Controller, GameAction, GameStatus, TICK, TIME_TO_START};
use letter_rush::display::{FINISHED_MESSAGE, RESTART_LABEL};
use letter_rush::letters::LETTERS;
use letter_rush::sfx::SilentCue;
use letter_rush::tile::{DISABLED_FILL, ENABLED_FILL, LetterTile, TILE_ID_BASE};
use letter_rush::view::{
    ALERT_COLOR, BACKGROUND, RESTART_BUTTON_ID, build_view, screen_layout, typed_actions,
};

const SIZE: SurfaceSize = SurfaceSize::new(480, 800);

fn playing_controller() -> Controller {
    let mut c = Controller::new(Box::new(SilentCue));
    c.measure_container(screen_layout(SIZE).letters.h);
    c.advance(TICK * (TIME_TO_START + 1));
    assert_eq!(c.status(), GameStatus::Playing);
    c
}

fn click_center(view: &ViewTree<GameAction>, id: u32) -> Option<GameAction> {
    let button = view.button(id).expect("button should be in the view");
    let input = UiInput {
        mouse_pos: Some((
            button.rect.x + button.rect.w / 2,
            button.rect.y + button.rect.h / 2,
        )),
        mouse_up: true,
    };
    hit_test(view, input)
}

fn render(view: &ViewTree<GameAction>) -> Vec<u8> {
    let mut frame = vec![0u8; SIZE.rgba_len()];
    let mut gfx = CpuRenderer::new(&mut frame, SIZE);
    draw_view(&mut gfx, view);
    frame
}

fn pixel(frame: &[u8], x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * SIZE.width + x) * 4) as usize;
    let mut px = [0u8; 4];
    px.copy_from_slice(&frame[idx..idx + 4]);
    px
}

#[test]
fn waiting_screen_is_only_the_start_message() {
    let c = Controller::new(Box::new(SilentCue));
    let view = build_view(&c, SIZE);

    assert_eq!(view.buttons().count(), 0);
    let texts: Vec<&str> = view.texts().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["STARTING IN\n00:03..."]);
}

#[test]
fn playing_screen_has_26_tiles_in_four_columns_filling_the_container() {
    let c = playing_controller();
    let view = build_view(&c, SIZE);
    let layout = screen_layout(SIZE);

    let tiles: Vec<_> = view.buttons().filter(|b| b.id >= TILE_ID_BASE).collect();
    assert_eq!(tiles.len(), 26);
    assert!(view.button(RESTART_BUTTON_ID).is_none());

    let expected_h = layout.letters.h / 7;
    for tile in &tiles {
        assert_eq!(tile.rect.w, SIZE.width / 4);
        assert_eq!(tile.rect.h, expected_h);
        assert!(tile.rect.y >= layout.letters.y);
        assert!(tile.rect.y + tile.rect.h <= layout.letters.y + layout.letters.h);
    }

    // Y and Z share the last row, centered.
    let y = view.button(TILE_ID_BASE + 24).expect("tile Y");
    let z = view.button(TILE_ID_BASE + 25).expect("tile Z");
    assert_eq!(y.rect.y, z.rect.y);
    assert_eq!(y.rect.x, (SIZE.width - 2 * y.rect.w) / 2);
}

#[test]
fn unmeasured_container_sizes_tiles_to_their_label() {
    let mut c = Controller::new(Box::new(SilentCue));
    c.advance(TICK * (TIME_TO_START + 1));
    let view = build_view(&c, SIZE);

    let a = view.button(TILE_ID_BASE).expect("tile A");
    assert_eq!(a.rect.h, LetterTile::content_height());
}

#[test]
fn clicking_a_tile_presses_it_once_and_disables_it() {
    let mut c = playing_controller();
    let view = build_view(&c, SIZE);
    let action = click_center(&view, TILE_ID_BASE + 2);
    assert_eq!(action, Some(GameAction::LetterPressed(LETTERS[2])));

    c.update(&[GameAction::LetterPressed(LETTERS[2])], TICK);

    let view = build_view(&c, SIZE);
    let tile = view.button(TILE_ID_BASE + 2).expect("tile C");
    assert!(!tile.enabled);
    assert_eq!(tile.fill, DISABLED_FILL);
    assert_eq!(click_center(&view, TILE_ID_BASE + 2), None);
}

#[test]
fn restart_button_only_in_terminal_states() {
    let mut c = playing_controller();
    for letter in LETTERS {
        c.press(letter);
    }
    assert_eq!(c.status(), GameStatus::Finished);

    let view = build_view(&c, SIZE);
    let restart = view.button(RESTART_BUTTON_ID).expect("restart button");
    assert_eq!(restart.label, RESTART_LABEL);
    assert!(view.texts().any(|t| t.text == FINISHED_MESSAGE));
    assert_eq!(
        click_center(&view, RESTART_BUTTON_ID),
        Some(GameAction::RestartRequested)
    );

    c.update(&[GameAction::RestartRequested], std::time::Duration::ZERO);
    let view = build_view(&c, SIZE);
    assert!(view.button(RESTART_BUTTON_ID).is_none());
}

#[test]
fn rendering_paints_tiles_by_state_and_alert_countdown_red() {
    let mut c = playing_controller();
    c.press(LETTERS[0]);
    let view = build_view(&c, SIZE);
    let frame = render(&view);

    let a = view.button(TILE_ID_BASE).expect("tile A").rect;
    let b = view.button(TILE_ID_BASE + 1).expect("tile B").rect;
    // Sample just inside the border, away from the label.
    assert_eq!(pixel(&frame, a.x + 3, a.y + 3), DISABLED_FILL);
    assert_eq!(pixel(&frame, b.x + 3, b.y + 3), ENABLED_FILL);
    assert_eq!(pixel(&frame, 1, 1), BACKGROUND);

    let has_alert_pixels = |frame: &[u8]| {
        frame
            .chunks_exact(4)
            .any(|px| px == ALERT_COLOR.as_slice())
    };
    assert!(!has_alert_pixels(&frame), "15 seconds left is not urgent");

    c.advance(TICK * 6);
    assert_eq!(c.game_time(), 9);
    let frame = render(&build_view(&c, SIZE));
    assert!(has_alert_pixels(&frame), "countdown below 10 is drawn in red");
}

#[test]
fn typed_letters_and_enter_map_to_actions() {
    let actions = typed_actions(&['a', 'Z', '3', '\r', ' ']);
    assert_eq!(
        actions,
        vec![
            GameAction::LetterPressed(LETTERS[0]),
            GameAction::LetterPressed(LETTERS[25]),
            GameAction::RestartRequested,
            GameAction::RestartRequested,
        ]
    );
}

#[test]
fn view_serializes_for_debug_dumps() {
    let c = playing_controller();
    let json = serde_json::to_string(&build_view(&c, SIZE)).expect("serialize view");
    assert!(json.contains("LetterPressed"));
}
