use engine::graphics::{BLACK, Color, SurfaceSize, WHITE, text_size};
use engine::ui::{Anchor, Insets, Rect, wrap_grid};
use engine::view_tree::{ButtonNode, TextNode, ViewNode, ViewTree};

use crate::controller::{Controller, GameAction, GameStatus};
use crate::display::RESTART_LABEL;
use crate::letters::{LETTERS, Letter};
use crate::tile::LetterTile;

pub const BACKGROUND: Color = [0xf2, 0xf2, 0xf2, 255];
pub const ALERT_COLOR: Color = [0xe0, 0x10, 0x10, 255];
pub const VISOR_TEXT_SCALE: u32 = 4;
pub const RESTART_FILL: Color = [0x21, 0x96, 0xf3, 255];
pub const RESTART_SCALE: u32 = 3;
pub const RESTART_BUTTON_ID: u32 = 1;

/// Regions of the playing screen: visor on top (1 part), letters below (3 parts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub visor: Rect,
    pub letters: Rect,
}

pub fn screen_layout(size: SurfaceSize) -> ScreenLayout {
    let (visor, letters) = size.rect().split_vertical(1, 3);
    ScreenLayout { visor, letters }
}

/// Builds the whole screen from the controller's current state.
pub fn build_view(controller: &Controller, size: SurfaceSize) -> ViewTree<GameAction> {
    let mut tree = ViewTree::new(BACKGROUND);
    let visor = controller.visor();

    if controller.status() == GameStatus::WaitingToStart {
        tree.push(ViewNode::Text(TextNode {
            rect: size.rect(),
            text: visor.text,
            color: BLACK,
            scale: VISOR_TEXT_SCALE,
        }));
        return tree;
    }

    let layout = screen_layout(size);
    let text_color = if visor.alert { ALERT_COLOR } else { BLACK };
    let (text_rect, button_area) = if visor.show_restart {
        layout.visor.split_vertical(3, 2)
    } else {
        (layout.visor, Rect::default())
    };
    tree.push(ViewNode::Text(TextNode {
        rect: text_rect,
        text: visor.text,
        color: text_color,
        scale: VISOR_TEXT_SCALE,
    }));
    if visor.show_restart {
        tree.push(restart_button(button_area));
    }

    let tile_w = layout.letters.w / controller.columns();
    let tile_h = controller.tile_height();
    let tiles: Vec<LetterTile> = LETTERS
        .iter()
        .map(|&letter| LetterTile::new(letter, controller.is_selected(letter), tile_w, tile_h))
        .collect();
    let cell = tiles
        .first()
        .map(LetterTile::size)
        .unwrap_or_default();
    let rects = wrap_grid(layout.letters, cell, tiles.len(), controller.columns());
    for (tile, rect) in tiles.iter().zip(rects) {
        tree.push(tile.node(rect));
    }

    tree
}

fn restart_button(area: Rect) -> ViewNode<GameAction> {
    let size = text_size(RESTART_LABEL, RESTART_SCALE).grow(Insets::symmetric(16, 10));
    ViewNode::Button(ButtonNode {
        id: RESTART_BUTTON_ID,
        rect: area.place(size, Anchor::TopCenter),
        label: RESTART_LABEL.to_string(),
        label_scale: RESTART_SCALE,
        label_color: WHITE,
        fill: RESTART_FILL,
        border: None,
        action: GameAction::RestartRequested,
        enabled: true,
    })
}

/// Keyboard play: letters press tiles, Enter or Space asks for a restart.
pub fn typed_actions(typed: &[char]) -> Vec<GameAction> {
    typed
        .iter()
        .filter_map(|&ch| match ch {
            '\r' | '\n' | ' ' => Some(GameAction::RestartRequested),
            _ => Letter::try_from(ch).ok().map(GameAction::LetterPressed),
        })
        .collect()
}
