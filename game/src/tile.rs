use engine::graphics::{BLACK, Color, text_size};
use engine::ui::{Insets, Rect, Size};
use engine::view_tree::{ButtonNode, ViewNode};

use crate::controller::GameAction;
use crate::letters::{LETTER_COUNT, Letter};

pub const LABEL_SCALE: u32 = 4;
pub const LABEL_PADDING: u32 = 8;

pub const ENABLED_FILL: Color = [0xff, 0xff, 0xff, 255];
pub const DISABLED_FILL: Color = [0xcc, 0xcc, 0xcc, 255];
pub const BORDER: Color = [0x99, 0x99, 0x99, 255];
pub const LABEL_COLOR: Color = BLACK;

/// Button ids for tiles are `TILE_ID_BASE + letter index`.
pub const TILE_ID_BASE: u32 = 1000;

/// A single letter button. Pure data: what it looks like follows from its fields alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterTile {
    pub letter: Letter,
    pub disabled: bool,
    pub width: u32,
    /// `None` until the container has been measured; the tile then sizes to its label.
    pub height: Option<u32>,
}

impl LetterTile {
    pub fn new(letter: Letter, disabled: bool, width: u32, height: Option<u32>) -> Self {
        Self {
            letter,
            disabled,
            width,
            height,
        }
    }

    /// Height of a tile that only wraps its label.
    pub fn content_height() -> u32 {
        text_size("W", LABEL_SCALE)
            .grow(Insets::all(LABEL_PADDING))
            .h
    }

    pub fn size(&self) -> Size {
        Size::new(
            self.width,
            self.height.unwrap_or_else(Self::content_height),
        )
    }

    /// Reports a press to `on_press`. Disabled tiles accept nothing.
    pub fn press<F: FnOnce(Letter)>(&self, on_press: F) -> bool {
        if self.disabled {
            return false;
        }
        on_press(self.letter);
        true
    }

    pub fn id(&self) -> u32 {
        TILE_ID_BASE + self.letter.index() as u32
    }

    pub fn fill(&self) -> Color {
        if self.disabled {
            DISABLED_FILL
        } else {
            ENABLED_FILL
        }
    }

    pub fn node(&self, rect: Rect) -> ViewNode<GameAction> {
        ViewNode::Button(ButtonNode {
            id: self.id(),
            rect,
            label: self.letter.to_string(),
            label_scale: LABEL_SCALE,
            label_color: LABEL_COLOR,
            fill: self.fill(),
            border: Some(BORDER),
            action: GameAction::LetterPressed(self.letter),
            enabled: !self.disabled,
        })
    }
}

pub fn rows_for(columns: u32) -> u32 {
    (LETTER_COUNT as u32).div_ceil(columns.max(1))
}

/// Uniform tile height for a measured container: `container / ceil(26 / columns)`.
pub fn tile_height(container_height: u32, columns: u32) -> u32 {
    container_height / rows_for(columns)
}
