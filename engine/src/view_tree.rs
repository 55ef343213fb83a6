use serde::{Deserialize, Serialize};

use crate::graphics::Color;
use crate::ui::Rect;

/// Flat, ordered description of one screen. Later nodes draw on top of earlier ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewTree<A> {
    pub background: Color,
    pub nodes: Vec<ViewNode<A>>,
}

impl<A> ViewTree<A> {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            nodes: Vec::new(),
        }
    }

    pub fn push(&mut self, node: ViewNode<A>) {
        self.nodes.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn buttons(&self) -> impl Iterator<Item = &ButtonNode<A>> {
        self.nodes.iter().filter_map(|node| match node {
            ViewNode::Button(button) => Some(button),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextNode> {
        self.nodes.iter().filter_map(|node| match node {
            ViewNode::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn button(&self, id: u32) -> Option<&ButtonNode<A>> {
        self.buttons().find(|b| b.id == id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ViewNode<A> {
    Button(ButtonNode<A>),
    Text(TextNode),
    Rect(RectNode),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonNode<A> {
    pub id: u32,
    pub rect: Rect,
    pub label: String,
    pub label_scale: u32,
    pub label_color: Color,
    pub fill: Color,
    pub border: Option<Color>,
    pub action: A,
    pub enabled: bool,
}

/// Text centered inside `rect`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextNode {
    pub rect: Rect,
    pub text: String,
    pub color: Color,
    pub scale: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectNode {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiInput {
    pub mouse_pos: Option<(u32, u32)>,
    pub mouse_up: bool,
}

/// Resolves a click to the action of the topmost button under the cursor.
///
/// A disabled button still takes the click and yields nothing; buttons beneath it never see it.
/// A click is the release of the mouse button, so one press yields at most one action.
pub fn hit_test<A: Clone>(view: &ViewTree<A>, input: UiInput) -> Option<A> {
    if !input.mouse_up {
        return None;
    }
    let (mx, my) = input.mouse_pos?;
    view.nodes
        .iter()
        .rev()
        .find_map(|node| match node {
            ViewNode::Button(button) if button.rect.contains(mx, my) => Some(button),
            _ => None,
        })
        .filter(|button| button.enabled)
        .map(|button| button.action.clone())
}
