use crate::graphics::Renderer2d;
use crate::ui::Insets;
use crate::view_tree::{ButtonNode, ViewNode, ViewTree};

/// Paints every node of `view` in order over its background.
pub fn draw_view<A>(gfx: &mut dyn Renderer2d, view: &ViewTree<A>) {
    gfx.clear(view.background);
    for node in &view.nodes {
        match node {
            ViewNode::Rect(rect) => gfx.fill_rect(rect.rect, rect.color),
            ViewNode::Text(text) => {
                gfx.draw_text_centered(text.rect, &text.text, text.color, text.scale)
            }
            ViewNode::Button(button) => draw_button(gfx, button),
        }
    }
}

pub fn draw_button<A>(gfx: &mut dyn Renderer2d, button: &ButtonNode<A>) {
    let body = match button.border {
        Some(border) => {
            gfx.fill_rect(button.rect, border);
            button.rect.inset(Insets::all(1))
        }
        None => button.rect,
    };
    gfx.fill_rect(body, button.fill);
    gfx.draw_text_centered(body, &button.label, button.label_color, button.label_scale);
}
