//! Text, fill and custom fields.

use crate::field::{FieldId, FieldKind};
use crate::layout::FieldLayout;
use crate::render::{CustomCx, RenderPass};
use crate::widgets::draw_text_common;

impl RenderPass<'_, '_> {
    pub(crate) fn render_text(
        &mut self,
        layout: &mut FieldLayout,
        id: FieldId,
    ) -> bool {
        let field = &self.fields[id];
        let hidden = field.blink && !self.cx.blink.is_on();
        let text: &str = match &field.kind {
            FieldKind::DrawText(text) => text,
            FieldKind::DrawTextPtr(text) => text,
            _ => unreachable!("render_text on a non-text field"),
        };
        draw_text_common(self.canvas, layout, text, hidden)
    }

    /// Solid or checkerboard fill in the foreground color.
    pub(crate) fn render_fill(
        &mut self,
        layout: &mut FieldLayout,
        mesh: bool,
    ) -> bool {
        assert!(layout.width >= 1 && layout.height >= 1, "fill needs a non-empty box");
        let color = layout.color.fore();
        if mesh {
            self.canvas.draw_mesh(layout.bounds(), color);
        } else {
            self.canvas.fill_rect(layout.bounds(), color);
        }
        true
    }

    pub(crate) fn render_custom(
        &mut self,
        layout: &mut FieldLayout,
        id: FieldId,
    ) -> bool {
        let field = &self.fields[id];
        let FieldKind::Custom(renderer) = field.kind else {
            unreachable!("render_custom on a non-custom field");
        };
        let mut cx = CustomCx {
            canvas: &mut *self.canvas,
            layout,
            dirty: field.dirty,
            blink: field.blink,
            blink_on: self.cx.blink.is_on(),
        };
        renderer.render(&mut cx)
    }
}
