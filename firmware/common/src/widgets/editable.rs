//! Editable values: label, value, units and the edit cursor.
//!
//! Editables are visited on every pass. The layout caches the last value it
//! drew (`old_editable`), so a pass where the value, blink phase and label
//! mode are unchanged draws nothing. A change in the formatted length clears
//! the whole box first, since the alignment of the new string may differ.

use embedded_graphics::prelude::*;

use crate::buttons::Buttons;
use crate::colors::{CURSOR_COLOR, LABEL_COLOR};
use crate::field::{FieldId, FieldText};
use crate::layout::{AlignX, AlignY, FieldLayout};
use crate::render::RenderPass;
use crate::widgets::{Pen, put_aligned, put_centered};

impl RenderPass<'_, '_> {
    pub(crate) fn render_editable(
        &mut self,
        layout: &mut FieldLayout,
        id: FieldId,
        parent: Option<FieldId>,
    ) -> bool {
        let fonts = self.cx.fonts;
        let font = layout.font.unwrap_or(fonts.value);
        let label_h = fonts.label.character_size.height as i32;
        let value_h = font.character_size.height as i32;

        let is_active = self.cx.edit.is_active(id);
        let is_customizing = parent.is_some() && self.cx.customize.current() == parent;
        let show_label = layout.label_align_x != AlignX::Hidden;
        let label_at_top = layout.label_align_y == AlignY::Top;
        let two_rows = show_label && self.cx.profile.editable_rows == 2;

        if layout.height == -1 {
            let label_rows = if two_rows || label_at_top { label_h } else { 0 };
            layout.height = label_rows + value_h;
        }

        let blink_changed = self.cx.blink.changed();
        let blink_on = self.cx.blink.is_on();
        let units = self.cx.units;

        // press-and-hold repeat, polled once per blink phase
        if is_active && blink_changed && self.fields[id].as_editable().is_some_and(|e| !e.read_only) {
            if self.cx.held.contains(Buttons::UP) {
                self.cx.edit.hold_step(self.fields, units, true);
            }
            if self.cx.held.contains(Buttons::DOWN) {
                self.cx.edit.hold_step(self.fields, units, false);
            }
        }

        let field = &self.fields[id];
        let Some(editable) = field.as_editable() else {
            unreachable!("render_editable on a non-editable field");
        };

        let num = if is_active { self.cx.edit.value() } else { editable.display_value(units) };
        let mut dirty = field.dirty;
        // the slot blink drives redraws while customizing
        let value_changed = layout.old_editable != Some(num) && !is_customizing;
        let need_blink = blink_changed && (is_active || field.is_selected || is_customizing);
        let force_labels = self.cx.force_labels;
        let labels_changed = force_labels != self.cx.old_force_labels;

        let show_value = !force_labels && (value_changed || dirty || need_blink || labels_changed);
        let mut value_str = FieldText::new();
        if show_value {
            value_str = editable.format_value(num);
            let old_len = layout.old_editable.map_or(0, |old| editable.format_value(old).len());
            if value_str.len() != old_len {
                dirty = true;
            }
            layout.old_editable = Some(num);
        }

        if !dirty && !value_changed && !labels_changed && !need_blink {
            return false;
        }

        let back = layout.color.back();
        let fore = layout.color.fore();
        let blank_all =
            self.cx.profile.blank_all_editables || labels_changed || dirty || (is_customizing && need_blink);
        if blank_all {
            self.canvas.fill_rect(layout.bounds(), back);
        }
        // opaque glyphs overwrite the previous value when the box was not cleared
        let text_bg = if blank_all { None } else { Some(back) };

        // a customized slot alternates its content with blank space, or its
        // name with blank space when the label is hidden
        let mut show_only_label = force_labels;
        if is_customizing && need_blink {
            show_only_label |= !show_label;
            if !blink_on {
                return true;
            }
        }

        if show_only_label {
            put_centered(
                self.canvas,
                layout.x,
                layout.y + (layout.height - label_h) / 2,
                layout.width,
                Pen::new(fonts.label, fore).background(text_bg),
                editable.label,
            );
            return true;
        }

        if show_label {
            put_aligned(
                self.canvas,
                layout,
                (layout.label_align_x, layout.label_align_y),
                Point::zero(),
                Pen::new(fonts.label, LABEL_COLOR),
                editable.label,
            );
        }

        if show_value {
            let mut inset = Point::new(layout.inset_x, layout.inset_y);
            let mut align_y = layout.align_y;
            if show_label && label_at_top {
                inset.y += label_h;
                align_y = AlignY::Top;
            } else if two_rows {
                inset.y += label_h;
            }

            let pen = Pen::new(font, fore).background(text_bg);
            if let Some(pos) = put_aligned(self.canvas, layout, (layout.align_x, align_y), inset, pen, &value_str)
                && is_active
            {
                let y = pos.y + value_h + 1;
                let color = if blink_on { CURSOR_COLOR } else { back };
                self.canvas.draw_line(
                    Point::new(pos.x - 1, y),
                    Point::new(layout.x + layout.width - 1, y),
                    color,
                );
            }
        }

        if editable.is_number() && !show_label {
            let unit_str = editable.display_units(units);
            if !unit_str.is_empty() {
                put_aligned(
                    self.canvas,
                    layout,
                    (layout.unit_align_x, layout.unit_align_y),
                    Point::zero(),
                    Pen::new(fonts.units, fore),
                    unit_str,
                );
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicU16, Ordering};

    use super::*;
    use crate::colors::WHITE;
    use crate::config::{BLINK_TICKS, SW102};
    use crate::field::{Field, FieldArena, NumberFormat};
    use crate::render::UiContext;
    use crate::testing::RecordingCanvas;

    fn pass<'r, 'a>(
        fields: &'r mut FieldArena<'a>,
        cx: &'r mut UiContext,
        canvas: &'r mut RecordingCanvas,
    ) -> RenderPass<'r, 'a> {
        RenderPass { fields, cx, canvas }
    }

    #[test]
    fn test_unchanged_value_skips_draw() {
        static SPEED: AtomicU16 = AtomicU16::new(25);
        let mut fields = FieldArena::new();
        let id = fields.add(Field::readonly_number("speed", &SPEED, NumberFormat::new("kph"))).unwrap();
        let mut layouts = [FieldLayout::new(id).at(0, 0).size(64, -1).hide_label()];
        let mut cx = UiContext::new(&SW102);
        let mut canvas = RecordingCanvas::new(SW102.size());

        let mut p = pass(&mut fields, &mut cx, &mut canvas);
        assert!(p.render_layouts(&mut layouts, true));
        assert_eq!(layouts[0].height, 10);
        assert!(!p.render_layouts(&mut layouts, false));
        assert!(!p.render_layouts(&mut layouts, false));

        SPEED.store(30, Ordering::Relaxed);
        assert!(p.render_layouts(&mut layouts, false));
        assert_eq!(layouts[0].old_editable, Some(30));
        assert!(!p.render_layouts(&mut layouts, false));
    }

    #[test]
    fn test_label_on_top_pushes_value_down() {
        static TEMP: AtomicU16 = AtomicU16::new(42);
        let mut fields = FieldArena::new();
        let id = fields.add(Field::readonly_number("motor", &TEMP, NumberFormat::new("C"))).unwrap();
        let mut layouts = [FieldLayout::new(id).at(0, 0).size(64, -1).label_align(AlignX::Left, AlignY::Top)];
        let mut cx = UiContext::new(&SW102);
        let mut canvas = RecordingCanvas::new(SW102.size());

        pass(&mut fields, &mut cx, &mut canvas).render_layouts(&mut layouts, true);

        // 8px label row over a 10px value row
        assert_eq!(layouts[0].height, 18);
        assert!(canvas.any_in(0, 0, 64, 8, LABEL_COLOR));
        assert!(canvas.any_in(0, 8, 64, 10, WHITE));
        assert!(!canvas.any_in(0, 8, 64, 10, LABEL_COLOR));
    }

    #[test]
    fn test_held_button_repeats_on_blink_flip() {
        static LIMIT: AtomicU16 = AtomicU16::new(50);
        let mut fields = FieldArena::new();
        let id = fields
            .add(Field::number("limit", &LIMIT, NumberFormat::new("kph").range(0, 100).step(5)))
            .unwrap();
        let mut layouts = [FieldLayout::new(id).at(0, 0).size(64, -1).hide_label()];
        let mut cx = UiContext::new(&SW102);
        let mut canvas = RecordingCanvas::new(SW102.size());

        cx.edit.begin(&mut fields, id, cx.units);
        cx.held = Buttons::UP;
        let mut p = pass(&mut fields, &mut cx, &mut canvas);
        for _ in 0..BLINK_TICKS - 1 {
            p.cx.blink.tick();
            p.render_layouts(&mut layouts, false);
        }
        assert_eq!(p.cx.edit.value(), 50);

        p.cx.blink.tick();
        assert!(p.render_layouts(&mut layouts, false));
        assert_eq!(p.cx.edit.value(), 55);
        // not committed until editing ends
        assert_eq!(LIMIT.load(Ordering::Relaxed), 50);
    }

    #[test]
    fn test_cursor_blinks_under_active_value() {
        static LIMIT: AtomicU16 = AtomicU16::new(7);
        let mut fields = FieldArena::new();
        let id = fields.add(Field::number("limit", &LIMIT, NumberFormat::new(""))).unwrap();
        let mut layouts = [FieldLayout::new(id).at(0, 0).size(64, -1).hide_label()];
        let mut cx = UiContext::new(&SW102);
        let mut canvas = RecordingCanvas::new(SW102.size());

        cx.edit.begin(&mut fields, id, cx.units);
        pass(&mut fields, &mut cx, &mut canvas).render_layouts(&mut layouts, false);
        // cursor row sits one pixel below the 10px value
        assert!(!canvas.any_in(0, 11, 64, 1, CURSOR_COLOR));

        for _ in 0..BLINK_TICKS {
            cx.blink.tick();
            pass(&mut fields, &mut cx, &mut canvas).render_layouts(&mut layouts, false);
        }
        assert!(cx.blink.is_on());
        assert!(canvas.any_in(0, 11, 64, 1, CURSOR_COLOR));
    }

    #[test]
    fn test_forced_labels_replace_value() {
        static ASSIST: AtomicU16 = AtomicU16::new(3);
        let mut fields = FieldArena::new();
        let id = fields.add(Field::readonly_number("assist", &ASSIST, NumberFormat::new(""))).unwrap();
        let mut layouts = [FieldLayout::new(id).at(0, 0).size(64, -1).hide_label()];
        let mut cx = UiContext::new(&SW102);
        let mut canvas = RecordingCanvas::new(SW102.size());

        let mut p = pass(&mut fields, &mut cx, &mut canvas);
        p.render_layouts(&mut layouts, true);
        assert!(!p.render_layouts(&mut layouts, false));

        p.cx.held = SW102.show_labels;
        assert!(p.render_layouts(&mut layouts, false));
        assert!(p.cx.force_labels);
        assert!(!p.render_layouts(&mut layouts, false));

        // letting go restores the value
        p.cx.held = Buttons::empty();
        assert!(p.render_layouts(&mut layouts, false));
        assert!(!p.cx.force_labels);
    }
}
