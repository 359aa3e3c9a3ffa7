//! Scrollable menus.
//!
//! The expanded menu is a heading row plus one row per visible entry, laid
//! out into the navigator's row table only when the navigator asks for a
//! relayout. A scrollable that is itself an entry of the expanded menu
//! draws collapsed, as a single label row the user can select.

use core::mem;

use heapless::Vec;

use crate::config::{MAX_SCROLLABLE_ROWS, SCROLLABLE_VPAD};
use crate::field::{BLANK_ROW, FieldId, HEADING, MENU_LABEL};
use crate::layout::{AlignX, AlignY, ColorOp, FieldLayout};
use crate::render::RenderPass;

impl RenderPass<'_, '_> {
    pub(crate) fn render_scrollable(
        &mut self,
        layout: &mut FieldLayout,
        id: FieldId,
    ) -> bool {
        // the first scrollable drawn on a screen becomes the root
        if self.cx.nav.active().is_none() {
            self.cx.nav.enter(self.fields, id);
        }

        // the root's layout shows whichever menu is open innermost
        let shown = if self.cx.nav.root() == Some(id) {
            self.cx.nav.active().unwrap_or(id)
        } else {
            id
        };

        if self.cx.nav.active() == Some(shown) {
            self.render_expanded(layout, shown)
        } else {
            self.render_collapsed(layout, shown)
        }
    }

    fn render_expanded(
        &mut self,
        layout: &FieldLayout,
        id: FieldId,
    ) -> bool {
        let mut rows = mem::take(&mut self.cx.nav.rows);
        if self.cx.nav.take_relayout() {
            self.layout_rows(&mut rows, layout, id);
        }
        let drew = self.render_layouts(&mut rows, false);
        self.cx.nav.rows = rows;
        drew
    }

    fn layout_rows(
        &mut self,
        rows: &mut Vec<FieldLayout, MAX_SCROLLABLE_ROWS>,
        layout: &FieldLayout,
        id: FieldId,
    ) {
        let profile = self.cx.profile;
        let Some(menu) = self.fields[id].as_scrollable() else {
            unreachable!("expanded field is not a scrollable");
        };
        let (label, first, selected) = (menu.label, menu.first, menu.selected);
        let entries = menu.entries.clone();
        let count = self.fields.entry_count(id);

        for entry in &entries {
            let field = &mut self.fields[*entry];
            field.is_selected = false;
            field.blink = false;
        }

        rows.clear();

        self.fields.set_text(HEADING, format_args!("{label}"));
        self.fields[HEADING].dirty = true;
        let heading_h = profile.fonts.heading.character_size.height as i32 + SCROLLABLE_VPAD;
        let heading = FieldLayout::new(HEADING)
            .at(layout.x, layout.y)
            .size(layout.width, heading_h)
            .font(profile.fonts.heading)
            .color(ColorOp::Heading)
            .border(profile.heading_border);
        // Navigator::new keeps the row count within capacity
        rows.push(heading).ok();

        let row_h = profile.scrollable_row_height();
        let label_y = if profile.editable_rows == 1 { AlignY::Center } else { AlignY::Top };
        let mut y = layout.y + heading_h;
        for i in 0..self.cx.nav.visible_rows() {
            let n = first + i;
            let mut row = FieldLayout::new(BLANK_ROW)
                .at(layout.x, y)
                .size(layout.width, row_h)
                .label_align(AlignX::Left, label_y)
                .align(AlignX::Right, AlignY::Center)
                .inset(profile.cursor.width as i32, 0);

            if n < count {
                let entry = entries[n];
                let field = &mut self.fields[entry];
                field.dirty = true;
                field.is_selected = n == selected;
                field.blink = field.is_selected;
                row.field = entry;
            } else {
                row.color = ColorOp::Invert;
                self.fields[BLANK_ROW].dirty = true;
            }

            rows.push(row).ok();
            y += row_h;
        }
    }

    fn render_collapsed(
        &mut self,
        layout: &FieldLayout,
        id: FieldId,
    ) -> bool {
        let Some(menu) = self.fields[id].as_scrollable() else {
            unreachable!("collapsed field is not a scrollable");
        };
        let label = menu.label;
        let selected = self.cx.nav.active().and_then(|open| self.fields.selected_entry(open)) == Some(id);
        let entry_dirty = self.fields[id].dirty;

        self.fields.set_text(MENU_LABEL, format_args!("{label}"));
        let menu_label = &mut self.fields[MENU_LABEL];
        menu_label.is_selected = selected;
        menu_label.dirty |= entry_dirty;

        let mut row = [FieldLayout::new(MENU_LABEL)
            .at(layout.x, layout.y)
            .size(layout.width, layout.height)
            .font(self.cx.profile.fonts.scrollable)
            .align(AlignX::Left, AlignY::Center)
            .inset(layout.inset_x, layout.inset_y)];
        self.render_layouts(&mut row, false)
    }
}
