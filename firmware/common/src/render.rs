//! The dirty-tracking renderer.
//!
//! A [`RenderPass`] walks a list of [`FieldLayout`]s once per tick, resolves
//! deferred geometry, decides per field whether a redraw is owed, and
//! dispatches to the widget for the field's variant. A screen whose fields
//! did not change draws nothing, so a settled display costs no bus traffic.
//!
//! # Redraw Rules
//!
//! A field is drawn when it is dirty, when the blink phase just flipped and
//! the field blinks or is selected, or when it is an editable (editables
//! compare their value against the layout's cached copy and skip the draw
//! themselves). Graphs are also visited on their sampling tick.
//!
//! Dirty bits are cleared in a second pass, so a field shared by two
//! layouts on one screen draws in both.
//!
//! # Geometry Shorthands
//!
//! | Value | Meaning |
//! |---|---|
//! | `width == 0` | rest of the panel right of `x` |
//! | `width < 0` | `-width` character cells of the layout font |
//! | `height == 0` | rest of the panel below `y` |
//! | `height == -1` | one line of the layout font (editables size themselves) |
//! | `y < 0` | `-y - 1` rows below the lowest layout so far |
//!
//! Resolved values are written back, so each layout is resolved once.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::buttons::Buttons;
use crate::canvas::Canvas;
use crate::colors::{BLACK, CURSOR_COLOR};
use crate::config::{BLINK_TICKS, DisplayProfile, Font, GRAPH_TICKS};
use crate::customize::CustomizeController;
use crate::editor::EditController;
use crate::field::{FieldArena, FieldId, FieldKind, Variant};
use crate::graph::GraphSlot;
use crate::layout::{AlignX, Border, FieldLayout};
use crate::navigator::Navigator;
use crate::units::Units;
use crate::widgets::draw_text_common;

/// A field that draws itself.
pub trait CustomRender {
    /// Draw into `cx.layout`. Returns whether anything was drawn.
    fn render(
        &self,
        cx: &mut CustomCx<'_>,
    ) -> bool;
}

/// What a [`CustomRender`] gets to work with.
pub struct CustomCx<'c> {
    pub canvas: &'c mut dyn Canvas,
    /// The layout being drawn. Custom fields may recolor it.
    pub layout: &'c mut FieldLayout,
    /// The field is dirty this pass.
    pub dirty: bool,
    /// The field participates in blinking.
    pub blink: bool,
    /// Current blink phase.
    pub blink_on: bool,
}

impl CustomCx<'_> {
    /// Clear the layout and draw `text` the way text fields are drawn.
    pub fn draw_text(
        &mut self,
        text: &str,
    ) -> bool {
        let hidden = self.blink && !self.blink_on;
        draw_text_common(self.canvas, self.layout, text, hidden)
    }
}

// =============================================================================
// Shared state
// =============================================================================

/// Tick counter behind the blink animation and the graph duty cycle.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blink {
    counter: u32,
    on: bool,
    changed: bool,
}

impl Blink {
    pub const fn new() -> Self {
        Self {
            counter: 0,
            on: false,
            changed: false,
        }
    }

    /// Advance one update tick.
    pub fn tick(&mut self) {
        self.counter = self.counter.wrapping_add(1);
        self.changed = self.counter.is_multiple_of(BLINK_TICKS);
        if self.changed {
            self.on = !self.on;
        }
    }

    /// The phase flipped on the latest tick.
    #[inline]
    pub const fn changed(&self) -> bool {
        self.changed
    }

    #[inline]
    pub const fn is_on(&self) -> bool {
        self.on
    }

    /// Graphs sample on this tick.
    #[inline]
    pub const fn graph_due(&self) -> bool {
        self.counter.is_multiple_of(GRAPH_TICKS)
    }
}

/// Fonts editables use for label, value and units.
///
/// Reset to the profile's fonts on every screen switch; screens may
/// override them from `on_enter`. A layout font overrides `value`.
#[derive(Clone, Copy)]
pub struct EditableFonts {
    pub label: Font,
    pub value: Font,
    pub units: Font,
}

impl EditableFonts {
    pub const fn from_profile(profile: &DisplayProfile) -> Self {
        Self {
            label: profile.fonts.label,
            value: profile.fonts.value,
            units: profile.fonts.units,
        }
    }
}

/// Everything the UI keeps between ticks besides fields and screens.
pub(crate) struct UiContext {
    pub profile: &'static DisplayProfile,
    pub units: Units,
    pub fonts: EditableFonts,
    pub blink: Blink,
    /// Buttons held during the current tick.
    pub held: Buttons,
    /// Hidden labels are being shown because the label button is held.
    pub force_labels: bool,
    pub old_force_labels: bool,
    /// Clear the panel and redraw everything on the next update.
    pub screen_dirty: bool,
    pub nav: Navigator,
    pub edit: EditController,
    pub customize: CustomizeController,
    pub graph: GraphSlot,
}

impl UiContext {
    pub fn new(profile: &'static DisplayProfile) -> Self {
        Self {
            profile,
            units: Units::METRIC,
            fonts: EditableFonts::from_profile(profile),
            blink: Blink::new(),
            held: Buttons::empty(),
            force_labels: false,
            old_force_labels: false,
            screen_dirty: false,
            nav: Navigator::new(profile.scrollable_rows()),
            edit: EditController::new(),
            customize: CustomizeController::new(),
            graph: GraphSlot::new(),
        }
    }

    /// The label-show button is configured and currently held.
    fn labels_held(&self) -> bool {
        let show = self.profile.show_labels;
        !show.is_empty() && self.held.contains(show)
    }
}

// =============================================================================
// Render pass
// =============================================================================

/// Borrows everything one render needs.
pub(crate) struct RenderPass<'r, 'a> {
    pub fields: &'r mut FieldArena<'a>,
    pub cx: &'r mut UiContext,
    pub canvas: &'r mut dyn Canvas,
}

impl RenderPass<'_, '_> {
    /// Draw whatever changed in `layouts`. With `force` every field redraws.
    ///
    /// Returns whether anything was drawn.
    pub fn render_layouts(
        &mut self,
        layouts: &mut [FieldLayout],
        force: bool,
    ) -> bool {
        let mut did_draw = false;
        let mut max_y = 0;
        let mut touched_labels = false;
        let labels_held = self.cx.labels_held();

        for layout in layouts.iter_mut() {
            let (id, parent) = self.fields.resolve(layout.field);
            if force {
                self.fields[id].dirty = true;
            }

            if matches!(self.fields[id].kind, FieldKind::Editable(_)) {
                self.cx.force_labels = labels_held && layout.label_align_x == AlignX::Hidden;
                touched_labels = true;
            }

            if self.needs_render(id) {
                self.resolve_geometry(layout, id, max_y);
                let drew = self.render_field(layout, id, parent);
                assert!(layout.height >= 0, "layout height unresolved after render");

                // a field that skipped its draw still has its marker and border
                if drew {
                    self.draw_selection_marker(layout, id);
                    self.draw_border(layout);
                }
                did_draw |= drew;
            }

            if layout.y >= 0 && layout.height >= 0 {
                max_y = max_y.max(layout.y + layout.height);
            }
        }

        for layout in layouts.iter() {
            let (id, _) = self.fields.resolve(layout.field);
            self.fields[id].dirty = false;
        }

        if touched_labels {
            self.cx.old_force_labels = self.cx.force_labels;
        }

        did_draw
    }

    fn needs_render(
        &self,
        id: FieldId,
    ) -> bool {
        let field = &self.fields[id];
        if field.dirty {
            return true;
        }
        if self.cx.blink.changed() && (field.blink || field.is_selected) {
            return true;
        }
        match field.kind {
            FieldKind::Editable(_) => true,
            FieldKind::Graph(_) => self.cx.blink.graph_due(),
            _ => false,
        }
    }

    fn resolve_geometry(
        &self,
        layout: &mut FieldLayout,
        id: FieldId,
        max_y: i32,
    ) {
        let profile = self.cx.profile;

        if layout.y < 0 {
            layout.y = max_y - layout.y - 1;
        }
        if layout.width == 0 {
            layout.width = profile.width - layout.x;
        }
        if layout.height == 0 {
            layout.height = profile.height - layout.y;
        }
        if layout.width < 0 {
            let Some(font) = layout.font else {
                panic!("character-cell width needs a layout font");
            };
            let step = (font.character_size.width + font.character_spacing) as i32;
            layout.width = -layout.width * step;
        }
        if layout.height == -1 && self.fields[id].variant() != Variant::Editable {
            let Some(font) = layout.font else {
                panic!("font-derived height needs a layout font");
            };
            layout.height = font.character_size.height as i32;
        }
    }

    fn render_field(
        &mut self,
        layout: &mut FieldLayout,
        id: FieldId,
        parent: Option<FieldId>,
    ) -> bool {
        match self.fields[id].variant() {
            Variant::DrawText | Variant::DrawTextPtr => self.render_text(layout, id),
            Variant::Fill => self.render_fill(layout, false),
            Variant::Mesh => self.render_fill(layout, true),
            Variant::Scrollable => self.render_scrollable(layout, id),
            Variant::Editable => self.render_editable(layout, id, parent),
            Variant::Custom => self.render_custom(layout, id),
            Variant::Graph => self.render_graph(layout, id, parent),
            Variant::Customizable => unreachable!("customizable slots are resolved before dispatch"),
            Variant::End => panic!("end marker placed in a layout"),
        }
    }

    /// Right-edge triangle on selected fields, blinking with the phase.
    fn draw_selection_marker(
        &mut self,
        layout: &FieldLayout,
        id: FieldId,
    ) {
        if !self.fields[id].is_selected {
            return;
        }
        let Size { width, height } = self.cx.profile.cursor;
        let (w, h) = (width as i32, height as i32);
        let x = layout.x + layout.width - w;
        let y = layout.y + (layout.height - h) / 2;
        let color = if self.cx.blink.is_on() { CURSOR_COLOR } else { BLACK };
        self.canvas.fill_triangle(
            Point::new(x, y),
            Point::new(x, y + h - 1),
            Point::new(x + w - 1, y + h / 2),
            color,
        );
    }

    fn draw_border(
        &mut self,
        layout: &FieldLayout,
    ) {
        let border = layout.border;
        if border.is_empty() {
            return;
        }
        let color = layout.color.fore();
        let (x0, y0) = (layout.x, layout.y);
        let (x1, y1) = (layout.x + layout.width - 1, layout.y + layout.height - 1);

        if border.contains(Border::TOP) {
            self.canvas.draw_line(Point::new(x0, y0), Point::new(x1, y0), color);
        }
        if border.contains(Border::BOTTOM) {
            let fat = if border.contains(Border::FAT) { self.cx.profile.fat_border } else { 1 };
            let strip = Rectangle::new(
                Point::new(x0, y1 - fat + 1),
                Size::new(layout.width.max(0) as u32, fat.max(0) as u32),
            );
            self.canvas.fill_rect(strip, color);
        }
        if border.contains(Border::LEFT) {
            self.canvas.draw_line(Point::new(x0, y0), Point::new(x0, y1), color);
        }
        if border.contains(Border::RIGHT) {
            self.canvas.draw_line(Point::new(x1, y0), Point::new(x1, y1), color);
        }
    }
}
