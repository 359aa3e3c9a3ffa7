//! The screen manager.
//!
//! [`Ui`] owns the field arena, the registered screens and the interaction
//! state. The board loop drives it once per tick:
//!
//! ```text
//! events = decoder.tick(levels)
//! ui.set_held(levels)
//! ui.on_press(events)
//! if ui.update(&mut display) { flush }
//! ```
//!
//! # Press Dispatch
//!
//! The first handler that consumes a press wins: the value being edited,
//! then the open scrollable menu, then customizable slots, then the current
//! screen's hooks, then the application-wide [`PressHandler`].

use heapless::Vec;

use crate::buttons::{ButtonEvents, Buttons};
use crate::canvas::Canvas;
use crate::colors::BLACK;
use crate::config::{DisplayProfile, MAX_SCREENS};
use crate::error::UiError;
use crate::field::{Field, FieldArena, FieldId, Variant};
use crate::render::{EditableFonts, RenderPass, UiContext};
use crate::screen::{HookCx, PressHandler, Screen, ScreenHooks, ScreenId};
use crate::units::Units;

/// Long holds of up and down, which repeat the step while a value is edited.
const EDIT_HOLD_EVENTS: ButtonEvents = ButtonEvents::UP_LONG_CLICK
    .union(ButtonEvents::UP_CLICK_LONG_CLICK)
    .union(ButtonEvents::DOWN_LONG_CLICK)
    .union(ButtonEvents::DOWN_CLICK_LONG_CLICK);

pub struct Ui<'a> {
    fields: FieldArena<'a>,
    screens: Vec<Screen<'a>, MAX_SCREENS>,
    current: Option<ScreenId>,
    /// Switch requested by a hook, applied at the start of the next update.
    pending: Option<ScreenId>,
    app: Option<&'a dyn PressHandler<'a>>,
    cx: UiContext,
}

impl<'a> Ui<'a> {
    pub fn new(profile: &'static DisplayProfile) -> Self {
        crate::logging::info!("ui init for {}", profile.name);
        Self {
            fields: FieldArena::new(),
            screens: Vec::new(),
            current: None,
            pending: None,
            app: None,
            cx: UiContext::new(profile),
        }
    }

    // =========================================================================
    // Construction
    // =========================================================================

    pub fn add_field(
        &mut self,
        field: Field<'a>,
    ) -> Result<FieldId, UiError> {
        self.fields.add(field)
    }

    pub fn add_screen(
        &mut self,
        screen: Screen<'a>,
    ) -> Result<ScreenId, UiError> {
        let id = ScreenId(self.screens.len() as u8);
        self.screens.push(screen).map_err(|_| UiError::TooManyScreens)?;
        Ok(id)
    }

    /// Handler for presses no screen consumed.
    pub fn set_app_handler(
        &mut self,
        app: &'a dyn PressHandler<'a>,
    ) {
        self.app = Some(app);
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn fields(&self) -> &FieldArena<'a> {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut FieldArena<'a> {
        &mut self.fields
    }

    pub const fn profile(&self) -> &'static DisplayProfile {
        self.cx.profile
    }

    pub const fn units(&self) -> Units {
        self.cx.units
    }

    /// Change the display units and redraw everything.
    pub fn set_units(
        &mut self,
        units: Units,
    ) {
        if self.cx.units != units {
            self.cx.units = units;
            self.cx.screen_dirty = true;
        }
    }

    /// Record the buttons held this tick, for hold repeat and the label combo.
    pub fn set_held(
        &mut self,
        held: Buttons,
    ) {
        let pressed = held.difference(self.cx.held);
        if pressed.intersects(Buttons::UP | Buttons::DOWN) {
            self.cx.edit.press_started();
        }
        self.cx.held = held;
    }

    pub const fn current_screen(&self) -> Option<ScreenId> {
        self.current
    }

    pub fn is_editing(&self) -> bool {
        self.cx.edit.active().is_some()
    }

    pub fn is_customizing(&self) -> bool {
        self.cx.customize.is_active()
    }

    /// Switch to `screen` at the start of the next update.
    pub fn request_show(
        &mut self,
        screen: ScreenId,
    ) {
        self.pending = Some(screen);
    }

    /// Redraw the whole panel on the next update.
    pub fn force_redraw(&mut self) {
        self.cx.screen_dirty = true;
    }

    // =========================================================================
    // Screen switching and updates
    // =========================================================================

    /// Switch to `screen` and draw it at once.
    ///
    /// # Panics
    ///
    /// Panics if `screen` was not registered.
    pub fn show(
        &mut self,
        screen: ScreenId,
        canvas: &mut dyn Canvas,
    ) -> bool {
        self.switch_to(screen);
        self.update(canvas)
    }

    fn switch_to(
        &mut self,
        screen: ScreenId,
    ) {
        assert!(screen.index() < self.screens.len(), "show of an unregistered screen");
        self.pending = None;
        self.call_hooks(|hooks, cx| hooks.on_exit(cx));

        self.cx.edit.end(&mut self.fields, self.cx.units);
        self.cx.customize.reset();
        self.cx.nav.reset();

        self.current = Some(screen);
        self.cx.screen_dirty = true;
        self.cx.fonts = EditableFonts::from_profile(self.cx.profile);
        crate::logging::info!("show screen {}", screen.index());

        self.call_hooks(|hooks, cx| hooks.on_enter(cx));
    }

    fn apply_pending(&mut self) {
        if let Some(screen) = self.pending.take() {
            self.switch_to(screen);
        }
    }

    /// Run one tick: hooks, blink phase, render.
    ///
    /// Returns whether anything was drawn, so the caller flushes only then.
    pub fn update(
        &mut self,
        canvas: &mut dyn Canvas,
    ) -> bool {
        self.apply_pending();
        if self.current.is_none() {
            return false;
        }

        self.call_hooks(|hooks, cx| hooks.on_pre_update(cx));
        self.apply_pending();
        let Some(screen) = self.current else {
            return false;
        };

        self.cx.blink.tick();

        let full = self.cx.screen_dirty;
        if full {
            canvas.fill_screen(BLACK);
            self.call_hooks(|hooks, cx| hooks.on_dirty_clean(cx));
        }

        let layouts = &mut self.screens[screen.index()].layouts;
        let drew = RenderPass {
            fields: &mut self.fields,
            cx: &mut self.cx,
            canvas,
        }
        .render_layouts(layouts, full);
        self.cx.screen_dirty = false;

        let drew = drew || full;
        if drew {
            self.call_hooks(|hooks, cx| hooks.on_post_update(cx));
        }
        drew
    }

    // =========================================================================
    // Button presses
    // =========================================================================

    /// Dispatch `events`. Returns whether any handler consumed them.
    pub fn on_press(
        &mut self,
        events: ButtonEvents,
    ) -> bool {
        if events.is_empty() {
            return false;
        }
        let handled = self.press_editable(events)
            || self.press_scrollable(events)
            || self.press_customizing(events)
            || self.call_hooks(|hooks, cx| hooks.on_press(cx, events))
            || self.press_app(events);
        if !handled {
            crate::logging::debug!("unhandled press {=u16:#x}", events.bits());
        }
        handled
    }

    fn press_editable(
        &mut self,
        events: ButtonEvents,
    ) -> bool {
        let Some(id) = self.cx.edit.active() else {
            return false;
        };
        let units = self.cx.units;
        let mut handled = false;

        if events.contains(ButtonEvents::UP_CLICK) {
            self.cx.edit.click_step(&self.fields, units, true);
            handled = true;
        }
        if events.contains(ButtonEvents::DOWN_CLICK) {
            self.cx.edit.click_step(&self.fields, units, false);
            handled = true;
        }
        // the hold is already repeating the step
        if events.intersects(EDIT_HOLD_EVENTS) {
            handled = true;
        }
        if events.intersects(self.cx.profile.bindings.stop_edit) {
            self.cx.edit.end(&mut self.fields, units);
            // the row gets its selection blink back
            self.cx.nav.force_relayout(&mut self.fields);
            handled = true;
        }

        if handled {
            self.fields[id].dirty = true;
            if let Some(root) = self.cx.nav.root() {
                self.fields[root].dirty = true;
            }
        }
        handled
    }

    fn press_scrollable(
        &mut self,
        events: ButtonEvents,
    ) -> bool {
        let Some(menu) = self.cx.nav.active() else {
            return false;
        };
        let bindings = self.cx.profile.bindings;
        let mut handled = false;

        if events.contains(ButtonEvents::UP_CLICK) {
            self.cx.nav.move_up(&mut self.fields);
            handled = true;
        }
        if events.contains(ButtonEvents::DOWN_CLICK) {
            self.cx.nav.move_down(&mut self.fields);
            handled = true;
        }

        if events.intersects(bindings.start_edit)
            && self.cx.edit.active().is_none()
            && let Some(entry) = self.fields.selected_entry(menu)
        {
            match self.fields[entry].variant() {
                Variant::Editable => {
                    let read_only = self.fields[entry].as_editable().is_some_and(|e| e.read_only);
                    if !read_only {
                        self.cx.edit.begin(&mut self.fields, entry, self.cx.units);
                        self.cx.nav.force_relayout(&mut self.fields);
                        handled = true;
                    }
                }
                Variant::Scrollable => {
                    self.cx.nav.enter(&mut self.fields, entry);
                    handled = true;
                }
                _ => {}
            }
        }

        // leaving the root menu falls through so the press can switch screens
        if !handled && events.intersects(bindings.exit_scrollable) {
            handled = self.cx.nav.exit(&mut self.fields);
        }
        handled
    }

    fn press_customizing(
        &mut self,
        events: ButtonEvents,
    ) -> bool {
        let Some(screen) = self.current else {
            return false;
        };
        let bindings = self.cx.profile.bindings;
        let layouts = &self.screens[screen.index()].layouts;

        if !self.cx.customize.is_active() {
            if events.intersects(bindings.start_customizing) {
                self.cx.customize.select_next(&mut self.fields, layouts);
                return self.cx.customize.is_active();
            }
            return false;
        }

        if events.contains(ButtonEvents::UP_CLICK) {
            self.cx.customize.advance_choice(&mut self.fields, &mut self.cx.graph);
            return true;
        }
        if events.contains(ButtonEvents::DOWN_CLICK) {
            self.cx.customize.select_next(&mut self.fields, layouts);
            return true;
        }
        if events.intersects(bindings.stop_customizing) {
            self.cx.customize.stop(&mut self.fields);
            crate::logging::info!("customizing done on screen {}", screen.index());
            self.call_hooks(|hooks, cx| hooks.on_customized(cx));
            return true;
        }
        false
    }

    fn press_app(
        &mut self,
        events: ButtonEvents,
    ) -> bool {
        let Some(app) = self.app else {
            return false;
        };
        let units = self.cx.units;
        let handled = app.on_press(&mut self.hook_cx(), events);
        self.check_units(units);
        handled
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    fn current_hooks(&self) -> Option<&'a dyn ScreenHooks<'a>> {
        let screen = self.current?;
        self.screens[screen.index()].hooks
    }

    fn hook_cx(&mut self) -> HookCx<'_, 'a> {
        HookCx {
            fields: &mut self.fields,
            units: &mut self.cx.units,
            fonts: &mut self.cx.fonts,
            held: self.cx.held,
            profile: self.cx.profile,
            current: self.current,
            next: &mut self.pending,
        }
    }

    /// Run `f` against the current screen's hooks, if it has any.
    fn call_hooks<R: Default>(
        &mut self,
        f: impl FnOnce(&'a dyn ScreenHooks<'a>, &mut HookCx<'_, 'a>) -> R,
    ) -> R {
        let Some(hooks) = self.current_hooks() else {
            return R::default();
        };
        let units = self.cx.units;
        let result = f(hooks, &mut self.hook_cx());
        self.check_units(units);
        result
    }

    fn check_units(
        &mut self,
        before: Units,
    ) {
        if self.cx.units != before {
            self.cx.screen_dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use core::sync::atomic::{AtomicU8, Ordering};

    use embedded_graphics::mono_font::ascii::FONT_6X10;

    use super::*;
    use crate::config::{BLINK_TICKS, SW102};
    use crate::field::NumberFormat;
    use crate::layout::FieldLayout;
    use crate::testing::RecordingCanvas;

    #[derive(Default)]
    struct Recorder {
        entered: Cell<u32>,
        customized: Cell<u32>,
        presses: Cell<u32>,
    }

    impl<'a> ScreenHooks<'a> for Recorder {
        fn on_enter(
            &self,
            _cx: &mut HookCx<'_, 'a>,
        ) {
            self.entered.set(self.entered.get() + 1);
        }

        fn on_customized(
            &self,
            _cx: &mut HookCx<'_, 'a>,
        ) {
            self.customized.set(self.customized.get() + 1);
        }
    }

    impl<'a> PressHandler<'a> for Recorder {
        fn on_press(
            &self,
            _cx: &mut HookCx<'_, 'a>,
            _events: ButtonEvents,
        ) -> bool {
            self.presses.set(self.presses.get() + 1);
            true
        }
    }

    #[test]
    fn test_settled_screen_draws_nothing() {
        static LEVEL: AtomicU8 = AtomicU8::new(3);
        let mut canvas = RecordingCanvas::new(SW102.size());
        let mut ui = Ui::new(&SW102);
        let title = ui.add_field(Field::text("Trip")).unwrap();
        let level = ui.add_field(Field::readonly_number("assist", &LEVEL, NumberFormat::new(""))).unwrap();
        let screen = ui
            .add_screen(
                Screen::new(&[
                    FieldLayout::new(title).at(0, 0).size(64, -1).font(&FONT_6X10),
                    FieldLayout::new(level).at(0, -1).size(64, -1).hide_label(),
                ])
                .unwrap(),
            )
            .unwrap();

        assert!(ui.show(screen, &mut canvas));
        for _ in 0..3 * BLINK_TICKS {
            assert!(!ui.update(&mut canvas));
        }

        LEVEL.store(4, Ordering::Relaxed);
        assert!(ui.update(&mut canvas));
        assert!(!ui.update(&mut canvas));
    }

    #[test]
    fn test_menu_edit_then_fall_through_to_app() {
        static LIMIT: AtomicU8 = AtomicU8::new(20);
        let app = Recorder::default();
        let mut canvas = RecordingCanvas::new(SW102.size());
        let mut ui = Ui::new(&SW102);
        ui.set_app_handler(&app);
        let limit = ui
            .add_field(Field::number("limit", &LIMIT, NumberFormat::new("kph").range(10, 40)))
            .unwrap();
        let menu = ui.add_field(Field::scrollable("Setup", &[limit]).unwrap()).unwrap();
        let screen = ui.add_screen(Screen::new(&[FieldLayout::new(menu)]).unwrap()).unwrap();
        ui.show(screen, &mut canvas);

        assert!(ui.on_press(ButtonEvents::M_CLICK));
        assert!(ui.is_editing());
        assert!(ui.on_press(ButtonEvents::UP_CLICK));
        assert!(ui.on_press(ButtonEvents::UP_CLICK));
        assert!(ui.on_press(ButtonEvents::M_CLICK));
        assert!(!ui.is_editing());
        assert_eq!(LIMIT.load(Ordering::Relaxed), 22);
        assert_eq!(app.presses.get(), 0);

        // exiting the root menu is not consumed by the menu
        assert!(ui.on_press(ButtonEvents::ONOFF_CLICK));
        assert_eq!(app.presses.get(), 1);
    }

    #[test]
    fn test_long_holds_stay_with_the_editor() {
        static LIMIT: AtomicU8 = AtomicU8::new(20);
        let app = Recorder::default();
        let mut canvas = RecordingCanvas::new(SW102.size());
        let mut ui = Ui::new(&SW102);
        ui.set_app_handler(&app);
        let limit = ui
            .add_field(Field::number("limit", &LIMIT, NumberFormat::new("kph").range(10, 40)))
            .unwrap();
        let menu = ui.add_field(Field::scrollable("Setup", &[limit]).unwrap()).unwrap();
        let screen = ui.add_screen(Screen::new(&[FieldLayout::new(menu)]).unwrap()).unwrap();
        ui.show(screen, &mut canvas);
        assert!(ui.on_press(ButtonEvents::M_CLICK));
        assert!(ui.is_editing());

        for events in [
            ButtonEvents::UP_LONG_CLICK,
            ButtonEvents::UP_CLICK_LONG_CLICK,
            ButtonEvents::DOWN_LONG_CLICK,
            ButtonEvents::DOWN_CLICK_LONG_CLICK,
        ] {
            assert!(ui.on_press(events));
        }
        assert!(ui.is_editing());
        assert_eq!(app.presses.get(), 0);

        // other long clicks still reach the app
        assert!(ui.on_press(ButtonEvents::ONOFF_LONG_CLICK));
        assert_eq!(app.presses.get(), 1);
    }

    #[test]
    fn test_customizing_notifies_screen() {
        static SEL: AtomicU8 = AtomicU8::new(0);
        static A: AtomicU8 = AtomicU8::new(1);
        static B: AtomicU8 = AtomicU8::new(2);
        let hooks = Recorder::default();
        let mut canvas = RecordingCanvas::new(SW102.size());
        let mut ui = Ui::new(&SW102);
        let a = ui.add_field(Field::readonly_number("a", &A, NumberFormat::new(""))).unwrap();
        let b = ui.add_field(Field::readonly_number("b", &B, NumberFormat::new(""))).unwrap();
        let slot = ui.add_field(Field::customizable(&SEL, &[a, b]).unwrap()).unwrap();
        let screen = ui
            .add_screen(
                Screen::new(&[FieldLayout::new(slot).at(0, 0).size(64, 30)])
                    .unwrap()
                    .with_hooks(&hooks),
            )
            .unwrap();
        ui.show(screen, &mut canvas);
        assert_eq!(hooks.entered.get(), 1);

        assert!(ui.on_press(ButtonEvents::M_CLICK));
        assert!(ui.is_customizing());
        assert!(ui.on_press(ButtonEvents::UP_CLICK));
        assert_eq!(SEL.load(Ordering::Relaxed), 1);
        assert!(ui.on_press(ButtonEvents::M_CLICK));
        assert!(!ui.is_customizing());
        assert_eq!(hooks.customized.get(), 1);
    }

    #[test]
    fn test_hook_requested_switch_applies_on_update() {
        let mut canvas = RecordingCanvas::new(SW102.size());
        let mut ui = Ui::new(&SW102);
        let fill = ui.add_field(Field::fill()).unwrap();
        let first = ui.add_screen(Screen::new(&[FieldLayout::new(fill).size(8, 8)]).unwrap()).unwrap();
        let second = ui.add_screen(Screen::new(&[FieldLayout::new(fill).size(8, 8)]).unwrap()).unwrap();

        ui.show(first, &mut canvas);
        ui.request_show(second);
        assert_eq!(ui.current_screen(), Some(first));
        assert!(ui.update(&mut canvas));
        assert_eq!(ui.current_screen(), Some(second));
    }

    #[test]
    fn test_unit_change_redraws() {
        let mut canvas = RecordingCanvas::new(SW102.size());
        let mut ui = Ui::new(&SW102);
        let fill = ui.add_field(Field::fill()).unwrap();
        let screen = ui.add_screen(Screen::new(&[FieldLayout::new(fill).size(8, 8)]).unwrap()).unwrap();
        ui.show(screen, &mut canvas);
        assert!(!ui.update(&mut canvas));

        ui.set_units(Units::IMPERIAL);
        assert!(ui.update(&mut canvas));
    }
}
