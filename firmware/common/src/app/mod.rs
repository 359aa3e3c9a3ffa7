//! The e-bike application built on the UI core.
//!
//! [`App`] owns nothing but the warning field and a little input state. It
//! registers the fields and screens with a [`Ui`], then acts as the hooks of
//! every screen and as the application-wide press handler.
//!
//! ```text
//! let app = App::new(&STATE);
//! let screens = app.install(&mut ui)?;
//! ui.show(screens.boot, &mut display);
//! ```
//!
//! # Buttons
//!
//! | Event | Screen | Action |
//! |---|---|---|
//! | up / down click | main | assist level |
//! | up long click | main, info | toggle lights |
//! | down long click | main, info | walk assist while held |
//! | M long click | main, info | clear the trip |
//! | exit at the top menu, "next screen" | configuration | main |
//! | on/off click then long click | any | configuration |
//! | on/off long click | any | power off |
//! | profile "next screen" | main, info | main, info, main, ... |
//!
//! Screen presses run before the application-wide ones, and both only see
//! what the open menu, the editor and customizing left over.

pub mod demo;
pub mod distance;
pub mod screens;
pub mod state;
pub mod warnings;

use core::cell::{Cell, OnceCell};
use core::sync::atomic::Ordering;

pub use demo::DemoFeed;
pub use screens::{AppFields, AppScreen, AppScreens};
pub use state::BikeState;
pub use warnings::{Warning, WarningField};

use crate::buttons::{ButtonEvents, Buttons};
use crate::error::UiError;
use crate::field::format_text;
use crate::screen::{HookCx, PressHandler, ScreenHooks};
use crate::ui::Ui;

/// Speed readings above this are startup noise.
const MAX_SPEED_X10: u16 = 999;

pub struct App<'a> {
    state: &'a BikeState,
    warning: WarningField,
    /// Walk assist was requested and the down button has not been released.
    walk_requested: Cell<bool>,
    ids: OnceCell<(AppFields, AppScreens)>,
}

impl<'a> App<'a> {
    pub const fn new(state: &'a BikeState) -> Self {
        Self {
            state,
            warning: WarningField::new(),
            walk_requested: Cell::new(false),
            ids: OnceCell::new(),
        }
    }

    pub const fn state(&self) -> &'a BikeState {
        self.state
    }

    /// Register fields, screens and the press handler with `ui`.
    ///
    /// # Panics
    ///
    /// Panics if called twice.
    pub fn install(
        &'a self,
        ui: &mut Ui<'a>,
    ) -> Result<AppScreens, UiError> {
        let fields = screens::add_fields(ui, self.state, &self.warning)?;
        let screens = screens::add_screens(ui, &fields, self)?;
        ui.set_app_handler(self);
        if self.ids.set((fields, screens)).is_err() {
            panic!("app installed twice");
        }
        crate::logging::info!("app installed, {} fields", ui.fields().len());
        Ok(screens)
    }

    pub fn fields(&self) -> Option<&AppFields> {
        self.ids.get().map(|(fields, _)| fields)
    }

    fn current(
        &self,
        cx: &HookCx<'_, 'a>,
    ) -> Option<(&AppFields, &AppScreens, AppScreen)> {
        let (fields, screens) = self.ids.get()?;
        let kind = screens.classify(cx.current()?)?;
        Some((fields, screens, kind))
    }

    // =========================================================================
    // Per-tick refresh
    // =========================================================================

    /// Publish derived values into fields. Runs before every render.
    fn refresh(
        &self,
        cx: &mut HookCx<'_, 'a>,
        f: &AppFields,
    ) {
        let state = self.state;
        *cx.units = state.units();

        self.update_walk_assist(cx.held);
        distance::update(state);

        let speed = state.speed_x10.load(Ordering::Relaxed);
        if speed > MAX_SPEED_X10 {
            state.speed_x10.store(MAX_SPEED_X10, Ordering::Relaxed);
        }
        state.max_speed_x10.fetch_max(speed.min(MAX_SPEED_X10), Ordering::Relaxed);

        let soc = state.battery_soc.load(Ordering::Relaxed);
        cx.fields.set_text(f.soc, format_args!("{soc:3}%"));

        let minutes = state.clock_minutes.load(Ordering::Relaxed);
        let mut hours = minutes / 60;
        if cx.units.imperial && hours > 12 {
            hours -= 12;
        }
        cx.fields.set_text(f.clock, format_args!("{hours}:{:02}", minutes % 60));

        let trip_s = state.trip_time_s.load(Ordering::Relaxed);
        let trip_time = format_text(format_args!("{}:{:02}", trip_s / 3600, trip_s / 60 % 60));
        cx.fields.set_read_only_str(f.trip_time, &trip_time);

        let warning = warnings::evaluate(state);
        let changed = self.warning.set(warning);
        let field = &mut cx.fields[f.warning];
        if changed || field.blink != warning.blinks() {
            field.dirty = true;
        }
        field.blink = warning.blinks();
    }

    /// Walk assist stays engaged while the down button that requested it is held.
    fn update_walk_assist(
        &self,
        held: Buttons,
    ) {
        let state = self.state;
        let enabled = state.walk_assist_enabled.load(Ordering::Relaxed) != 0;
        let down = held.contains(Buttons::DOWN);
        if !enabled || !down {
            self.walk_requested.set(false);
        }
        let engaged = self.walk_requested.get() && down;
        state.walk_assist.store(engaged, Ordering::Relaxed);
    }

    fn boot_status(
        &self,
        cx: &mut HookCx<'_, 'a>,
        f: &AppFields,
        screens: &AppScreens,
    ) {
        let state = self.state;
        let seen = state.motor_seen.load(Ordering::Relaxed);
        if seen {
            cx.fields.set_text(f.boot_status, format_args!("Found motor"));
        } else {
            let volts = state.battery_voltage_x10.load(Ordering::Relaxed);
            cx.fields.set_text(f.boot_status, format_args!("Waiting motor {}.{}V", volts / 10, volts % 10));
        }

        // leave only once on/off is up, or its release would count as a click
        if seen && !cx.held.contains(Buttons::ONOFF) {
            cx.show(screens.main);
        }
    }

    // =========================================================================
    // Buttons
    // =========================================================================

    /// Presses shared by the riding screens.
    fn riding_press(
        &self,
        events: ButtonEvents,
    ) -> bool {
        let state = self.state;

        if events.contains(ButtonEvents::DOWN_LONG_CLICK) && state.walk_assist_enabled.load(Ordering::Relaxed) != 0 {
            self.walk_requested.set(true);
            return true;
        }
        if events.contains(ButtonEvents::UP_LONG_CLICK) {
            state.toggle_lights();
            return true;
        }
        if events.contains(ButtonEvents::M_LONG_CLICK) {
            state.clear_trip();
            return true;
        }
        false
    }

    /// Presses every screen shares.
    fn global_press(
        &self,
        cx: &mut HookCx<'_, 'a>,
        screens: &AppScreens,
        events: ButtonEvents,
    ) -> bool {
        if events.contains(ButtonEvents::ONOFF_LONG_CLICK) {
            self.state.request_power_off();
            return true;
        }
        if events.contains(ButtonEvents::ONOFF_CLICK_LONG_CLICK) {
            cx.show(screens.config);
            return true;
        }
        false
    }
}

impl<'a> ScreenHooks<'a> for App<'a> {
    fn on_enter(
        &self,
        cx: &mut HookCx<'_, 'a>,
    ) {
        let Some((_, _, kind)) = self.current(cx) else {
            return;
        };
        // riding screens use the small font for labels and units
        if matches!(kind, AppScreen::Main | AppScreen::Info) {
            cx.fonts.label = cx.profile.fonts.small;
            cx.fonts.units = cx.profile.fonts.small;
        }
    }

    fn on_exit(
        &self,
        cx: &mut HookCx<'_, 'a>,
    ) {
        if let Some((_, _, AppScreen::Config)) = self.current(cx) {
            self.state.request_save();
        }
    }

    fn on_pre_update(
        &self,
        cx: &mut HookCx<'_, 'a>,
    ) {
        let Some((f, screens, kind)) = self.current(cx) else {
            return;
        };
        let (f, screens) = (*f, *screens);
        self.refresh(cx, &f);
        if kind == AppScreen::Boot {
            self.boot_status(cx, &f, &screens);
        }
    }

    fn on_customized(
        &self,
        _cx: &mut HookCx<'_, 'a>,
    ) {
        self.state.request_save();
    }

    fn on_press(
        &self,
        cx: &mut HookCx<'_, 'a>,
        events: ButtonEvents,
    ) -> bool {
        let Some((_, screens, kind)) = self.current(cx) else {
            return false;
        };
        let screens = *screens;
        let leave_config = cx.profile.bindings.exit_scrollable | cx.profile.bindings.next_screen;
        match kind {
            AppScreen::Main if events.contains(ButtonEvents::UP_CLICK) => {
                self.state.step_assist(true);
                true
            }
            AppScreen::Main if events.contains(ButtonEvents::DOWN_CLICK) => {
                self.state.step_assist(false);
                true
            }
            AppScreen::Main | AppScreen::Info => self.riding_press(events),
            // the top menu was exited, or the next screen asked for
            AppScreen::Config if events.intersects(leave_config) => {
                cx.show(screens.main);
                true
            }
            _ => false,
        }
    }
}

impl<'a> PressHandler<'a> for App<'a> {
    fn on_press(
        &self,
        cx: &mut HookCx<'_, 'a>,
        events: ButtonEvents,
    ) -> bool {
        let Some((_, screens, kind)) = self.current(cx) else {
            return false;
        };
        let screens = *screens;
        if self.global_press(cx, &screens, events) {
            return true;
        }
        if events.intersects(cx.profile.bindings.next_screen) {
            let next = if kind == AppScreen::Main { screens.info } else { screens.main };
            cx.show(next);
            return true;
        }
        false
    }
}
