//! Screens and their lifecycle hooks.
//!
//! A [`Screen`] is an ordered list of [`FieldLayout`]s plus an optional
//! [`ScreenHooks`] implementation. The screen manager ([`Ui`](crate::ui::Ui))
//! calls the hooks around every update and on every screen switch, handing
//! them a [`HookCx`] through which they can update fields, change the
//! display units or request another screen.
//!
//! # Hook Order
//!
//! | Event | Hooks |
//! |---|---|
//! | `show` | outgoing `on_exit`, incoming `on_enter` |
//! | `update` | `on_pre_update`, `on_dirty_clean` (full redraws only), `on_post_update` (only if something drew) |
//! | button press | `on_press`, after the editor, menu and customizing handlers passed |
//! | customizing finished | `on_customized` |

use heapless::Vec;

use crate::buttons::{ButtonEvents, Buttons};
use crate::config::{DisplayProfile, MAX_LAYOUTS};
use crate::error::UiError;
use crate::field::FieldArena;
use crate::layout::FieldLayout;
use crate::render::EditableFonts;
use crate::units::Units;

/// Handle to a screen registered with the screen manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenId(pub(crate) u8);

impl ScreenId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a hook may touch.
pub struct HookCx<'h, 'a> {
    pub fields: &'h mut FieldArena<'a>,
    /// Changing the units redraws the whole screen after the hook returns.
    pub units: &'h mut Units,
    /// Fonts editables use on this screen. Reset on every switch.
    pub fonts: &'h mut EditableFonts,
    /// Buttons held during this tick.
    pub held: Buttons,
    pub profile: &'static DisplayProfile,
    pub(crate) current: Option<ScreenId>,
    pub(crate) next: &'h mut Option<ScreenId>,
}

impl HookCx<'_, '_> {
    /// Switch to `screen` at the start of the next update.
    pub fn show(
        &mut self,
        screen: ScreenId,
    ) {
        *self.next = Some(screen);
    }

    /// The screen being shown.
    pub const fn current(&self) -> Option<ScreenId> {
        self.current
    }
}

/// Per-screen callbacks. Every hook defaults to doing nothing.
pub trait ScreenHooks<'a> {
    fn on_enter(
        &self,
        _cx: &mut HookCx<'_, 'a>,
    ) {
    }

    /// Persist whatever the screen edited.
    fn on_exit(
        &self,
        _cx: &mut HookCx<'_, 'a>,
    ) {
    }

    /// Refresh field contents before the render pass.
    fn on_pre_update(
        &self,
        _cx: &mut HookCx<'_, 'a>,
    ) {
    }

    fn on_post_update(
        &self,
        _cx: &mut HookCx<'_, 'a>,
    ) {
    }

    /// The panel was just cleared for a full redraw.
    fn on_dirty_clean(
        &self,
        _cx: &mut HookCx<'_, 'a>,
    ) {
    }

    /// A customizable slot changed its selector.
    fn on_customized(
        &self,
        _cx: &mut HookCx<'_, 'a>,
    ) {
    }

    /// Returns whether the press was consumed.
    fn on_press(
        &self,
        _cx: &mut HookCx<'_, 'a>,
        _events: ButtonEvents,
    ) -> bool {
        false
    }
}

/// Last-resort press handler shared by every screen.
pub trait PressHandler<'a> {
    /// Returns whether the press was consumed.
    fn on_press(
        &self,
        cx: &mut HookCx<'_, 'a>,
        events: ButtonEvents,
    ) -> bool;
}

/// Layouts and hooks of one screen.
pub struct Screen<'a> {
    pub(crate) layouts: Vec<FieldLayout, MAX_LAYOUTS>,
    pub(crate) hooks: Option<&'a dyn ScreenHooks<'a>>,
}

impl<'a> Screen<'a> {
    pub fn new(layouts: &[FieldLayout]) -> Result<Self, UiError> {
        let layouts = Vec::from_slice(layouts).map_err(|_| UiError::TooManyLayouts)?;
        Ok(Self { layouts, hooks: None })
    }

    pub fn with_hooks(
        mut self,
        hooks: &'a dyn ScreenHooks<'a>,
    ) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Layouts in draw order, with whatever geometry has been resolved so far.
    pub fn layouts(&self) -> &[FieldLayout] {
        &self.layouts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldId;

    #[test]
    fn test_too_many_layouts() {
        let layouts = [FieldLayout::new(FieldId(0)); MAX_LAYOUTS + 1];
        assert_eq!(Screen::new(&layouts).err(), Some(UiError::TooManyLayouts));
        assert_eq!(Screen::new(&layouts[..MAX_LAYOUTS]).map(|s| s.layouts().len()).ok(), Some(MAX_LAYOUTS));
    }
}
