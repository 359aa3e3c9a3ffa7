//! Button events and the tick-driven decoder that produces them.
//!
//! The UI consumes two views of the buttons:
//!
//! - [`ButtonEvents`]: edge-triggered clicks, long clicks and
//!   click-then-long-clicks, sampled once per tick
//! - [`Buttons`]: level-triggered "is held" state, used for press-and-hold
//!   repeat while editing and for the show-labels combo
//!
//! [`ButtonDecoder`] turns raw levels (one sample per tick) into both.

use bitflags::bitflags;

use crate::config::{CLICK_LONG_CLICK_WINDOW_TICKS, LONG_CLICK_TICKS};

bitflags! {
    /// Physical buttons, used for held levels.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const ONOFF = 1 << 2;
        const M = 1 << 3;
    }
}

bitflags! {
    /// Edge-triggered events delivered once per tick.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ButtonEvents: u16 {
        const UP_CLICK = 1 << 0;
        const UP_LONG_CLICK = 1 << 1;
        const UP_CLICK_LONG_CLICK = 1 << 2;
        const DOWN_CLICK = 1 << 3;
        const DOWN_LONG_CLICK = 1 << 4;
        const DOWN_CLICK_LONG_CLICK = 1 << 5;
        const ONOFF_CLICK = 1 << 6;
        const ONOFF_LONG_CLICK = 1 << 7;
        const ONOFF_CLICK_LONG_CLICK = 1 << 8;
        const M_CLICK = 1 << 9;
        const M_LONG_CLICK = 1 << 10;
        const M_CLICK_LONG_CLICK = 1 << 11;
        /// Up and down pressed together, reported on release.
        const UPDOWN_CLICK = 1 << 12;
    }
}

/// Decoder channel order, matched by the event tables below.
const CHANNELS: [Buttons; 4] = [Buttons::UP, Buttons::DOWN, Buttons::ONOFF, Buttons::M];

const CLICK: [ButtonEvents; 4] = [
    ButtonEvents::UP_CLICK,
    ButtonEvents::DOWN_CLICK,
    ButtonEvents::ONOFF_CLICK,
    ButtonEvents::M_CLICK,
];

const LONG_CLICK: [ButtonEvents; 4] = [
    ButtonEvents::UP_LONG_CLICK,
    ButtonEvents::DOWN_LONG_CLICK,
    ButtonEvents::ONOFF_LONG_CLICK,
    ButtonEvents::M_LONG_CLICK,
];

const CLICK_LONG_CLICK: [ButtonEvents; 4] = [
    ButtonEvents::UP_CLICK_LONG_CLICK,
    ButtonEvents::DOWN_CLICK_LONG_CLICK,
    ButtonEvents::ONOFF_CLICK_LONG_CLICK,
    ButtonEvents::M_CLICK_LONG_CLICK,
];

/// Every event produced by the up or down button alone.
const UP_DOWN_EVENTS: ButtonEvents = ButtonEvents::UP_CLICK
    .union(ButtonEvents::UP_LONG_CLICK)
    .union(ButtonEvents::UP_CLICK_LONG_CLICK)
    .union(ButtonEvents::DOWN_CLICK)
    .union(ButtonEvents::DOWN_LONG_CLICK)
    .union(ButtonEvents::DOWN_CLICK_LONG_CLICK);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Edge {
    Click,
    LongClick,
    ClickLongClick,
}

/// Press timing for one button.
#[derive(Clone, Copy, Debug, Default)]
struct Channel {
    /// Ticks the button has been held, 0 when released.
    held_ticks: u16,
    /// Ticks since the last click, while still inside the click-long window.
    since_click: Option<u16>,
    /// This press started inside the click-long window.
    after_click: bool,
    /// The long click for this press was already reported.
    long_sent: bool,
}

impl Channel {
    fn tick(
        &mut self,
        down: bool,
    ) -> Option<Edge> {
        if down {
            if self.held_ticks == 0 {
                self.after_click = self.since_click.take().is_some();
            }
            self.held_ticks = self.held_ticks.saturating_add(1);

            if !self.long_sent && self.held_ticks >= LONG_CLICK_TICKS {
                self.long_sent = true;
                return Some(if self.after_click { Edge::ClickLongClick } else { Edge::LongClick });
            }
            return None;
        }

        if self.held_ticks > 0 {
            let edge = if self.long_sent {
                None
            } else {
                self.since_click = Some(0);
                Some(Edge::Click)
            };
            self.held_ticks = 0;
            self.long_sent = false;
            self.after_click = false;
            return edge;
        }

        if let Some(ticks) = self.since_click {
            let ticks = ticks + 1;
            self.since_click = (ticks < CLICK_LONG_CLICK_WINDOW_TICKS).then_some(ticks);
        }
        None
    }
}

/// Turns one level sample per tick into [`ButtonEvents`].
///
/// The decoder starts disarmed and reports nothing until every button has
/// been seen released, so the press that powered the unit on is not
/// mistaken for a power-off long click.
#[derive(Clone, Debug, Default)]
pub struct ButtonDecoder {
    channels: [Channel; 4],
    levels: Buttons,
    armed: bool,
    /// Up and down have been held together during the current press.
    combo: bool,
}

impl ButtonDecoder {
    pub const fn new() -> Self {
        const IDLE: Channel = Channel {
            held_ticks: 0,
            since_click: None,
            after_click: false,
            long_sent: false,
        };
        Self {
            channels: [IDLE; 4],
            levels: Buttons::empty(),
            armed: false,
            combo: false,
        }
    }

    /// Feed the levels sampled this tick, returns the events they complete.
    pub fn tick(
        &mut self,
        levels: Buttons,
    ) -> ButtonEvents {
        self.levels = levels;

        if !self.armed {
            self.armed = levels.is_empty();
            return ButtonEvents::empty();
        }

        if levels.contains(Buttons::UP | Buttons::DOWN) {
            self.combo = true;
        }

        let mut events = ButtonEvents::empty();
        for (i, button) in CHANNELS.iter().enumerate() {
            events |= match self.channels[i].tick(levels.contains(*button)) {
                Some(Edge::Click) => CLICK[i],
                Some(Edge::LongClick) => LONG_CLICK[i],
                Some(Edge::ClickLongClick) => CLICK_LONG_CLICK[i],
                None => ButtonEvents::empty(),
            };
        }

        if self.combo {
            events.remove(UP_DOWN_EVENTS);
            if !levels.intersects(Buttons::UP | Buttons::DOWN) {
                self.combo = false;
                self.channels[0].since_click = None;
                self.channels[1].since_click = None;
                events |= ButtonEvents::UPDOWN_CLICK;
            }
        }

        events
    }

    /// Buttons held at the last sample.
    #[inline]
    pub const fn levels(&self) -> Buttons {
        self.levels
    }

    /// True once the boot press has been released.
    #[inline]
    pub const fn is_armed(&self) -> bool {
        self.armed
    }
}
