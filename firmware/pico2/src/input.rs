//! Button pin sampling.
//!
//! The four buttons pull their GPIO low when pressed (internal pull-ups).
//! Pin mapping on the Pimoroni PIM715 Display Pack:
//!
//! | GPIO | Pack label | Button |
//! |---|---|---|
//! | 12 | A | up |
//! | 13 | B | down |
//! | 14 | X | on/off |
//! | 15 | Y | M |
//!
//! Debouncing and click decoding happen in the shared
//! [`ButtonDecoder`](ebike_display_common::ButtonDecoder), which samples once
//! per UI tick. At 20 ms per tick that also rides out contact bounce.

use ebike_display_common::Buttons;

/// Raw pin levels of one sample, `true` meaning the pin reads low.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonPins {
    pub up_low: bool,
    pub down_low: bool,
    pub onoff_low: bool,
    pub m_low: bool,
}

impl ButtonPins {
    /// Buttons held in this sample.
    pub fn levels(self) -> Buttons {
        let mut held = Buttons::empty();
        held.set(Buttons::UP, self.up_low);
        held.set(Buttons::DOWN, self.down_low);
        held.set(Buttons::ONOFF, self.onoff_low);
        held.set(Buttons::M, self.m_low);
        held
    }
}
