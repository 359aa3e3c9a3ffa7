//! The in-place value editor.
//!
//! At most one editable is being edited at a time. Its value is converted to
//! display units once, when editing begins, and every increment works on
//! that cached copy so steps feel linear in the unit the user sees. The
//! target is written (converted back) only when editing ends.

use core::mem;

use crate::field::{EditValue, FieldArena, FieldId};
use crate::units::Units;

/// Owns the editable currently being edited and its working value.
#[derive(Debug, Default)]
pub struct EditController {
    active: Option<FieldId>,
    /// Working value in display units.
    value: u32,
    /// Value at `begin`, to skip no-op commits.
    initial: u32,
    /// The current up/down press already stepped through hold repeat.
    repeated: bool,
}

impl EditController {
    pub const fn new() -> Self {
        Self {
            active: None,
            value: 0,
            initial: 0,
            repeated: false,
        }
    }

    #[inline]
    pub const fn active(&self) -> Option<FieldId> {
        self.active
    }

    #[inline]
    pub fn is_active(
        &self,
        id: FieldId,
    ) -> bool {
        self.active == Some(id)
    }

    /// Working value in display units.
    #[inline]
    pub const fn value(&self) -> u32 {
        self.value
    }

    /// Start editing `id`, committing any edit in progress first.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not an editable.
    pub fn begin(
        &mut self,
        fields: &mut FieldArena<'_>,
        id: FieldId,
        units: Units,
    ) {
        self.end(fields, units);

        let field = &mut fields[id];
        let Some(editable) = field.as_editable() else {
            panic!("begin edit on a non-editable field");
        };
        self.value = editable.display_value(units);
        self.initial = self.value;
        self.active = Some(id);

        field.dirty = true;
        field.blink = true;
        crate::logging::debug!("edit begin field {} at {}", id.index(), self.value);
    }

    /// Commit the working value and stop editing.
    ///
    /// Returns whether an edit was in progress.
    pub fn end(
        &mut self,
        fields: &mut FieldArena<'_>,
        units: Units,
    ) -> bool {
        let Some(id) = self.active.take() else {
            return false;
        };
        let field = &mut fields[id];
        if let Some(editable) = field.as_editable()
            && self.value != self.initial
        {
            editable.commit(self.value, units);
            crate::logging::info!("edit commit field {} = {}", id.index(), self.value);
        }
        field.blink = false;
        field.dirty = true;
        true
    }

    pub fn increment(
        &mut self,
        fields: &FieldArena<'_>,
        units: Units,
    ) {
        self.step(fields, units, true);
    }

    pub fn decrement(
        &mut self,
        fields: &FieldArena<'_>,
        units: Units,
    ) {
        self.step(fields, units, false);
    }

    /// Step for a click. A press that already repeated while held does not
    /// step again on release.
    pub(crate) fn click_step(
        &mut self,
        fields: &FieldArena<'_>,
        units: Units,
        up: bool,
    ) {
        if !mem::take(&mut self.repeated) {
            self.step(fields, units, up);
        }
    }

    /// Step while a button is held, polled once per blink phase.
    pub(crate) fn hold_step(
        &mut self,
        fields: &FieldArena<'_>,
        units: Units,
        up: bool,
    ) {
        self.repeated = true;
        self.step(fields, units, up);
    }

    /// A new up or down press began.
    pub(crate) fn press_started(&mut self) {
        self.repeated = false;
    }

    fn step(
        &mut self,
        fields: &FieldArena<'_>,
        units: Units,
        up: bool,
    ) {
        let Some(id) = self.active else {
            return;
        };
        let Some(editable) = fields[id].as_editable() else {
            return;
        };
        self.value = match &editable.value {
            EditValue::Number { format, .. } => {
                let min = units.to_display(format.min, format.units);
                let max = units.to_display(format.max, format.units);
                wrap_step(self.value, format.step.max(1), min, max, up)
            }
            EditValue::Choice { options, .. } => {
                let n = options.len() as u32;
                match n {
                    0 => 0,
                    _ if up => (self.value % n + 1) % n,
                    _ => (self.value % n + n - 1) % n,
                }
            }
            EditValue::Text(_) => self.value,
        };
    }
}

/// One step in `min..=max`, leaving the range wraps to the other end.
fn wrap_step(
    value: u32,
    step: u32,
    min: u32,
    max: u32,
    up: bool,
) -> u32 {
    let v = if up {
        i64::from(value) + i64::from(step)
    } else {
        i64::from(value) - i64::from(step)
    };
    if v < i64::from(min) {
        max
    } else if v > i64::from(max) {
        min
    } else {
        v as u32
    }
}


#[cfg(test)]
mod editor_proptests {
    use core::sync::atomic::AtomicU16;

    use super::*;
    use crate::field::{Field, NumberFormat};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn number_edits_stay_in_bounds(
            min in 0u32..500,
            span in 0u32..500,
            step in 0u32..50,
            moves in proptest::collection::vec(any::<bool>(), 0..100),
        ) {
            let max = min + span;
            let target = AtomicU16::new(min as u16);
            let mut fields = FieldArena::new();
            let id = fields
                .add(Field::number("v", &target, NumberFormat::new("").range(min, max).step(step)))
                .unwrap();
            let mut edit = EditController::new();
            edit.begin(&mut fields, id, Units::METRIC);

            for up in moves {
                if up {
                    edit.increment(&fields, Units::METRIC);
                } else {
                    edit.decrement(&fields, Units::METRIC);
                }
                prop_assert!((min..=max).contains(&edit.value()));
            }
        }
    }
}
