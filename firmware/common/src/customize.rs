//! Swapping what a customizable slot shows.
//!
//! While customizing, one slot on the screen blinks; "up" cycles its choice
//! and "down" moves to the next slot. The selector lives outside the UI, so
//! the screen's `on_customized` hook is the place to persist it.

use core::sync::atomic::Ordering;

use crate::field::{FieldArena, FieldId, FieldKind, Variant};
use crate::graph::GraphSlot;
use crate::layout::FieldLayout;

#[derive(Debug, Default)]
pub struct CustomizeController {
    current: Option<FieldId>,
}

impl CustomizeController {
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Slot being customized.
    #[inline]
    pub const fn current(&self) -> Option<FieldId> {
        self.current
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Drop customizing state without notifying anyone (screen switch).
    pub fn reset(&mut self) {
        self.current = None;
    }

    /// Move to the slot after the current one in `layouts`, wrapping to the
    /// first. Stays idle when the screen has no slots.
    pub fn select_next(
        &mut self,
        fields: &mut FieldArena<'_>,
        layouts: &[FieldLayout],
    ) {
        if let Some(current) = self.current {
            let (choice, _) = fields.resolve(current);
            fields[choice].dirty = true;
        }

        let mut first = None;
        let mut want_next = false;
        let mut next = None;
        for id in layouts.iter().map(|l| l.field) {
            if fields[id].variant() != Variant::Customizable {
                continue;
            }
            first.get_or_insert(id);
            if want_next {
                next = Some(id);
                break;
            }
            want_next = self.current == Some(id);
        }

        self.current = next.or(first);
        if self.current.is_some() {
            crate::logging::debug!("customizing next slot");
        }
    }

    /// Show the next choice in the current slot.
    ///
    /// Leaving a graph discards its history, so coming back to it starts fresh.
    pub fn advance_choice(
        &mut self,
        fields: &mut FieldArena<'_>,
        graph: &mut GraphSlot,
    ) {
        let Some(slot) = self.current else {
            return;
        };
        let FieldKind::Customizable(c) = &fields[slot].kind else {
            unreachable!("customizing a field that is not a customizable slot");
        };
        let old = c.active();
        let next = (c.active_index() + 1) % c.choices.len();
        c.selector.store(next as u8, Ordering::Relaxed);

        if fields[old].variant() == Variant::Graph {
            graph.release();
        }
        fields[old].dirty = true;
        let (new, _) = fields.resolve(slot);
        fields[new].dirty = true;
        crate::logging::debug!("slot {} shows choice {}", slot.index(), next);
    }

    /// Finish customizing. Returns whether a slot was being customized.
    pub fn stop(
        &mut self,
        fields: &mut FieldArena<'_>,
    ) -> bool {
        let Some(slot) = self.current.take() else {
            return false;
        };
        let (choice, _) = fields.resolve(slot);
        fields[choice].dirty = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicU8, AtomicU16};

    use super::*;
    use crate::field::{Field, NumberFormat};

    #[test]
    fn test_select_next_wraps_over_slots() {
        static A: AtomicU8 = AtomicU8::new(0);
        static B: AtomicU8 = AtomicU8::new(0);
        let mut fields = FieldArena::new();
        let fill = fields.add(Field::fill()).unwrap();
        let a = fields.add(Field::customizable(&A, &[fill]).unwrap()).unwrap();
        let b = fields.add(Field::customizable(&B, &[fill]).unwrap()).unwrap();
        let layouts = [FieldLayout::new(fill), FieldLayout::new(a), FieldLayout::new(b)];
        let mut customize = CustomizeController::new();

        customize.select_next(&mut fields, &layouts);
        assert_eq!(customize.current(), Some(a));
        customize.select_next(&mut fields, &layouts);
        assert_eq!(customize.current(), Some(b));
        customize.select_next(&mut fields, &layouts);
        assert_eq!(customize.current(), Some(a));
    }

    #[test]
    fn test_no_slots_stays_idle() {
        let mut fields = FieldArena::new();
        let fill = fields.add(Field::fill()).unwrap();
        let mut customize = CustomizeController::new();
        customize.select_next(&mut fields, &[FieldLayout::new(fill)]);
        assert!(!customize.is_active());
    }

    #[test]
    fn test_advance_choice_wraps() {
        static SEL: AtomicU8 = AtomicU8::new(1);
        let mut fields = FieldArena::new();
        let x = fields.add(Field::fill()).unwrap();
        let y = fields.add(Field::mesh()).unwrap();
        let slot = fields.add(Field::customizable(&SEL, &[x, y]).unwrap()).unwrap();
        let mut customize = CustomizeController::new();
        let mut graph = GraphSlot::new();

        customize.select_next(&mut fields, &[FieldLayout::new(slot)]);
        customize.advance_choice(&mut fields, &mut graph);
        assert_eq!(SEL.load(Ordering::Relaxed), 0);
        assert_eq!(fields.resolve(slot).0, x);
        assert!(fields[x].dirty && fields[y].dirty);

        assert!(customize.stop(&mut fields));
        assert!(!customize.stop(&mut fields));
    }

    #[test]
    fn test_graph_history_cleared_when_switching_away_and_back() {
        static SEL: AtomicU8 = AtomicU8::new(0);
        static TEMP: AtomicU16 = AtomicU16::new(40);
        let mut fields = FieldArena::new();
        let source = fields.add(Field::readonly_number("temp", &TEMP, NumberFormat::new("C"))).unwrap();
        let graph_id = fields.add(Field::graph(source, None, None, 0)).unwrap();
        let slot = fields.add(Field::customizable(&SEL, &[graph_id, source]).unwrap()).unwrap();
        let mut customize = CustomizeController::new();
        let mut graph = GraphSlot::new();

        let cache = graph.claim(graph_id);
        cache.add_point(40, 0);
        cache.add_point(41, 0);

        customize.select_next(&mut fields, &[FieldLayout::new(slot)]);
        customize.advance_choice(&mut fields, &mut graph);
        customize.advance_choice(&mut fields, &mut graph);
        assert_eq!(fields.resolve(slot).0, graph_id);

        assert!(graph.claim(graph_id).is_empty());
    }
}
