//! Nested scrollable menus.
//!
//! The navigator keeps a bounded stack of open scrollables. The first
//! scrollable rendered on a screen becomes the root; selecting a child
//! scrollable pushes it, and the root's layout then shows the innermost one.
//! Only the root is ever checked for dirtiness by the screen's render pass,
//! so every change here marks the root.

use core::mem;

use heapless::Vec;

use crate::config::{MAX_SCROLLABLE_DEPTH, MAX_SCROLLABLE_ROWS};
use crate::field::{FieldArena, FieldId};
use crate::layout::FieldLayout;

pub struct Navigator {
    stack: Vec<FieldId, MAX_SCROLLABLE_DEPTH>,
    relayout: bool,
    /// Rows on one screen, heading included.
    rows_per_screen: usize,
    /// Laid out rows of the expanded scrollable.
    pub(crate) rows: Vec<FieldLayout, MAX_SCROLLABLE_ROWS>,
}

impl Navigator {
    /// # Panics
    ///
    /// Panics unless a heading and at least one data row fit the row table.
    pub fn new(rows_per_screen: usize) -> Self {
        assert!(
            (2..=MAX_SCROLLABLE_ROWS).contains(&rows_per_screen),
            "scrollable row count out of range"
        );
        Self {
            stack: Vec::new(),
            relayout: true,
            rows_per_screen,
            rows: Vec::new(),
        }
    }

    /// Forget every open scrollable (screen switch).
    pub fn reset(&mut self) {
        self.stack.clear();
        self.rows.clear();
        self.relayout = true;
    }

    /// Innermost open scrollable.
    #[inline]
    pub fn active(&self) -> Option<FieldId> {
        self.stack.last().copied()
    }

    /// Outermost open scrollable, the one placed on the screen.
    #[inline]
    pub fn root(&self) -> Option<FieldId> {
        self.stack.first().copied()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub const fn rows_per_screen(&self) -> usize {
        self.rows_per_screen
    }

    /// Data rows visible below the heading.
    #[inline]
    pub const fn visible_rows(&self) -> usize {
        self.rows_per_screen - 1
    }

    /// Open `id` on top of the stack.
    ///
    /// # Panics
    ///
    /// Panics if the stack is full or `id` is not a scrollable.
    pub fn enter(
        &mut self,
        fields: &mut FieldArena<'_>,
        id: FieldId,
    ) {
        assert!(fields[id].as_scrollable().is_some(), "enter on a non-scrollable field");
        if self.stack.push(id).is_err() {
            panic!("scrollables nested deeper than {}", MAX_SCROLLABLE_DEPTH);
        }
        // children may blink
        fields[id].blink = true;
        self.force_relayout(fields);
        crate::logging::debug!("scrollable enter field {} depth {}", id.index(), self.stack.len());
    }

    /// Close the innermost scrollable.
    ///
    /// Returns `true` while a parent scrollable is still open, `false` once
    /// the root was closed, so the caller can let the press fall through.
    ///
    /// # Panics
    ///
    /// Panics if no scrollable is open.
    pub fn exit(
        &mut self,
        fields: &mut FieldArena<'_>,
    ) -> bool {
        assert!(self.stack.pop().is_some(), "exit with no open scrollable");
        crate::logging::debug!("scrollable exit, depth {}", self.stack.len());
        if self.stack.is_empty() {
            return false;
        }
        self.force_relayout(fields);
        true
    }

    pub fn move_up(
        &mut self,
        fields: &mut FieldArena<'_>,
    ) {
        self.move_selection(fields, false);
    }

    pub fn move_down(
        &mut self,
        fields: &mut FieldArena<'_>,
    ) {
        self.move_selection(fields, true);
    }

    fn move_selection(
        &mut self,
        fields: &mut FieldArena<'_>,
        down: bool,
    ) {
        let Some(id) = self.active() else {
            return;
        };
        let count = fields.entry_count(id);
        let visible = self.visible_rows();

        // erase the cursor on the entry being left
        if let Some(left) = fields.selected_entry(id) {
            fields[left].dirty = true;
        }

        let Some(s) = fields[id].as_scrollable_mut() else {
            return;
        };
        if down {
            if s.selected + 1 < count {
                s.selected += 1;
            }
            if s.selected >= s.first + visible {
                s.first = s.selected + 1 - visible;
            }
        } else {
            s.selected = s.selected.saturating_sub(1);
            if s.selected < s.first {
                s.first = s.selected;
            }
        }
        self.force_relayout(fields);
    }

    /// Redraw the open menu from scratch on the next pass.
    pub fn force_relayout(
        &mut self,
        fields: &mut FieldArena<'_>,
    ) {
        if let Some(root) = self.root() {
            fields[root].dirty = true;
            self.relayout = true;
        }
    }

    /// Consume the relayout request.
    pub(crate) fn take_relayout(&mut self) -> bool {
        mem::replace(&mut self.relayout, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;

    fn menu(
        fields: &mut FieldArena<'_>,
        entries: usize,
    ) -> FieldId {
        let ids: std::vec::Vec<FieldId> = (0..entries).map(|_| fields.add(Field::fill()).unwrap()).collect();
        fields.add(Field::scrollable("menu", &ids).unwrap()).unwrap()
    }

    fn position(
        fields: &FieldArena<'_>,
        id: FieldId,
    ) -> (usize, usize) {
        let s = fields[id].as_scrollable().unwrap();
        (s.selected, s.first)
    }

    #[test]
    fn test_scroll_down_past_window() {
        let mut fields = FieldArena::new();
        let id = menu(&mut fields, 10);
        // heading plus four data rows
        let mut nav = Navigator::new(5);
        nav.enter(&mut fields, id);

        for _ in 0..7 {
            nav.move_down(&mut fields);
        }
        assert_eq!(position(&fields, id), (7, 4));
    }

    #[test]
    fn test_selection_clamps_at_ends() {
        let mut fields = FieldArena::new();
        let id = menu(&mut fields, 3);
        let mut nav = Navigator::new(5);
        nav.enter(&mut fields, id);

        nav.move_up(&mut fields);
        assert_eq!(position(&fields, id), (0, 0));
        for _ in 0..5 {
            nav.move_down(&mut fields);
        }
        assert_eq!(position(&fields, id), (2, 0));
    }

    #[test]
    fn test_scroll_back_up() {
        let mut fields = FieldArena::new();
        let id = menu(&mut fields, 10);
        let mut nav = Navigator::new(5);
        nav.enter(&mut fields, id);
        for _ in 0..9 {
            nav.move_down(&mut fields);
        }
        for _ in 0..7 {
            nav.move_up(&mut fields);
        }
        assert_eq!(position(&fields, id), (2, 2));
    }

    #[test]
    fn test_move_marks_left_entry_dirty() {
        let mut fields = FieldArena::new();
        let id = menu(&mut fields, 3);
        let first = fields.selected_entry(id).unwrap();
        let mut nav = Navigator::new(5);
        nav.enter(&mut fields, id);
        fields[first].dirty = false;

        nav.move_down(&mut fields);
        assert!(fields[first].dirty);
        assert!(nav.take_relayout());
        assert!(!nav.take_relayout());
    }

    #[test]
    fn test_enter_and_exit() {
        let mut fields = FieldArena::new();
        let inner = menu(&mut fields, 2);
        let outer = fields.add(Field::scrollable("outer", &[inner]).unwrap()).unwrap();
        let mut nav = Navigator::new(5);

        nav.enter(&mut fields, outer);
        nav.enter(&mut fields, inner);
        assert_eq!(nav.active(), Some(inner));
        assert_eq!(nav.root(), Some(outer));
        assert!(fields[inner].blink);

        fields[outer].dirty = false;
        assert!(nav.exit(&mut fields));
        assert!(fields[outer].dirty);
        assert!(!nav.exit(&mut fields));
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    #[should_panic(expected = "nested deeper")]
    fn test_depth_limit() {
        let mut fields = FieldArena::new();
        let id = menu(&mut fields, 1);
        let mut nav = Navigator::new(5);
        for _ in 0..=MAX_SCROLLABLE_DEPTH {
            nav.enter(&mut fields, id);
        }
    }
}

#[cfg(test)]
mod navigator_proptests {
    use super::*;
    use crate::field::Field;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn selection_stays_in_window(
            entries in 1usize..16,
            rows in 2usize..8,
            moves in proptest::collection::vec(any::<bool>(), 0..64),
        ) {
            let mut fields = FieldArena::new();
            let ids: std::vec::Vec<FieldId> = (0..entries).map(|_| fields.add(Field::fill()).unwrap()).collect();
            let id = fields.add(Field::scrollable("menu", &ids).unwrap()).unwrap();
            let mut nav = Navigator::new(rows);
            nav.enter(&mut fields, id);
            let visible = nav.visible_rows();

            for down in moves {
                if down {
                    nav.move_down(&mut fields);
                } else {
                    nav.move_up(&mut fields);
                }
                let s = fields[id].as_scrollable().unwrap();
                prop_assert!(s.selected < entries);
                prop_assert!(s.first <= s.selected);
                prop_assert!(s.selected < s.first + visible);
            }
        }
    }
}
