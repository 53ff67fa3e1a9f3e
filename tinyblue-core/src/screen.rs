//! Screens
//!
//! A screen is a fixed list of items plus the focus (cursor) and the scroll
//! window mapping items onto display rows.

use heapless::Vec;

use crate::config::MAX_ITEMS;
use crate::error::NavError;
use crate::input::Direction;
use crate::item::Item;

/// Outcome of a cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CursorMove {
    /// Window stayed put; only the focused row changed
    ///
    /// Both rows are display rows, not item slots.
    Cursor { from_row: usize, to_row: usize },
    /// Window scrolled; every visible row shows a different item
    Scrolled,
    /// Cursor did not move (end of a non-wrapping list)
    Unchanged,
}

/// An ordered list of items with cursor and scroll state
#[derive(Debug, Clone)]
pub struct Screen<A> {
    items: Vec<Item<A>, MAX_ITEMS>,
    /// Focused item slot
    cursor: usize,
    /// Slot shown on display row 0
    top: usize,
}

impl<A> Screen<A> {
    /// Create a screen from its items, in display order
    ///
    /// An empty screen is accepted here but refused by the engine.
    pub fn new<I>(items: I) -> Result<Self, NavError>
    where
        I: IntoIterator<Item = Item<A>>,
    {
        let mut list = Vec::new();
        for item in items {
            list.push(item).map_err(|_| NavError::ScreenFull)?;
        }
        Ok(Self {
            items: list,
            cursor: 0,
            top: 0,
        })
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the screen has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Focused slot
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Slot shown on the first display row
    pub fn window_top(&self) -> usize {
        self.top
    }

    /// Item at `slot`
    pub fn item(&self, slot: usize) -> Option<&Item<A>> {
        self.items.get(slot)
    }

    /// Mutable item at `slot`
    pub fn item_mut(&mut self, slot: usize) -> Option<&mut Item<A>> {
        self.items.get_mut(slot)
    }

    /// All items in display order
    pub fn items(&self) -> &[Item<A>] {
        &self.items
    }

    /// Focused item, `None` only for an empty screen
    pub fn current_item(&self) -> Option<&Item<A>> {
        self.items.get(self.cursor)
    }

    /// Display row of `slot` if it is inside the window of `rows` lines
    pub fn visible_row(&self, slot: usize, rows: usize) -> Option<usize> {
        if slot < self.items.len() && slot >= self.top && slot < self.top + rows {
            Some(slot - self.top)
        } else {
            None
        }
    }

    /// Display row of the cursor
    pub fn cursor_row(&self) -> usize {
        self.cursor - self.top
    }

    /// Move the cursor one step and scroll it into view
    ///
    /// With `wrap`, moving past the last item focuses the first and vice
    /// versa; without it the cursor stays at the end.
    pub fn cursor_move(&mut self, direction: Direction, wrap: bool, rows: usize) -> CursorMove {
        let len = self.items.len();
        if len == 0 {
            return CursorMove::Unchanged;
        }

        let next = match direction {
            Direction::Forward if self.cursor + 1 < len => self.cursor + 1,
            Direction::Forward if wrap => 0,
            Direction::Backward if self.cursor > 0 => self.cursor - 1,
            Direction::Backward if wrap => len - 1,
            _ => return CursorMove::Unchanged,
        };

        let from_row = self.cursor_row();
        let old_top = self.top;
        self.cursor = next;
        self.scroll_into_view(rows);

        if self.top != old_top {
            CursorMove::Scrolled
        } else {
            CursorMove::Cursor {
                from_row,
                to_row: self.cursor_row(),
            }
        }
    }

    /// Scroll the minimum needed to bring the cursor into the window
    fn scroll_into_view(&mut self, rows: usize) {
        let rows = rows.max(1);
        if self.cursor < self.top {
            self.top = self.cursor;
        } else if self.cursor >= self.top + rows {
            self.top = self.cursor + 1 - rows;
        }
    }

    /// Focus the first item again
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.top = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn screen(labels: &[&str]) -> Screen<()> {
        Screen::new(labels.iter().map(|l| Item::new(l).unwrap())).unwrap()
    }

    fn numbered(n: usize) -> Screen<()> {
        Screen::new((0..n).map(|_| Item::new("item").unwrap())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let s = screen(&["A", "B"]);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.window_top(), 0);
        assert_eq!(s.current_item().unwrap().text(), "A");
    }

    #[test]
    fn test_scroll_down_and_wrap() {
        let mut s = screen(&["A", "B", "C", "D"]);

        assert_eq!(
            s.cursor_move(Direction::Forward, true, 2),
            CursorMove::Cursor { from_row: 0, to_row: 1 }
        );
        assert_eq!(s.cursor_move(Direction::Forward, true, 2), CursorMove::Scrolled);
        assert_eq!((s.cursor(), s.window_top()), (2, 1));
        assert_eq!(s.cursor_move(Direction::Forward, true, 2), CursorMove::Scrolled);
        assert_eq!((s.cursor(), s.window_top()), (3, 2));
        assert_eq!(s.current_item().unwrap().text(), "D");

        // Wrap to the top
        assert_eq!(s.cursor_move(Direction::Forward, true, 2), CursorMove::Scrolled);
        assert_eq!((s.cursor(), s.window_top()), (0, 0));
    }

    #[test]
    fn test_scroll_up_wraps_to_last() {
        let mut s = screen(&["A", "B", "C", "D"]);
        assert_eq!(s.cursor_move(Direction::Backward, true, 2), CursorMove::Scrolled);
        assert_eq!((s.cursor(), s.window_top()), (3, 2));

        // Moving up inside the window does not scroll
        assert_eq!(
            s.cursor_move(Direction::Backward, true, 2),
            CursorMove::Cursor { from_row: 1, to_row: 0 }
        );
        assert_eq!((s.cursor(), s.window_top()), (2, 2));
    }

    #[test]
    fn test_no_wrap_stops_at_ends() {
        let mut s = screen(&["A", "B"]);
        assert_eq!(s.cursor_move(Direction::Backward, false, 2), CursorMove::Unchanged);
        s.cursor_move(Direction::Forward, false, 2);
        assert_eq!(s.cursor_move(Direction::Forward, false, 2), CursorMove::Unchanged);
        assert_eq!(s.cursor(), 1);
    }

    #[test]
    fn test_single_item_wraps_onto_itself() {
        let mut s = screen(&["Only"]);
        assert_eq!(
            s.cursor_move(Direction::Forward, true, 2),
            CursorMove::Cursor { from_row: 0, to_row: 0 }
        );
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn test_fewer_items_than_rows() {
        let mut s = screen(&["A", "B"]);
        s.cursor_move(Direction::Backward, true, 4);
        assert_eq!((s.cursor(), s.window_top()), (1, 0));
    }

    #[test]
    fn test_visible_row() {
        let mut s = screen(&["A", "B", "C", "D"]);
        s.cursor_move(Direction::Backward, true, 2);
        assert_eq!(s.visible_row(0, 2), None);
        assert_eq!(s.visible_row(2, 2), Some(0));
        assert_eq!(s.visible_row(3, 2), Some(1));
        assert_eq!(s.visible_row(9, 2), None);
    }

    #[test]
    fn test_reset() {
        let mut s = screen(&["A", "B", "C"]);
        s.cursor_move(Direction::Backward, true, 2);
        s.reset();
        assert_eq!((s.cursor(), s.window_top()), (0, 0));
    }

    #[test]
    fn test_too_many_items() {
        let result = Screen::<()>::new((0..=MAX_ITEMS).map(|_| Item::new("x").unwrap()));
        assert_eq!(result.unwrap_err(), NavError::ScreenFull);
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Forward), Just(Direction::Backward)]
    }

    proptest! {
        #[test]
        fn prop_window_invariants(
            n in 1usize..=MAX_ITEMS,
            rows in 1usize..=4,
            wrap in any::<bool>(),
            moves in proptest::collection::vec(direction(), 0..64),
        ) {
            let mut s = numbered(n);
            for dir in moves {
                s.cursor_move(dir, wrap, rows);
                prop_assert!(s.cursor() < n);
                prop_assert!(s.window_top() <= s.cursor());
                prop_assert!(s.cursor() < s.window_top() + rows);
                prop_assert!(s.window_top() <= n.saturating_sub(rows));
            }
        }

        #[test]
        fn prop_full_cycle(
            n in 1usize..=MAX_ITEMS,
            rows in 1usize..=4,
            start in 0usize..MAX_ITEMS,
        ) {
            let mut s = numbered(n);
            for _ in 0..(start % n) {
                s.cursor_move(Direction::Forward, true, rows);
            }
            let origin = s.cursor();

            for _ in 0..n {
                s.cursor_move(Direction::Forward, true, rows);
            }
            prop_assert_eq!(s.cursor(), origin);

            for _ in 0..n {
                s.cursor_move(Direction::Backward, true, rows);
            }
            prop_assert_eq!(s.cursor(), origin);
        }
    }
}
