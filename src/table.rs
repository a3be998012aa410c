//! Timer table — fixed array of slots
//!
//! Static slot storage, no dynamic allocation. A slot is armed iff it
//! holds a [`Timer`]; scans always run from the lowest index up.
//!
//! Author: Moroya Sakamoto

use crate::timer::{Timer, TimerId, TIMER_MAX};

/// Fixed-capacity timer table
///
/// Size: N × sizeof(Option<Timer<A>>)
pub struct TimerTable<A, const N: usize = TIMER_MAX> {
    slots: [Option<Timer<A>>; N],
}

impl<A: Copy, const N: usize> TimerTable<A, N> {
    /// Create a table with every slot free
    pub const fn new() -> Self {
        Self { slots: [None; N] }
    }

    /// Free every slot
    pub(crate) fn clear_all(&mut self) {
        self.slots = [None; N];
    }

    /// Number of slots
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index of the first free slot
    pub fn find_free(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Index of the slot armed with `id`
    pub fn position(&self, id: TimerId) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, Some(t) if t.id == id))
    }

    /// Timer at `idx`, if armed
    pub fn get(&self, idx: usize) -> Option<&Timer<A>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Timer armed with `id`
    pub fn find(&self, id: TimerId) -> Option<&Timer<A>> {
        self.position(id).and_then(|idx| self.get(idx))
    }

    /// Place a timer into slot `idx`, replacing whatever was there
    ///
    /// Returns false (and stores nothing) if `idx` is out of range.
    /// Callers pass an index from `find_free` and a fresh id.
    pub(crate) fn insert(&mut self, idx: usize, timer: Timer<A>) -> bool {
        match self.slots.get_mut(idx) {
            Some(slot) => {
                *slot = Some(timer);
                true
            }
            None => false,
        }
    }

    /// Free slot `idx`; out-of-range indices are ignored
    pub(crate) fn clear(&mut self, idx: usize) {
        if let Some(slot) = self.slots.get_mut(idx) {
            *slot = None;
        }
    }

    /// Free slot `idx` only if it is still armed with `id`
    ///
    /// Returns true if the slot was cleared.
    pub(crate) fn clear_if(&mut self, idx: usize, id: TimerId) -> bool {
        let armed_with_id = matches!(self.slots.get(idx), Some(Some(t)) if t.id == id);
        if armed_with_id {
            self.clear(idx);
        }
        armed_with_id
    }

    /// Number of armed slots
    pub fn armed_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Is every slot armed?
    pub fn is_full(&self) -> bool {
        self.find_free().is_none()
    }

    /// Armed timers with their slot index, lowest index first
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Timer<A>)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|t| (idx, t)))
    }
}

impl<A: Copy, const N: usize> Default for TimerTable<A, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u32) -> TimerId {
        TimerId::new(raw).unwrap()
    }

    fn armed(raw: u32) -> Timer<u8> {
        Timer::new(id(raw), 100, 0, None, 0)
    }

    #[test]
    fn test_table_empty() {
        let table: TimerTable<u8, 4> = TimerTable::new();
        assert_eq!(table.capacity(), 4);
        assert_eq!(table.armed_count(), 0);
        assert_eq!(table.find_free(), Some(0));
    }

    #[test]
    fn test_first_free_is_lowest_index() {
        let mut table: TimerTable<u8, 4> = TimerTable::new();
        table.insert(0, armed(1));
        table.insert(1, armed(2));
        table.insert(2, armed(3));
        table.clear(1);
        assert_eq!(table.find_free(), Some(1));
    }

    #[test]
    fn test_full_table() {
        let mut table: TimerTable<u8, 2> = TimerTable::new();
        table.insert(0, armed(1));
        table.insert(1, armed(2));
        assert!(table.is_full());
        assert_eq!(table.find_free(), None);
    }

    #[test]
    fn test_position_by_id() {
        let mut table: TimerTable<u8, 4> = TimerTable::new();
        table.insert(2, armed(9));
        assert_eq!(table.position(id(9)), Some(2));
        assert_eq!(table.position(id(10)), None);
        assert_eq!(table.find(id(9)).map(|t| t.duration_ms), Some(100));
    }

    #[test]
    fn test_clear_if_compares_id() {
        let mut table: TimerTable<u8, 2> = TimerTable::new();
        table.insert(0, armed(5));
        assert!(!table.clear_if(0, id(6)));
        assert_eq!(table.armed_count(), 1);
        assert!(table.clear_if(0, id(5)));
        assert_eq!(table.armed_count(), 0);
        assert!(!table.clear_if(0, id(5)));
    }

    #[test]
    fn test_iter_order() {
        let mut table: TimerTable<u8, 4> = TimerTable::new();
        table.insert(3, armed(1));
        table.insert(1, armed(2));
        let mut seen = [0usize; 2];
        for (n, (idx, _)) in table.iter().enumerate() {
            seen[n] = idx;
        }
        assert_eq!(seen, [1, 3]);
    }

    #[test]
    fn test_out_of_range_index_is_ignored() {
        let mut table: TimerTable<u8, 2> = TimerTable::new();
        assert!(!table.insert(2, armed(1)));
        assert_eq!(table.armed_count(), 0);

        assert!(table.insert(1, armed(4)));
        table.clear(7);
        assert!(!table.clear_if(7, id(4)));
        assert_eq!(table.position(id(4)), Some(1));
    }

    #[test]
    fn test_clear_all() {
        let mut table: TimerTable<u8, 3> = TimerTable::new();
        table.insert(0, armed(1));
        table.insert(2, armed(2));
        table.clear_all();
        assert_eq!(table.armed_count(), 0);
        assert_eq!(table.get(2).map(|t| t.id), None);
    }
}
