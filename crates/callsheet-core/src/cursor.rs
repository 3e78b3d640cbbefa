use crate::roster::RosterStore;

/// Caller-owned position of a sequential dial-out pass.
///
/// Holds the index of the last dialed row. [`RosterStore::next_callable`]
/// does the scanning; the cursor only decides when to move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCursor {
    last: Option<usize>,
}

impl CallCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(index: usize) -> Self {
        Self { last: Some(index) }
    }

    pub fn current(&self) -> Option<usize> {
        self.last
    }

    /// Moves to the next callable row and returns its index. Once the pass
    /// is exhausted the cursor stays where it is and `None` is returned.
    pub fn advance(&mut self, store: &RosterStore) -> Option<usize> {
        let next = store.next_callable(self.last)?;
        self.last = Some(next);
        Some(next)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }

    /// Keeps the cursor on the same logical position after the row at
    /// `index` was removed.
    pub fn on_deleted(&mut self, index: usize) {
        if let Some(current) = self.last {
            if index <= current {
                self.last = current.checked_sub(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CallCursor;
    use crate::domain::NewHotelContact;
    use crate::roster::RosterStore;

    fn store(phones: &[&str]) -> RosterStore {
        RosterStore::from_seed(
            "+234",
            phones.iter().map(|phone| NewHotelContact {
                name: "Hotel".to_string(),
                phone_number: phone.to_string(),
                ..Default::default()
            }),
        )
    }

    #[test]
    fn advance_walks_callable_rows() {
        let store = store(&["1", "", "2"]);
        let mut cursor = CallCursor::new();
        assert_eq!(cursor.advance(&store), Some(0));
        assert_eq!(cursor.advance(&store), Some(2));
        assert_eq!(cursor.advance(&store), None);
        assert_eq!(cursor.current(), Some(2));
    }

    #[test]
    fn reset_starts_a_new_pass() {
        let store = store(&["1", "2"]);
        let mut cursor = CallCursor::at(1);
        assert_eq!(cursor.advance(&store), None);
        cursor.reset();
        assert_eq!(cursor.advance(&store), Some(0));
    }

    #[test]
    fn on_deleted_shifts_cursor_back() {
        let mut store = store(&["1", "2", "3"]);
        let mut cursor = CallCursor::at(1);
        let first = store.ids()[0];
        let index = store.index_of(first).unwrap();
        store.delete(first);
        cursor.on_deleted(index);
        assert_eq!(cursor.current(), Some(0));
        assert_eq!(cursor.advance(&store), Some(1));
        assert_eq!(store.get_index(1).unwrap().phone_number, "3");
    }

    #[test]
    fn on_deleted_of_current_row_revisits_its_successor() {
        let mut cursor = CallCursor::at(0);
        cursor.on_deleted(0);
        assert_eq!(cursor.current(), None);

        let mut cursor = CallCursor::at(2);
        cursor.on_deleted(4);
        assert_eq!(cursor.current(), Some(2));
    }
}
