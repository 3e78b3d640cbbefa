use crate::domain::HotelId;
use crate::roster::RosterStore;
use std::collections::BTreeSet;

/// Ids checked for bulk action. Owned by the view, not the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<HotelId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Some(usize),
    All,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = HotelId>,
    {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: HotelId) -> bool {
        self.ids.contains(&id)
    }

    /// Flips membership of `id`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: HotelId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn remove(&mut self, id: HotelId) -> bool {
        self.ids.remove(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = HotelId> + '_ {
        self.ids.iter().copied()
    }

    pub fn retain_existing(&mut self, store: &RosterStore) {
        self.ids.retain(|id| store.get(*id).is_some());
    }

    pub fn contains_all(&self, ids: &[HotelId]) -> bool {
        ids.iter().all(|id| self.ids.contains(id))
    }

    pub fn state(&self, all_ids: &[HotelId]) -> SelectionState {
        if !all_ids.is_empty() && self.contains_all(all_ids) {
            SelectionState::All
        } else if self.is_empty() {
            SelectionState::None
        } else {
            SelectionState::Some(self.len())
        }
    }
}

/// "Select all" as a toggle: a selection that already covers `all_ids`
/// becomes empty, anything else becomes exactly `all_ids`.
pub fn select_all(current: &Selection, all_ids: &[HotelId]) -> Selection {
    if current.contains_all(all_ids) {
        Selection::new()
    } else {
        Selection::from_ids(all_ids.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::{select_all, Selection, SelectionState};
    use crate::domain::{HotelId, NewHotelContact};
    use crate::roster::RosterStore;

    fn ids(values: &[u32]) -> Vec<HotelId> {
        values.iter().copied().map(HotelId).collect()
    }

    #[test]
    fn select_all_toggles() {
        let all = ids(&[1, 2, 3]);
        let empty = Selection::new();
        let full = select_all(&empty, &all);
        assert_eq!(full.len(), 3);
        assert!(select_all(&full, &all).is_empty());
    }

    #[test]
    fn select_all_from_partial_selects_everything() {
        let all = ids(&[1, 2, 3]);
        let partial = Selection::from_ids(ids(&[2]));
        let next = select_all(&partial, &all);
        assert_eq!(next, Selection::from_ids(all.clone()));
    }

    #[test]
    fn select_all_twice_from_empty_returns_to_empty() {
        let all = ids(&[4, 5]);
        let once = select_all(&Selection::new(), &all);
        let twice = select_all(&once, &all);
        assert_eq!(twice, Selection::new());
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = Selection::new();
        assert!(selection.toggle(HotelId(7)));
        assert!(selection.contains(HotelId(7)));
        assert!(!selection.toggle(HotelId(7)));
        assert!(selection.is_empty());
    }

    #[test]
    fn state_reports_tri_state() {
        let all = ids(&[1, 2]);
        assert_eq!(Selection::new().state(&all), SelectionState::None);
        assert_eq!(
            Selection::from_ids(ids(&[1])).state(&all),
            SelectionState::Some(1)
        );
        assert_eq!(
            Selection::from_ids(all.clone()).state(&all),
            SelectionState::All
        );
        assert_eq!(Selection::new().state(&[]), SelectionState::None);
    }

    #[test]
    fn retain_existing_drops_stale_ids() {
        let mut store = RosterStore::new();
        let id = store
            .add(NewHotelContact {
                name: "Fine".to_string(),
                ..Default::default()
            })
            .id;
        let mut selection = Selection::from_ids([id, HotelId(99)]);
        selection.retain_existing(&store);
        assert_eq!(selection, Selection::from_ids([id]));
    }
}
