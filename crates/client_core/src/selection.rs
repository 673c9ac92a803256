//! Cross-page selection keyed by artwork id.

use std::collections::HashSet;

use shared::domain::{Artwork, ArtworkId};

/// Ordered set of selected artworks. Membership is decided by `id` only; the
/// first copy of a record that was added is the one kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    items: Vec<Artwork>,
    ids: HashSet<ArtworkId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: ArtworkId) -> bool {
        self.ids.contains(&id)
    }

    pub fn items(&self) -> &[Artwork] {
        &self.items
    }

    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.items.iter().map(|item| item.id)
    }

    /// Returns `false` when an artwork with the same id is already selected.
    pub fn insert(&mut self, item: Artwork) -> bool {
        if !self.ids.insert(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove(&mut self, id: ArtworkId) -> Option<Artwork> {
        if !self.ids.remove(&id) {
            return None;
        }
        let position = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(position))
    }

    /// Appends every artwork whose id is not yet selected, in order, and
    /// returns how many were added.
    pub fn union<'a, I>(&mut self, items: I) -> usize
    where
        I: IntoIterator<Item = &'a Artwork>,
    {
        items
            .into_iter()
            .filter(|item| self.insert((*item).clone()))
            .count()
    }

    /// Drops every selected artwork whose id appears in `items`.
    pub fn subtract(&mut self, items: &[Artwork]) -> usize {
        let doomed: HashSet<ArtworkId> = items.iter().map(|item| item.id).collect();
        let before = self.items.len();
        self.items.retain(|item| !doomed.contains(&item.id));
        self.ids.retain(|id| !doomed.contains(id));
        before - self.items.len()
    }

    /// Number of `page` rows whose id is selected.
    pub fn count_selected_in(&self, page: &[Artwork]) -> usize {
        page.iter().filter(|item| self.contains(item.id)).count()
    }
}

impl FromIterator<Artwork> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = Artwork>>(iter: T) -> Self {
        let mut selection = SelectionSet::new();
        for item in iter {
            selection.insert(item);
        }
        selection
    }
}

/// The select-all flag: every row of `page` is in `selection`. An empty page
/// counts as fully selected.
pub fn is_page_fully_selected(page: &[Artwork], selection: &SelectionSet) -> bool {
    selection.count_selected_in(page) == page.len()
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
