use ahash::AHashSet;

use crate::model::LoadId;

/// Checked rows, in the order the user checked them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<LoadId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self) -> &[LoadId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &LoadId) -> bool {
        self.ids.contains(id)
    }

    /// Uncheck `id` if it is checked, otherwise append it.
    pub fn toggle(&mut self, id: LoadId) {
        match self.ids.iter().position(|selected| *selected == id) {
            Some(index) => {
                self.ids.remove(index);
            }
            None => self.ids.push(id),
        }
    }

    /// Header checkbox: select exactly the rows on screen, or nothing.
    pub fn set_all(&mut self, checked: bool, visible: &[LoadId]) {
        self.ids = if checked { visible.to_vec() } else { Vec::new() };
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drop ids that are not part of the freshly received rows.
    pub fn reconcile(&mut self, visible: &[LoadId]) {
        let present: AHashSet<&LoadId> = visible.iter().collect();
        self.ids.retain(|id| present.contains(id));
    }
}
