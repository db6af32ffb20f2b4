//! Todo List
//!
//! The ordered collection of items and the three transforms that change it.
//! Transforms never touch the input list: old list in, new list out.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::{DomainError, DomainResult};
use super::item::Item;
use super::item_id::ItemId;

/// Items in display order, ids unique
///
/// Serializes as a bare JSON array of items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<Item>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from stored records, dropping repeated ids
    ///
    /// The first occurrence of an id wins. Returns the list and how many
    /// records were dropped.
    pub fn from_records(records: Vec<Item>) -> (Self, usize) {
        let total = records.len();
        let mut seen = HashSet::with_capacity(total);
        let items: Vec<Item> = records.into_iter().filter(|item| seen.insert(item.id)).collect();
        let dropped = total - items.len();
        (Self { items }, dropped)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Largest id in the list
    pub fn max_id(&self) -> Option<ItemId> {
        self.items.iter().map(|item| item.id).max()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Append `item` to the end of `current`
///
/// Fails with `Conflict` if the id is already taken and `InvalidInput` if the
/// title is blank.
pub fn add(current: &TodoList, item: Item) -> DomainResult<TodoList> {
    if !item.has_title() {
        return Err(DomainError::InvalidInput("item text must not be empty".to_string()));
    }
    if current.contains(item.id) {
        return Err(DomainError::Conflict(format!("item {} already exists", item.id)));
    }

    let mut items = Vec::with_capacity(current.len() + 1);
    items.extend(current.items.iter().cloned());
    items.push(item);
    Ok(TodoList { items })
}

/// `current` without the item whose id matches; unchanged if none does
pub fn remove(current: &TodoList, id: ItemId) -> TodoList {
    TodoList {
        items: current.items.iter().filter(|item| item.id != id).cloned().collect(),
    }
}

/// `current` with the matching item's completion flipped; unchanged if none
pub fn toggle(current: &TodoList, id: ItemId) -> TodoList {
    TodoList {
        items: current
            .items
            .iter()
            .map(|item| if item.id == id { item.toggled() } else { item.clone() })
            .collect(),
    }
}
