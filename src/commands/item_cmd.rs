//! Commands for Todo Items
//!
//! Entry points the presentation shell calls. Errors cross the boundary as
//! strings.

use serde::Deserialize;

use crate::domain::{Item, ItemId, TodoList};
use crate::AppState;
use super::form::TodoForm;

/// Arguments of the creation form submit
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoArgs {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// List all todos in display order
pub async fn list_todos(state: &AppState) -> Result<Vec<Item>, String> {
    Ok(state.store.list().await.into_items())
}

/// Submit the creation form
///
/// `Ok(None)` means the form was dropped (blank fields) and nothing changed.
/// On `Ok(Some(_))` the shell shows `SUCCESS_MESSAGE` and goes back.
pub async fn create_todo(state: &AppState, args: CreateTodoArgs) -> Result<Option<Item>, String> {
    let form = TodoForm::new(args.title, args.description);
    if let Err(reason) = form.validate(state.form_policy) {
        log::debug!("Dropping todo form submission: {}", reason);
        return Ok(None);
    }

    let id = state.ids.next_id().map_err(|e| e.to_string())?;
    let item = Item::new(id, form.title, form.description);
    state.store.add(item.clone()).await.map_err(|e| e.to_string())?;
    log::info!("Added todo {}", item.id);
    Ok(Some(item))
}

/// Delete a todo
pub async fn delete_todo(state: &AppState, id: ItemId) -> Result<Vec<Item>, String> {
    Ok(state.store.remove(id).await.into_items())
}

/// Delete every todo and the stored record
pub async fn clear_todos(state: &AppState) -> Result<Vec<Item>, String> {
    state.store.clear().await.map(TodoList::into_items).map_err(|e| e.to_string())
}

/// Toggle a todo's completion status
pub async fn toggle_todo(state: &AppState, id: ItemId) -> Result<Vec<Item>, String> {
    Ok(state.store.toggle(id).await.into_items())
}
