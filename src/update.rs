//! Update
//!
//! The pure state transition. `update` never touches its input model; the
//! returned model shares every item it did not change.

use std::sync::Arc;

use crate::action::Action;
use crate::env::Env;
use crate::models::{Model, TodoItem};

/// Apply `action` to `model`, reading page inputs from `env`
pub fn update(action: &Action, model: &Model, env: &Env) -> Model {
    let mut next = model.clone();

    match action {
        Action::Add(data) => {
            let title = match data {
                Some(title) => title.clone(),
                None => env.input.trim().to_string(),
            };
            if title.trim().is_empty() {
                log::debug!("ignoring ADD with empty title");
                return next;
            }
            let id = model.next_id();
            next.todos.push(Arc::new(TodoItem::new(id, title)));
        }
        Action::Toggle(id) => {
            let Some(item) = next.todos.iter_mut().find(|t| t.id == *id) else {
                log::debug!("TOGGLE of unknown item {}", id);
                return next;
            };
            let item = Arc::make_mut(item);
            item.done = !item.done;
            next.all_done = next.todos.iter().all(|t| t.done);
        }
        Action::ToggleAll => {
            next.all_done = !next.all_done;
            let done = next.all_done;
            for item in next.todos.iter_mut().filter(|t| t.done != done) {
                Arc::make_mut(item).done = done;
            }
        }
        Action::Delete(id) => {
            next.todos.retain(|t| t.id != *id);
        }
        Action::Edit(id) => {
            let double_click = next.clicked == Some(*id)
                && next.click_time.is_some_and(|t| env.now - env.double_click_ms < t);
            if double_click {
                next.editing = Some(*id);
            } else {
                next.clicked = Some(*id);
                next.click_time = Some(env.now);
                next.editing = None;
            }
        }
        Action::Save => {
            let Some(edit) = &env.edit else {
                log::warn!("SAVE without an open edit field");
                return next;
            };
            next.clicked = None;
            next.editing = None;

            let title = edit.value.trim();
            if title.is_empty() {
                return update(&Action::Delete(edit.id), &next, env);
            }
            if let Some(item) = next.todos.iter_mut().find(|t| t.id == edit.id) {
                Arc::make_mut(item).title = title.to_string();
            }
        }
        Action::Cancel => {
            next.clicked = None;
            next.editing = None;
        }
        Action::ClearCompleted => {
            next.todos.retain(|t| !t.done);
        }
        Action::Route => {
            next.hash = env.hash.clone();
        }
    }

    next
}

/// Dispatch the bare string form of an action. Unknown tags and malformed
/// payloads return the model unchanged.
pub fn update_tagged(tag: &str, model: &Model, data: Option<&str>, env: &Env) -> Model {
    match Action::from_tag(tag, data) {
        Some(action) => update(&action, model, env),
        None => {
            log::warn!("ignoring unknown action {:?}", tag);
            model.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ROUTE_ACTIVE;
    use proptest::prelude::*;

    fn item(id: u32, title: &str, done: bool) -> TodoItem {
        TodoItem { id, title: title.to_string(), done }
    }

    fn run(model: &Model, actions: &[Action]) -> Model {
        let env = Env::default();
        actions.iter().fold(model.clone(), |m, a| update(a, &m, &env))
    }

    #[test]
    fn test_add_first_item() {
        let model = Model::new();
        let next = update(&Action::Add(Some("Buy milk".into())), &model, &Env::default());
        assert_eq!(next.todos.len(), 1);
        assert_eq!(*next.todos[0], item(1, "Buy milk", false));
        assert!(model.todos.is_empty());
    }

    #[test]
    fn test_add_reads_trimmed_input() {
        let env = Env::default().with_input("  walk the dog ");
        let next = update(&Action::Add(None), &Model::new(), &env);
        assert_eq!(next.todos[0].title, "walk the dog");
    }

    #[test]
    fn test_add_rejects_blank_title() {
        let env = Env::default().with_input("   ");
        let next = update(&Action::Add(None), &Model::new(), &env);
        assert!(next.todos.is_empty());
    }

    #[test]
    fn test_add_uses_max_id() {
        let model = Model::with_todos(vec![item(7, "a", false), item(3, "b", false)]);
        let next = update(&Action::Add(Some("c".into())), &model, &Env::default());
        assert_eq!(next.todos.last().unwrap().id, 8);
    }

    #[test]
    fn test_add_leaves_all_done() {
        let model = Model::with_todos(vec![item(1, "a", false)]);
        let next = run(&model, &[Action::ToggleAll, Action::Add(Some("b".into()))]);
        assert!(next.all_done);

        // The next TOGGLE_ALL flips the flag back and clears every item
        let cleared = update(&Action::ToggleAll, &next, &Env::default());
        assert!(!cleared.all_done);
        assert!(cleared.todos.iter().all(|t| !t.done));
    }

    #[test]
    fn test_toggle_recomputes_all_done() {
        let model = Model::with_todos(vec![item(1, "a", false), item(2, "b", true)]);
        let next = update(&Action::Toggle(1), &model, &Env::default());
        assert!(next.todos[0].done);
        assert!(next.all_done);
        assert!(!model.todos[0].done);

        let back = update(&Action::Toggle(2), &next, &Env::default());
        assert!(!back.all_done);
    }

    #[test]
    fn test_toggle_shares_untouched_items() {
        let model = Model::with_todos(vec![item(1, "a", false), item(2, "b", false)]);
        let next = update(&Action::Toggle(2), &model, &Env::default());
        assert!(Arc::ptr_eq(&model.todos[0], &next.todos[0]));
        assert!(!Arc::ptr_eq(&model.todos[1], &next.todos[1]));
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let model = Model::with_todos(vec![item(1, "a", false)]);
        assert_eq!(update(&Action::Toggle(9), &model, &Env::default()), model);
    }

    #[test]
    fn test_toggle_all() {
        let model = Model::with_todos(vec![item(1, "a", false), item(2, "b", false)]);
        let next = update(&Action::ToggleAll, &model, &Env::default());
        assert!(next.all_done);
        assert!(next.todos.iter().all(|t| t.done));

        let again = update(&Action::ToggleAll, &next, &Env::default());
        assert!(!again.all_done);
        assert!(again.todos.iter().all(|t| !t.done));
    }

    #[test]
    fn test_delete() {
        let model = Model::with_todos(vec![item(1, "a", false), item(2, "b", true)]);
        let next = update(&Action::Delete(1), &model, &Env::default());
        assert_eq!(next.todos.len(), 1);
        assert_eq!(next.todos[0].id, 2);
        assert_eq!(update(&Action::Delete(42), &model, &Env::default()), model);
    }

    #[test]
    fn test_edit_double_click_within_window() {
        let model = Model::with_todos(vec![item(3, "a", false)]);
        let first = update(&Action::Edit(3), &model, &Env::at(1_000.0));
        assert_eq!(first.clicked, Some(3));
        assert_eq!(first.editing, None);

        let second = update(&Action::Edit(3), &first, &Env::at(1_200.0));
        assert_eq!(second.editing, Some(3));
    }

    #[test]
    fn test_edit_slow_second_click() {
        let model = Model::with_todos(vec![item(3, "a", false)]);
        let first = update(&Action::Edit(3), &model, &Env::at(1_000.0));
        let second = update(&Action::Edit(3), &first, &Env::at(1_400.0));
        assert_eq!(second.editing, None);
        assert_eq!(second.clicked, Some(3));
        assert_eq!(second.click_time, Some(1_400.0));
    }

    #[test]
    fn test_edit_window_is_exclusive() {
        let model = Model::with_todos(vec![item(3, "a", false)]);
        let first = update(&Action::Edit(3), &model, &Env::at(1_000.0));
        let second = update(&Action::Edit(3), &first, &Env::at(1_300.0));
        assert_eq!(second.editing, None);
    }

    #[test]
    fn test_edit_other_item_resets_click() {
        let model = Model::with_todos(vec![item(1, "a", false), item(2, "b", false)]);
        let first = update(&Action::Edit(1), &model, &Env::at(1_000.0));
        let second = update(&Action::Edit(2), &first, &Env::at(1_100.0));
        assert_eq!(second.editing, None);
        assert_eq!(second.clicked, Some(2));
    }

    #[test]
    fn test_save_trims_title() {
        let mut model = Model::with_todos(vec![item(5, "old", false)]);
        model.editing = Some(5);
        model.clicked = Some(5);
        let next = update(&Action::Save, &model, &Env::default().with_edit(5, "  new title "));
        assert_eq!(next.todos[0].title, "new title");
        assert_eq!(next.editing, None);
        assert_eq!(next.clicked, None);
    }

    #[test]
    fn test_save_empty_deletes() {
        let mut model = Model::with_todos(vec![item(5, "old", false)]);
        model.editing = Some(5);
        let next = update(&Action::Save, &model, &Env::default().with_edit(5, ""));
        assert!(next.todos.is_empty());

        let blank = update(&Action::Save, &model, &Env::default().with_edit(5, "   "));
        assert!(blank.todos.is_empty());
    }

    #[test]
    fn test_save_without_edit_field() {
        let mut model = Model::with_todos(vec![item(5, "old", false)]);
        model.editing = Some(5);
        assert_eq!(update(&Action::Save, &model, &Env::default()), model);
    }

    #[test]
    fn test_cancel() {
        let mut model = Model::with_todos(vec![item(5, "old", false)]);
        model.editing = Some(5);
        model.clicked = Some(5);
        let next = update(&Action::Cancel, &model, &Env::default());
        assert_eq!(next.editing, None);
        assert_eq!(next.clicked, None);
        assert_eq!(next.todos, model.todos);
    }

    #[test]
    fn test_clear_completed() {
        let model = Model::with_todos(vec![item(1, "a", true), item(2, "b", false), item(3, "c", true)]);
        let next = update(&Action::ClearCompleted, &model, &Env::default());
        let ids: Vec<u32> = next.todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_route() {
        let next = update(&Action::Route, &Model::new(), &Env::default().with_hash(ROUTE_ACTIVE));
        assert_eq!(next.hash, ROUTE_ACTIVE);
    }

    #[test]
    fn test_update_tagged() {
        let model = Model::with_todos(vec![item(1, "a", false)]);
        let env = Env::default();
        assert_eq!(update_tagged("DANCE", &model, None, &env), model);
        assert_eq!(update_tagged("TOGGLE", &model, Some("x"), &env), model);
        assert!(update_tagged("TOGGLE", &model, Some("1"), &env).todos[0].done);
    }

    fn titles() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z]{1,8}", 1..20)
    }

    proptest! {
        #[test]
        fn prop_add_ids_strictly_increasing(titles in titles()) {
            let actions: Vec<Action> = titles.into_iter().map(|t| Action::Add(Some(t))).collect();
            let model = run(&Model::new(), &actions);
            let ids: Vec<u32> = model.todos.iter().map(|t| t.id).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(ids[0], 1);
        }

        #[test]
        fn prop_toggle_twice_restores(dones in prop::collection::vec(any::<bool>(), 1..10), pick in any::<prop::sample::Index>()) {
            let model = Model::with_todos(dones.iter().enumerate().map(|(i, d)| item(i as u32 + 1, "t", *d)));
            let id = pick.index(dones.len()) as u32 + 1;
            let twice = run(&model, &[Action::Toggle(id), Action::Toggle(id)]);
            prop_assert_eq!(&twice.todos, &model.todos);
        }

        #[test]
        fn prop_toggle_all_makes_uniform(dones in prop::collection::vec(any::<bool>(), 0..10)) {
            let model = Model::with_todos(dones.iter().enumerate().map(|(i, d)| item(i as u32 + 1, "t", *d)));
            let next = update(&Action::ToggleAll, &model, &Env::default());
            prop_assert!(next.todos.iter().all(|t| t.done == next.all_done));
        }

        #[test]
        fn prop_delete_removes_exactly_one(len in 1usize..10, target in 1u32..15) {
            let model = Model::with_todos((1..=len as u32).map(|id| item(id, "t", false)));
            let next = update(&Action::Delete(target), &model, &Env::default());
            let expected = if target as usize <= len { len - 1 } else { len };
            prop_assert_eq!(next.todos.len(), expected);
            prop_assert!(next.todos.iter().all(|t| t.id != target));
        }

        #[test]
        fn prop_clear_completed_keeps_active(dones in prop::collection::vec(any::<bool>(), 0..12)) {
            let model = Model::with_todos(dones.iter().enumerate().map(|(i, d)| item(i as u32 + 1, "t", *d)));
            let next = update(&Action::ClearCompleted, &model, &Env::default());
            let expected: Vec<_> = model.todos.iter().filter(|t| !t.done).cloned().collect();
            prop_assert_eq!(next.todos, expected);
        }
    }
}
