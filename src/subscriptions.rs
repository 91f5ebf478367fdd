//! Subscriptions
//!
//! Global key and route bindings. Bound once for the lifetime of the page.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::action::Action;
use crate::browser::{self, BrowserError};
use crate::context::AppContext;

pub const ENTER_KEY: &str = "Enter";
pub const ESCAPE_KEY: &str = "Escape";

/// What a key-up asks of the app
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCommand {
    Dispatch(Action),
    /// Clear and refocus the new-item input
    ResetInput,
}

/// Enter saves an open edit, then adds the typed item; Escape cancels
pub fn key_commands(key: &str, editing: bool, input_filled: bool) -> Vec<KeyCommand> {
    let mut commands = Vec::new();
    match key {
        ENTER_KEY => {
            if editing {
                commands.push(KeyCommand::Dispatch(Action::Save));
            }
            if input_filled {
                commands.push(KeyCommand::Dispatch(Action::Add(None)));
                commands.push(KeyCommand::ResetInput);
            }
        }
        ESCAPE_KEY => commands.push(KeyCommand::Dispatch(Action::Cancel)),
        _ => {}
    }
    commands
}

pub fn subscriptions(ctx: AppContext) -> Result<(), BrowserError> {
    let window = browser::window()?;
    let document = window.document().ok_or(BrowserError::NoDocument)?;

    let doc = document.clone();
    let on_keyup = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(move |ev: web_sys::KeyboardEvent| {
        let editing = browser::is_editing(&doc);
        let input_filled = browser::new_todo_input(&doc).is_some_and(|i| !i.value().is_empty());
        for command in key_commands(&ev.key(), editing, input_filled) {
            match command {
                KeyCommand::Dispatch(action) => ctx.dispatch(action),
                KeyCommand::ResetInput => browser::reset_new_todo(&doc),
            }
        }
    });
    document.add_event_listener_with_callback("keyup", on_keyup.as_ref().unchecked_ref())?;
    on_keyup.forget();

    let on_hashchange = Closure::<dyn FnMut(web_sys::HashChangeEvent)>::new(move |_ev: web_sys::HashChangeEvent| {
        ctx.dispatch(Action::Route);
    });
    window.add_event_listener_with_callback("hashchange", on_hashchange.as_ref().unchecked_ref())?;
    on_hashchange.forget();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_adds() {
        assert_eq!(
            key_commands(ENTER_KEY, false, true),
            vec![KeyCommand::Dispatch(Action::Add(None)), KeyCommand::ResetInput]
        );
    }

    #[test]
    fn test_enter_saves_before_adding() {
        assert_eq!(
            key_commands(ENTER_KEY, true, true),
            vec![
                KeyCommand::Dispatch(Action::Save),
                KeyCommand::Dispatch(Action::Add(None)),
                KeyCommand::ResetInput,
            ]
        );
        assert_eq!(key_commands(ENTER_KEY, true, false), vec![KeyCommand::Dispatch(Action::Save)]);
    }

    #[test]
    fn test_enter_with_nothing_to_do() {
        assert!(key_commands(ENTER_KEY, false, false).is_empty());
    }

    #[test]
    fn test_escape_cancels() {
        assert_eq!(key_commands(ESCAPE_KEY, true, true), vec![KeyCommand::Dispatch(Action::Cancel)]);
        assert!(key_commands("a", true, true).is_empty());
    }
}
