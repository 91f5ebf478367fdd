//! Elmish DOM
//!
//! A small virtual DOM for Elm-style apps: element constructors build a
//! plain tree, `diff` computes positional patches (keyed on `data-id`
//! where present), and `Mount` applies them
//! to the page. Event handlers are message values, not closures; they are
//! encoded into `data-on-*` attributes and decoded by one delegated
//! listener per event type.

mod diff;
mod error;
mod mount;
mod node;

pub use diff::{diff, Patch, Path, KEY_ATTR};
pub use error::DomError;
pub use mount::{decode_handler, event_attr, find_handler, Mount};
pub use node::{
    a, button, div, footer, h1, header, input, label, li, section, span, strong, text, ul,
    Element, Node,
};
