//! Todo App
//!
//! Root component: owns the model signal, mounts the rendered view and
//! binds the subscriptions.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use elmish_dom::{DomError, Mount};
use leptos::html::Div;
use leptos::prelude::*;

use crate::action::Action;
use crate::browser;
use crate::config::Config;
use crate::context::AppContext;
use crate::models::Model;
use crate::subscriptions::subscriptions;
use crate::update::update;
use crate::view;

/// Events delegated from the mount root
const DELEGATED_EVENTS: &[&str] = &["click"];

#[component]
pub fn App(config: Config) -> impl IntoView {
    // Start on whatever route the page was opened with
    let initial = match browser::read_env(config.double_click_ms) {
        Ok(env) => update(&Action::Route, &Model::new(), &env),
        Err(err) => {
            log::warn!("could not read initial route: {}", err);
            Model::new()
        }
    };

    let (model, set_model) = signal(initial);
    let ctx = AppContext::new((model, set_model), &config);

    let root = NodeRef::<Div>::new();
    let mounted: Rc<RefCell<Option<Mount<Action>>>> = Rc::default();
    let last_editing: Rc<Cell<Option<u32>>> = Rc::default();

    // Re-render whenever the model changes
    Effect::new(move |_| {
        let current = model.get();
        let Some(container) = root.get() else { return };

        let mut slot = mounted.borrow_mut();
        if slot.is_none() {
            match start_mount(container.into(), ctx) {
                Ok(mount) => *slot = Some(mount),
                Err(err) => {
                    log::error!("failed to mount view: {}", err);
                    return;
                }
            }
        }
        if let Some(mount) = slot.as_mut() {
            if let Err(err) = mount.render(view::view(&current)) {
                log::error!("render failed: {}", err);
            }
        }
        let previous = last_editing.replace(current.editing);
        if entered_edit_mode(previous, current.editing) {
            browser::focus_edit_field_soon();
        }
    });

    if let Err(err) = subscriptions(ctx) {
        log::error!("failed to bind subscriptions: {}", err);
    }

    view! { <div id="app" node_ref=root></div> }
}

/// True when a row other than the previous one has just entered edit mode
fn entered_edit_mode(previous: Option<u32>, current: Option<u32>) -> bool {
    current.is_some() && current != previous
}

fn start_mount(container: web_sys::Element, ctx: AppContext) -> Result<Mount<Action>, DomError> {
    let mount = Mount::new(container)?;
    mount.listen(DELEGATED_EVENTS, move |action| ctx.dispatch(action))?;
    log::debug!("mounted, delegating {:?}", DELEGATED_EVENTS);
    Ok(mount)
}
