//! Application Context
//!
//! The model store and the dispatcher shared by the mount and the
//! subscriptions.

use leptos::prelude::*;

use crate::action::Action;
use crate::browser;
use crate::config::Config;
use crate::models::Model;
use crate::update::update;

#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current model - read
    pub model: ReadSignal<Model>,
    /// Current model - write
    set_model: WriteSignal<Model>,
    double_click_ms: f64,
}

impl AppContext {
    pub fn new(model: (ReadSignal<Model>, WriteSignal<Model>), config: &Config) -> Self {
        Self {
            model: model.0,
            set_model: model.1,
            double_click_ms: config.double_click_ms,
        }
    }

    /// Run `action` through `update` against a fresh snapshot of the page
    /// and store the result, which re-renders the view.
    pub fn dispatch(&self, action: Action) {
        let env = match browser::read_env(self.double_click_ms) {
            Ok(env) => env,
            Err(err) => {
                log::error!("dropping {}: {}", action, err);
                return;
            }
        };
        log::debug!("dispatch {}", action);
        self.set_model.update(|model| {
            let next = update(&action, model, &env);
            *model = next;
        });

        if log::log_enabled!(log::Level::Trace) {
            self.model.with_untracked(|model| match serde_json::to_string(model) {
                Ok(json) => log::trace!("model {}", json),
                Err(err) => log::trace!("model not serializable: {}", err),
            });
        }
    }
}
