//! Mounting
//!
//! Applies virtual trees to a live DOM container and routes element events
//! back to the application through a delegated listener per event type.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::diff::{diff, Patch};
use crate::error::DomError;
use crate::node::Node;

/// Attribute carrying the encoded message for `event`
pub fn event_attr(event: &str) -> String {
    format!("data-on-{}", event)
}

/// First handler payload along an ancestor chain, nearest element first.
///
/// Each item is the `data-on-<event>` attribute of one element between the
/// event target and the mount root.
pub fn find_handler<I>(chain: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    chain.into_iter().flatten().next()
}

/// Decode a handler payload written by `Mount`
pub fn decode_handler<Msg: DeserializeOwned>(raw: &str) -> Result<Msg, DomError> {
    Ok(serde_json::from_str(raw)?)
}

/// Input properties that stop following their attribute once the user
/// interacts, so patches write them explicitly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LiveProperty {
    Checked,
    Value,
}

impl LiveProperty {
    pub(crate) fn of(attr: &str) -> Option<Self> {
        match attr {
            "checked" => Some(Self::Checked),
            "value" => Some(Self::Value),
            _ => None,
        }
    }
}

/// A virtual tree mounted into a container element
pub struct Mount<Msg> {
    root: web_sys::Element,
    document: web_sys::Document,
    current: Option<Node<Msg>>,
}

impl<Msg> Mount<Msg>
where
    Msg: PartialEq + Serialize,
{
    pub fn new(root: web_sys::Element) -> Result<Self, DomError> {
        let document = root
            .owner_document()
            .or_else(|| web_sys::window().and_then(|w| w.document()))
            .ok_or(DomError::NoDocument)?;
        Ok(Self { root, document, current: None })
    }

    pub fn root(&self) -> &web_sys::Element {
        &self.root
    }

    /// Render `tree`, patching whatever was rendered before.
    ///
    /// On failure the mounted tree is forgotten so the next render rebuilds
    /// the container from scratch.
    pub fn render(&mut self, tree: Node<Msg>) -> Result<(), DomError> {
        let result = match self.current.take() {
            None => self.build(&tree).and_then(|built| {
                self.root.set_inner_html("");
                self.root.append_child(&built)?;
                Ok(())
            }),
            Some(old) => {
                let patches = diff(&old, &tree);
                log::trace!("applying {} patches", patches.len());
                patches.into_iter().try_for_each(|patch| self.apply(patch))
            }
        };
        if result.is_ok() {
            self.current = Some(tree);
        }
        result
    }

    fn apply(&self, patch: Patch<'_, Msg>) -> Result<(), DomError> {
        match patch {
            Patch::Replace { path, node } => {
                let target = self.resolve(&path)?;
                let built = self.build(node)?;
                let parent = target.parent_node().ok_or(DomError::MissingNode(path))?;
                parent.replace_child(&built, &target)?;
            }
            Patch::SetAttr { path, name, value } => {
                set_attr(&self.resolve_element(&path)?, name, value)?;
            }
            Patch::RemoveAttr { path, name } => {
                remove_attr(&self.resolve_element(&path)?, name)?;
            }
            Patch::SetText { path, text } => {
                self.resolve(&path)?.set_text_content(Some(text));
            }
            Patch::SetEvent { path, event, msg } => {
                let el = self.resolve_element(&path)?;
                el.set_attribute(&event_attr(event), &serde_json::to_string(msg)?)?;
            }
            Patch::RemoveEvent { path, event } => {
                self.resolve_element(&path)?.remove_attribute(&event_attr(event))?;
            }
            Patch::Append { path, nodes } => {
                let parent = self.resolve(&path)?;
                for node in nodes {
                    parent.append_child(&self.build(node)?)?;
                }
            }
            Patch::Truncate { path, len } => {
                let parent = self.resolve(&path)?;
                while parent.child_nodes().length() as usize > len {
                    match parent.last_child() {
                        Some(last) => {
                            parent.remove_child(&last)?;
                        }
                        None => break,
                    }
                }
            }
        }
        Ok(())
    }

    fn resolve(&self, path: &[usize]) -> Result<web_sys::Node, DomError> {
        let mut node = self
            .root
            .first_child()
            .ok_or_else(|| DomError::MissingNode(path.to_vec()))?;
        for &index in path {
            node = node
                .child_nodes()
                .item(index as u32)
                .ok_or_else(|| DomError::MissingNode(path.to_vec()))?;
        }
        Ok(node)
    }

    fn resolve_element(&self, path: &[usize]) -> Result<web_sys::Element, DomError> {
        self.resolve(path)?
            .dyn_into::<web_sys::Element>()
            .map_err(|_| DomError::NotAnElement(path.to_vec()))
    }

    fn build(&self, node: &Node<Msg>) -> Result<web_sys::Node, DomError> {
        match node {
            Node::Text(text) => Ok(self.document.create_text_node(text).into()),
            Node::Element(el) => {
                let dom = self.document.create_element(el.tag)?;
                for (name, value) in &el.attrs {
                    set_attr(&dom, name, value)?;
                }
                for (event, msg) in &el.events {
                    dom.set_attribute(&event_attr(event), &serde_json::to_string(msg)?)?;
                }
                for child in &el.children {
                    dom.append_child(&self.build(child)?)?;
                }
                Ok(dom.into())
            }
        }
    }
}

impl<Msg> Mount<Msg>
where
    Msg: DeserializeOwned + 'static,
{
    /// Install one delegated listener per event name on the mount root.
    ///
    /// The listener walks from the event target up to the root looking for
    /// a `data-on-<event>` attribute, decodes it and hands the message to
    /// `dispatch`. Listeners live as long as the page.
    pub fn listen<F>(&self, events: &[&'static str], dispatch: F) -> Result<(), DomError>
    where
        F: Fn(Msg) + Clone + 'static,
    {
        for &event in events {
            let root = self.root.clone();
            let dispatch = dispatch.clone();
            let attr = event_attr(event);

            let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
                let Some(target) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
                    return;
                };
                let chain = std::iter::successors(Some(target), |el| el.parent_element())
                    .take_while(|el| root.contains(Some(&**el)))
                    .map(|el| el.get_attribute(&attr));
                let Some(raw) = find_handler(chain) else { return };
                match decode_handler::<Msg>(&raw) {
                    Ok(msg) => dispatch(msg),
                    Err(err) => log::warn!("ignoring undecodable {} handler {:?}: {}", event, raw, err),
                }
            });

            self.root
                .add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
            handler.forget();
        }
        Ok(())
    }
}

/// Set an attribute and the matching live property
fn set_attr(el: &web_sys::Element, name: &str, value: &str) -> Result<(), DomError> {
    el.set_attribute(name, value)?;
    if let Some(input) = el.dyn_ref::<web_sys::HtmlInputElement>() {
        match LiveProperty::of(name) {
            Some(LiveProperty::Checked) => input.set_checked(true),
            Some(LiveProperty::Value) => input.set_value(value),
            None => {}
        }
    }
    Ok(())
}

fn remove_attr(el: &web_sys::Element, name: &str) -> Result<(), DomError> {
    el.remove_attribute(name)?;
    if let Some(input) = el.dyn_ref::<web_sys::HtmlInputElement>() {
        match LiveProperty::of(name) {
            Some(LiveProperty::Checked) => input.set_checked(false),
            Some(LiveProperty::Value) => input.set_value(""),
            None => {}
        }
    }
    Ok(())
}
