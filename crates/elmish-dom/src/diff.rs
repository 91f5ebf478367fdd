//! Tree Diffing
//!
//! Positional diff between two virtual trees. Patches address nodes by the
//! child-index path from the root; children are only ever appended or
//! truncated at the end, so paths stay valid while patches are applied in
//! order.
//!
//! Elements carrying different `data-id` keys are never patched into each
//! other: the old node is replaced, so live state the browser keeps outside
//! attributes (a clicked checkbox) cannot leak onto another row.

use crate::node::{Element, Node};

/// Child-index path from the root node
pub type Path = Vec<usize>;

/// Attribute identifying an element across renders
pub const KEY_ATTR: &str = "data-id";

#[derive(Debug, PartialEq)]
pub enum Patch<'a, Msg> {
    /// Swap the node at `path` for a freshly built one
    Replace { path: Path, node: &'a Node<Msg> },
    SetAttr { path: Path, name: &'a str, value: &'a str },
    RemoveAttr { path: Path, name: &'a str },
    SetText { path: Path, text: &'a str },
    SetEvent { path: Path, event: &'static str, msg: &'a Msg },
    RemoveEvent { path: Path, event: &'static str },
    /// Append `nodes` to the children of the element at `path`
    Append { path: Path, nodes: &'a [Node<Msg>] },
    /// Drop children of the element at `path` beyond `len`
    Truncate { path: Path, len: usize },
}

/// Compute the patches turning `old` into `new`
pub fn diff<'a, Msg: PartialEq>(old: &'a Node<Msg>, new: &'a Node<Msg>) -> Vec<Patch<'a, Msg>> {
    let mut patches = Vec::new();
    diff_node(old, new, &mut Vec::new(), &mut patches);
    patches
}

fn diff_node<'a, Msg: PartialEq>(
    old: &'a Node<Msg>,
    new: &'a Node<Msg>,
    path: &mut Path,
    patches: &mut Vec<Patch<'a, Msg>>,
) {
    match (old, new) {
        (Node::Text(a), Node::Text(b)) => {
            if a != b {
                patches.push(Patch::SetText { path: path.clone(), text: b.as_str() });
            }
        }
        (Node::Element(a), Node::Element(b)) if same_identity(a, b) => {
            diff_attrs(a, b, path, patches);
            diff_events(a, b, path, patches);
            diff_children(a, b, path, patches);
        }
        _ => patches.push(Patch::Replace { path: path.clone(), node: new }),
    }
}

fn same_identity<Msg>(a: &Element<Msg>, b: &Element<Msg>) -> bool {
    a.tag == b.tag && a.get_attr(KEY_ATTR) == b.get_attr(KEY_ATTR)
}

fn diff_attrs<'a, Msg>(
    old: &'a Element<Msg>,
    new: &'a Element<Msg>,
    path: &Path,
    patches: &mut Vec<Patch<'a, Msg>>,
) {
    for name in old.attrs.keys() {
        if !new.attrs.contains_key(name) {
            patches.push(Patch::RemoveAttr { path: path.clone(), name: name.as_str() });
        }
    }
    for (name, value) in &new.attrs {
        if old.attrs.get(name) != Some(value) {
            patches.push(Patch::SetAttr { path: path.clone(), name: name.as_str(), value: value.as_str() });
        }
    }
}

fn diff_events<'a, Msg: PartialEq>(
    old: &'a Element<Msg>,
    new: &'a Element<Msg>,
    path: &Path,
    patches: &mut Vec<Patch<'a, Msg>>,
) {
    for event in old.events.keys() {
        if !new.events.contains_key(event) {
            patches.push(Patch::RemoveEvent { path: path.clone(), event: *event });
        }
    }
    for (event, msg) in &new.events {
        if old.events.get(event) != Some(msg) {
            patches.push(Patch::SetEvent { path: path.clone(), event: *event, msg });
        }
    }
}

fn diff_children<'a, Msg: PartialEq>(
    old: &'a Element<Msg>,
    new: &'a Element<Msg>,
    path: &mut Path,
    patches: &mut Vec<Patch<'a, Msg>>,
) {
    let common = old.children.len().min(new.children.len());
    for (i, (a, b)) in old.children.iter().zip(&new.children).enumerate() {
        path.push(i);
        diff_node(a, b, path, patches);
        path.pop();
    }
    if new.children.len() > common {
        patches.push(Patch::Append { path: path.clone(), nodes: &new.children[common..] });
    } else if old.children.len() > common {
        patches.push(Patch::Truncate { path: path.clone(), len: common });
    }
}
