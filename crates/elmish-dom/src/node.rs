//! Virtual Nodes
//!
//! Plain tree descriptions built with element constructors.

use std::collections::BTreeMap;

/// A node in the virtual tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node<Msg> {
    Element(Element<Msg>),
    Text(String),
}

/// An element with attributes, event bindings and children
#[derive(Debug, Clone, PartialEq)]
pub struct Element<Msg> {
    pub tag: &'static str,
    pub attrs: BTreeMap<String, String>,
    /// Event name (e.g. "click") -> message dispatched when it fires
    pub events: BTreeMap<&'static str, Msg>,
    pub children: Vec<Node<Msg>>,
}

impl<Msg> Element<Msg> {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: BTreeMap::new(),
            events: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Set a valueless (boolean) attribute when `cond` holds
    pub fn attr_if(self, cond: bool, name: &str) -> Self {
        if cond {
            self.attr(name, "")
        } else {
            self
        }
    }

    /// Append to the class list
    pub fn class(mut self, class: &str) -> Self {
        if class.is_empty() {
            return self;
        }
        let entry = self.attrs.entry("class".to_string()).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(class);
        self
    }

    pub fn class_if(self, cond: bool, class: &str) -> Self {
        if cond {
            self.class(class)
        } else {
            self
        }
    }

    pub fn id(self, id: impl ToString) -> Self {
        self.attr("id", id)
    }

    pub fn style(self, style: &str) -> Self {
        self.attr("style", style)
    }

    /// `display: block` or `display: none`
    pub fn shown(self, visible: bool) -> Self {
        self.style(if visible { "display: block" } else { "display: none" })
    }

    pub fn on(mut self, event: &'static str, msg: Msg) -> Self {
        self.events.insert(event, msg);
        self
    }

    pub fn child(mut self, child: impl Into<Node<Msg>>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node<Msg>>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

impl<Msg> From<Element<Msg>> for Node<Msg> {
    fn from(el: Element<Msg>) -> Self {
        Node::Element(el)
    }
}

impl<Msg> Node<Msg> {
    pub fn as_element(&self) -> Option<&Element<Msg>> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(el) => el.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first search for all elements matching `pred`
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&Element<Msg>) -> bool) -> Vec<&'a Element<Msg>> {
        let mut found = Vec::new();
        collect(self, pred, &mut found);
        found
    }

    /// First element carrying the given `id` attribute
    pub fn find_by_id(&self, id: &str) -> Option<&Element<Msg>> {
        self.find_all(&|el| el.get_attr("id") == Some(id)).into_iter().next()
    }

    /// Serialize the tree to HTML (event bindings are omitted)
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html(self, &mut out);
        out
    }
}

fn collect<'a, Msg>(
    node: &'a Node<Msg>,
    pred: &dyn Fn(&Element<Msg>) -> bool,
    found: &mut Vec<&'a Element<Msg>>,
) {
    if let Node::Element(el) = node {
        if pred(el) {
            found.push(el);
        }
        for child in &el.children {
            collect(child, pred, found);
        }
    }
}

const VOID_TAGS: &[&str] = &["input", "br", "hr", "img", "meta", "link"];

fn write_html<Msg>(node: &Node<Msg>, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(&escape(t)),
        Node::Element(el) => {
            out.push('<');
            out.push_str(el.tag);
            for (name, value) in &el.attrs {
                out.push(' ');
                out.push_str(name);
                if !value.is_empty() {
                    out.push_str("=\"");
                    out.push_str(&escape(value));
                    out.push('"');
                }
            }
            out.push('>');
            if VOID_TAGS.contains(&el.tag) {
                return;
            }
            for child in &el.children {
                write_html(child, out);
            }
            out.push_str("</");
            out.push_str(el.tag);
            out.push('>');
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn text<Msg>(content: impl ToString) -> Node<Msg> {
    Node::Text(content.to_string())
}

macro_rules! constructors {
    ($($name:ident),* $(,)?) => {
        $(
            pub fn $name<Msg>() -> Element<Msg> {
                Element::new(stringify!($name))
            }
        )*
    };
}

constructors!(a, button, div, footer, h1, header, input, label, li, section, span, strong, ul);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_accumulates() {
        let el: Element<()> = li().class("completed").class_if(true, "editing").class("");
        assert_eq!(el.get_attr("class"), Some("completed editing"));
        assert!(el.has_class("editing"));
        assert!(!el.has_class("edit"));
    }

    #[test]
    fn test_to_html() {
        let node: Node<()> = section()
            .class("main")
            .child(input().attr("type", "checkbox").attr_if(true, "checked"))
            .child(label().child(text("a < b")))
            .into();
        assert_eq!(
            node.to_html(),
            "<section class=\"main\"><input checked type=\"checkbox\"><label>a &lt; b</label></section>"
        );
    }

    #[test]
    fn test_find_and_text() {
        let node: Node<u8> = ul()
            .children((1..=3).map(|i| li().id(i).on("click", i).child(text(format!("#{}", i)))))
            .into();
        assert_eq!(node.find_all(&|el| el.tag == "li").len(), 3);
        let second = node.find_by_id("2").unwrap();
        assert_eq!(second.events.get("click"), Some(&2));
        assert_eq!(node.text_content(), "#1#2#3");
    }
}
