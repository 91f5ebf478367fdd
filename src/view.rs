//! View
//!
//! Pure projection of the model into a DOM tree description. Event
//! handlers are `Action` values attached to elements.

use elmish_dom::{
    a, button, div, footer, h1, header, input, label, li, section, span, strong, text, ul, Node,
    KEY_ATTR,
};

use crate::action::Action;
use crate::models::{Filter, Model, TodoItem};

pub type Html = Node<Action>;

/// A single `<li>`: toggle checkbox, label, destroy button, and the edit
/// field when this item is being edited
pub fn render_item(item: &TodoItem, model: &Model) -> Html {
    let editing = model.editing == Some(item.id);

    let controls = div()
        .class("view")
        .child(
            input()
                .class("toggle")
                .attr("type", "checkbox")
                .attr_if(item.done, "checked")
                .on("click", Action::Toggle(item.id)),
        )
        .child(label().on("click", Action::Edit(item.id)).child(text(&item.title)))
        .child(button().class("destroy").on("click", Action::Delete(item.id)));

    let mut row = li()
        .attr(KEY_ATTR, item.id)
        .id(item.id)
        .class_if(item.done, "completed")
        .class_if(editing, "editing")
        .child(controls);

    if editing {
        row = row.child(
            input()
                .class("edit")
                .id(item.id)
                .attr("value", &item.title)
                .attr("autofocus", ""),
        );
    }
    row.into()
}

/// `<section class="main">` with the toggle-all control and the filtered list
pub fn render_main(model: &Model) -> Html {
    section()
        .class("main")
        .id("main")
        .shown(!model.todos.is_empty())
        .child(
            input()
                .id("toggle-all")
                .attr("type", "checkbox")
                .class("toggle-all")
                .attr_if(model.all_done, "checked")
                .on("click", Action::ToggleAll),
        )
        .child(label().attr("for", "toggle-all").child(text("Mark all as complete")))
        .child(
            ul().class("todo-list")
                .children(model.visible_todos().map(|item| render_item(item, model))),
        )
        .into()
}

/// "item" only for exactly one
pub fn items_left_label(count: usize) -> &'static str {
    if count == 1 {
        " item left"
    } else {
        " items left"
    }
}

/// `<footer>` with the remaining count, filter links and clear-completed.
/// Counts ignore the active filter.
pub fn render_footer(model: &Model) -> Html {
    let remaining = model.remaining_count();
    let completed = model.completed_count();
    let current = model.filter();

    let filters = ul().class("filters").children(Filter::ALL.into_iter().map(|filter| {
        li().child(
            a().attr("href", filter.hash())
                .id(filter.link_id())
                .class_if(filter == current, "selected")
                .child(text(filter.label())),
        )
    }));

    footer()
        .class("footer")
        .id("footer")
        .shown(remaining > 0 || completed > 0)
        .child(
            span()
                .class("todo-count")
                .id("count")
                .child(strong().child(text(remaining)))
                .child(text(items_left_label(remaining))),
        )
        .child(filters)
        .child(
            button()
                .class("clear-completed")
                .shown(completed > 0)
                .on("click", Action::ClearCompleted)
                .child(text("Clear completed ["))
                .child(span().id("completed-count").child(text(completed)))
                .child(text("]")),
        )
        .into()
}

/// The whole app
pub fn view(model: &Model) -> Html {
    section()
        .class("todoapp")
        .child(
            header()
                .class("header")
                .child(h1().child(text("Todo List")))
                .child(
                    input()
                        .id("new-todo")
                        .class("new-todo")
                        .attr("placeholder", "Add an item...")
                        .attr("autofocus", ""),
                ),
        )
        .child(render_main(model))
        .child(render_footer(model))
        .into()
}
