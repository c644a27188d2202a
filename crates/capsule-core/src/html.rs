//! View trees
//!
//! [`Html`] is the view artifact a program renders from its model. Event
//! listeners carry the message to produce, so a view can be re-targeted to a
//! parent's message type with [`Html::map`] and nested to any depth.

use std::fmt::{self, Write as _};
use std::rc::Rc;

type Handler<Msg> = Rc<dyn Fn(&str) -> Msg>;

/// An event listener attached to an element.
pub struct Listener<Msg> {
    event: String,
    handler: Handler<Msg>,
}

impl<Msg> Clone for Listener<Msg> {
    fn clone(&self) -> Self {
        Self {
            event: self.event.clone(),
            handler: Rc::clone(&self.handler),
        }
    }
}

impl<Msg> Listener<Msg> {
    /// Name of the DOM-style event (`click`, `input`, ...).
    pub fn event(&self) -> &str {
        &self.event
    }
}

/// An element node.
pub struct Element<Msg> {
    tag: String,
    attributes: Vec<(String, String)>,
    listeners: Vec<Listener<Msg>>,
    children: Vec<Html<Msg>>,
}

impl<Msg> Clone for Element<Msg> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attributes: self.attributes.clone(),
            listeners: self.listeners.clone(),
            children: self.children.clone(),
        }
    }
}

impl<Msg: 'static> Element<Msg> {
    /// Set an attribute, replacing an earlier value for the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Shorthand for the `id` attribute, used by [`Html::trigger`].
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Produce `msg` when clicked.
    pub fn on_click(self, msg: Msg) -> Self
    where
        Msg: Clone,
    {
        self.on("click", move |_| msg.clone())
    }

    /// Produce a message from the new value on every input.
    pub fn on_input(self, f: impl Fn(String) -> Msg + 'static) -> Self {
        self.on("input", move |value| f(value.to_string()))
    }

    /// Attach a listener for an arbitrary event name.
    pub fn on(mut self, event: impl Into<String>, handler: impl Fn(&str) -> Msg + 'static) -> Self {
        self.listeners.push(Listener {
            event: event.into(),
            handler: Rc::new(handler),
        });
        self
    }

    /// Append one child.
    pub fn child(mut self, child: impl Into<Html<Msg>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn children(mut self, children: impl IntoIterator<Item = Html<Msg>>) -> Self {
        self.children.extend(children);
        self
    }

    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    /// Element tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

/// A node in a view tree.
pub enum Html<Msg> {
    /// Text node
    Text(String),
    /// Element node
    Element(Element<Msg>),
}

impl<Msg> Clone for Html<Msg> {
    fn clone(&self) -> Self {
        match self {
            Html::Text(text) => Html::Text(text.clone()),
            Html::Element(element) => Html::Element(element.clone()),
        }
    }
}

impl<Msg: 'static> From<Element<Msg>> for Html<Msg> {
    fn from(element: Element<Msg>) -> Self {
        Html::Element(element)
    }
}

impl<Msg: 'static> Html<Msg> {
    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        Html::Text(text.into())
    }

    /// The blank view.
    pub fn empty() -> Self {
        Html::Text(String::new())
    }

    /// Start building an element.
    pub fn element(tag: impl Into<String>) -> Element<Msg> {
        Element {
            tag: tag.into(),
            attributes: Vec::new(),
            listeners: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Whether this is the blank view.
    pub fn is_empty(&self) -> bool {
        matches!(self, Html::Text(text) if text.is_empty())
    }

    /// Re-target every listener to produce `B` instead of `Msg`.
    pub fn map<B: 'static>(self, f: impl Fn(Msg) -> B + 'static) -> Html<B> {
        let f: Rc<dyn Fn(Msg) -> B> = Rc::new(f);
        self.map_shared(&f)
    }

    fn map_shared<B: 'static>(self, f: &Rc<dyn Fn(Msg) -> B>) -> Html<B> {
        match self {
            Html::Text(text) => Html::Text(text),
            Html::Element(element) => Html::Element(Element {
                tag: element.tag,
                attributes: element.attributes,
                listeners: element
                    .listeners
                    .into_iter()
                    .map(|listener| {
                        let f = Rc::clone(f);
                        let handler = listener.handler;
                        Listener {
                            event: listener.event,
                            handler: Rc::new(move |value: &str| f(handler(value))) as Handler<B>,
                        }
                    })
                    .collect(),
                children: element
                    .children
                    .into_iter()
                    .map(|child| child.map_shared(f))
                    .collect(),
            }),
        }
    }

    /// Concatenated text of every text node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Html::Text(text) => out.push_str(text),
            Html::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serialise to escaped markup. Listeners are not rendered.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Html::Text(text) => escape_into(text, out),
            Html::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                for (name, value) in &element.attributes {
                    let _ = write!(out, " {name}=\"");
                    escape_into(value, out);
                    out.push('"');
                }
                out.push('>');
                for child in &element.children {
                    child.render_into(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }

    /// Find the element with the given `id` and fire its `event` listener.
    ///
    /// Returns `None` when no such element or listener exists.
    pub fn trigger(&self, id: &str, event: &str, value: &str) -> Option<Msg> {
        match self {
            Html::Text(_) => None,
            Html::Element(element) => {
                if element.attribute("id") == Some(id) {
                    if let Some(listener) = element.listeners.iter().find(|l| l.event == event) {
                        return Some((listener.handler)(value));
                    }
                }
                element
                    .children
                    .iter()
                    .find_map(|child| child.trigger(id, event, value))
            }
        }
    }
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

impl<Msg: 'static> fmt::Debug for Html<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
