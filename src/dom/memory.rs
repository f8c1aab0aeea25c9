use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Formatter};
use std::rc::{Rc, Weak};

use yew::Callback;

use crate::Error;

#[derive(Default)]
struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    children: Vec<Element>,
    parent: Weak<RefCell<NodeData>>,
    listeners: BTreeMap<usize, Callback<()>>,
    next_listener: usize,
}

/// A detached in-memory document.
#[derive(Clone, Debug)]
pub struct Document {
    body: Element,
}

impl Document {
    /// Creates a new empty document containing only a `<body>`.
    pub fn new() -> Self {
        Self {
            body: Element::new("body"),
        }
    }

    /// There is no global document outside of a browser.
    pub fn global() -> Result<Self, Error> {
        Err(Error::Dom(String::from("no global document on this target")))
    }

    pub fn create_element(&self, tag: &str) -> Result<Element, Error> {
        Ok(Element::new(tag))
    }

    pub fn body(&self) -> Result<Element, Error> {
        Ok(self.body.clone())
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.body.find(&|el: &Element| el.attribute("id").as_deref() == Some(id))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// A handle to an in-memory element.
#[derive(Clone)]
pub struct Element {
    inner: Rc<RefCell<NodeData>>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            inner: Rc::new(RefCell::new(NodeData {
                tag: tag.to_ascii_uppercase(),
                ..Default::default()
            })),
        }
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        let mut inner = self.inner.borrow_mut();

        if name == "class" {
            inner.classes = value.split_whitespace().map(str::to_owned).collect();
        } else {
            inner.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        let inner = self.inner.borrow();

        if name == "class" {
            if inner.classes.is_empty() {
                None
            } else {
                Some(inner.classes.join(" "))
            }
        } else {
            inner.attributes.get(name).cloned()
        }
    }

    pub fn add_class(&self, class: &str) {
        let mut inner = self.inner.borrow_mut();

        if !inner.classes.iter().any(|c| c == class) {
            inner.classes.push(class.to_owned());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.inner.borrow_mut().classes.retain(|c| c != class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.borrow().classes.iter().any(|c| c == class)
    }

    /// Replaces all children of the element with a single text node.
    pub fn set_text(&self, text: &str) {
        let children = {
            let mut inner = self.inner.borrow_mut();
            inner.text = text.to_owned();
            std::mem::take(&mut inner.children)
        };

        for child in children {
            child.inner.borrow_mut().parent = Weak::new();
        }
    }

    /// Returns the text content of the element and all of its descendants.
    pub fn text(&self) -> String {
        let inner = self.inner.borrow();

        let mut text = inner.text.clone();
        for child in &inner.children {
            text.push_str(&child.text());
        }

        text
    }

    /// Appends `child` to the children of this element, moving it out of its previous parent.
    pub fn append_child(&self, child: &Element) -> Result<(), Error> {
        if self.same_node(child) || child.contains(self) {
            return Err(Error::Dom(String::from(
                "cannot append an element to itself or its descendants",
            )));
        }

        child.remove();

        child.inner.borrow_mut().parent = Rc::downgrade(&self.inner);
        self.inner.borrow_mut().children.push(child.clone());

        Ok(())
    }

    /// Detaches the element from its parent. Does nothing if the element has no parent.
    pub fn remove(&self) {
        let parent = std::mem::take(&mut self.inner.borrow_mut().parent);

        if let Some(parent) = parent.upgrade() {
            parent
                .borrow_mut()
                .children
                .retain(|child| !child.same_node(self));
        }
    }

    pub fn children(&self) -> Vec<Element> {
        self.inner.borrow().children.clone()
    }

    /// Returns `true` if both handles refer to the same node.
    pub fn same_node(&self, other: &Element) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Calls `callback` whenever the element is activated (clicked) until the returned
    /// [`ActivationListener`] is dropped.
    pub fn on_activate(&self, callback: Callback<()>) -> ActivationListener {
        let mut inner = self.inner.borrow_mut();

        let id = inner.next_listener;
        inner.next_listener += 1;
        inner.listeners.insert(id, callback);

        ActivationListener {
            node: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Simulates a user click on the element.
    pub fn activate(&self) {
        // Listeners may drop themselves while being called.
        let listeners: Vec<_> = self.inner.borrow().listeners.values().cloned().collect();

        for listener in listeners {
            listener.emit(());
        }
    }

    fn contains(&self, other: &Element) -> bool {
        self.find(&|el: &Element| el.same_node(other)).is_some()
    }

    fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<Element> {
        for child in self.children() {
            if predicate(&child) {
                return Some(child);
            }

            if let Some(el) = child.find(predicate) {
                return Some(el);
            }
        }

        None
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();

        f.debug_struct("Element")
            .field("tag", &inner.tag)
            .field("classes", &inner.classes)
            .field("attributes", &inner.attributes)
            .field("text", &inner.text)
            .field("children", &inner.children.len())
            .finish()
    }
}

/// An activation listener registered by [`Element::on_activate`]. The listener is removed
/// when this value is dropped.
#[derive(Debug)]
#[must_use = "the listener is removed when dropped"]
pub struct ActivationListener {
    node: Weak<RefCell<NodeData>>,
    id: usize,
}

impl Drop for ActivationListener {
    fn drop(&mut self) {
        if let Some(node) = self.node.upgrade() {
            node.borrow_mut().listeners.remove(&self.id);
        }
    }
}
