use gloo_events::EventListener;
use yew::Callback;

use crate::Error;

/// A handle to the browser document.
#[derive(Clone, Debug)]
pub struct Document {
    inner: web_sys::Document,
}

impl Document {
    /// Returns the document of the current window.
    pub fn global() -> Result<Self, Error> {
        let inner = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| Error::Dom(String::from("no window document")))?;

        Ok(Self { inner })
    }

    pub fn create_element(&self, tag: &str) -> Result<Element, Error> {
        let inner = self.inner.create_element(tag).map_err(Error::dom)?;

        Ok(Element { inner })
    }

    pub fn body(&self) -> Result<Element, Error> {
        match self.inner.body() {
            Some(body) => Ok(Element { inner: body.into() }),
            None => Err(Error::Dom(String::from("document has no body"))),
        }
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.inner
            .get_element_by_id(id)
            .map(|inner| Element { inner })
    }
}

/// A handle to a DOM element.
///
/// Mutations that the browser rejects are logged and otherwise ignored.
#[derive(Clone, Debug)]
pub struct Element {
    inner: web_sys::Element,
}

impl Element {
    /// Returns the underlying `web_sys` element.
    #[inline]
    pub fn as_web_sys(&self) -> &web_sys::Element {
        &self.inner
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.inner.set_attribute(name, value) {
            log::error!("Failed to set attribute {}: {:?}", name, err);
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.get_attribute(name)
    }

    pub fn add_class(&self, class: &str) {
        if let Err(err) = self.inner.class_list().add_1(class) {
            log::error!("Failed to add class {}: {:?}", class, err);
        }
    }

    pub fn remove_class(&self, class: &str) {
        if let Err(err) = self.inner.class_list().remove_1(class) {
            log::error!("Failed to remove class {}: {:?}", class, err);
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.class_list().contains(class)
    }

    /// Replaces all children of the element with a single text node.
    pub fn set_text(&self, text: &str) {
        self.inner.set_text_content(Some(text));
    }

    /// Returns the text content of the element and all of its descendants.
    pub fn text(&self) -> String {
        self.inner.text_content().unwrap_or_default()
    }

    pub fn append_child(&self, child: &Element) -> Result<(), Error> {
        self.inner.append_child(&child.inner).map_err(Error::dom)?;
        Ok(())
    }

    /// Detaches the element from its parent. Does nothing if the element has no parent.
    pub fn remove(&self) {
        self.inner.remove();
    }

    pub fn children(&self) -> Vec<Element> {
        let children = self.inner.children();

        (0..children.length())
            .filter_map(|index| children.item(index))
            .map(|inner| Element { inner })
            .collect()
    }

    /// Returns `true` if both handles refer to the same node.
    pub fn same_node(&self, other: &Element) -> bool {
        let node: &web_sys::Node = other.inner.as_ref();
        self.inner.is_same_node(Some(node))
    }

    /// Calls `callback` whenever the element is activated until the returned
    /// [`ActivationListener`] is dropped.
    ///
    /// `<button>` elements synthesize `click` events for keyboard activation (Enter and
    /// Space), so listening to `click` covers both input methods.
    pub fn on_activate(&self, callback: Callback<()>) -> ActivationListener {
        let listener = EventListener::new(&self.inner, "click", move |_| callback.emit(()));

        ActivationListener {
            _listener: listener,
        }
    }
}

/// An activation listener registered by [`Element::on_activate`]. The listener is removed
/// when this value is dropped.
#[derive(Debug)]
#[must_use = "the listener is removed when dropped"]
pub struct ActivationListener {
    _listener: EventListener,
}
