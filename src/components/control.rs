use std::rc::Rc;

use yew::Callback;

use crate::config::ControlOptions;
use crate::consts::{BUTTON_CLASS, CONTROL_CLASS, CONTROL_TEXT_CLASS};
use crate::dom::{ActivationListener, Document, Element};
use crate::language::Language;
use crate::Error;

/// An activatable control element.
///
/// `Control` owns a `<button>` root element and the hidden control text span carrying the
/// accessible label of the control. Concrete controls build on top of it by composition and
/// add their own children to [`el`].
///
/// [`el`]: Self::el
#[derive(Debug)]
pub struct Control {
    el: Element,
    control_text_el: Element,
    language: Rc<Language>,
    activation: Option<ActivationListener>,
}

impl Control {
    /// Creates a new `Control` with `class` added to the default control classes. The control
    /// text is set to `default_text` unless `options` overrides it.
    pub fn new(
        document: &Document,
        class: &str,
        default_text: &str,
        options: &ControlOptions,
        language: Rc<Language>,
    ) -> Result<Self, Error> {
        let el = document.create_element("button")?;
        el.set_attribute("type", "button");
        el.set_attribute(
            "class",
            &format!("{} {} {}", class, CONTROL_CLASS, BUTTON_CLASS),
        );

        if let Some(class_name) = &options.class_name {
            for class in class_name.split_whitespace() {
                el.add_class(class);
            }
        }

        let control_text_el = document.create_element("span")?;
        control_text_el.set_attribute("class", CONTROL_TEXT_CLASS);
        control_text_el.set_attribute("aria-live", "polite");
        el.append_child(&control_text_el)?;

        let this = Self {
            el,
            control_text_el,
            language,
            activation: None,
        };

        this.control_text(options.control_text.as_deref().unwrap_or(default_text));

        Ok(this)
    }

    /// Returns the root element of the control.
    #[inline]
    pub fn el(&self) -> &Element {
        &self.el
    }

    #[inline]
    pub fn localize(&self, key: &str) -> String {
        self.language.localize(key)
    }

    /// Sets the accessible label of the control. The text is localized before it is applied
    /// to the control text span and the `title` of the control.
    pub fn control_text(&self, text: &str) {
        let text = self.localize(text);

        self.control_text_el.set_text(&text);
        self.el.set_attribute("title", &text);
    }

    #[inline]
    pub fn add_class(&self, class: &str) {
        self.el.add_class(class);
    }

    #[inline]
    pub fn remove_class(&self, class: &str) {
        self.el.remove_class(class);
    }

    #[inline]
    pub fn has_class(&self, class: &str) -> bool {
        self.el.has_class(class)
    }

    #[inline]
    pub fn set_attribute(&self, name: &str, value: &str) {
        self.el.set_attribute(name, value);
    }

    pub fn set_aria_disabled(&self, disabled: bool) {
        self.set_attribute("aria-disabled", if disabled { "true" } else { "false" });
    }

    /// Returns `true` if the control currently rejects activation.
    #[inline]
    pub fn is_disabled(&self) -> bool {
        is_disabled(&self.el)
    }

    /// Calls `callback` whenever the control is activated while it is enabled. Replaces any
    /// previously registered callback.
    pub fn on_activate(&mut self, callback: Callback<()>) {
        let el = self.el.clone();

        let listener = self.el.on_activate(Callback::from(move |()| {
            if is_disabled(&el) {
                log::trace!("Ignoring activation of disabled control");
                return;
            }

            callback.emit(());
        }));

        self.activation = Some(listener);
    }

    /// Removes the activation callback and detaches the control from the document.
    pub fn dispose(mut self) {
        self.activation = None;
        self.el.remove();
    }
}

fn is_disabled(el: &Element) -> bool {
    el.attribute("aria-disabled").as_deref() == Some("true") || el.attribute("disabled").is_some()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use yew::Callback;

    use super::Control;
    use crate::config::ControlOptions;
    use crate::dom::Document;
    use crate::language::Language;

    fn control(document: &Document, options: &ControlOptions, language: Language) -> Control {
        Control::new(document, "test-control", "Test", options, Rc::new(language)).unwrap()
    }

    #[test]
    fn test_control_create() {
        let document = Document::new();
        let options = ControlOptions {
            class_name: Some(String::from("extra other")),
            control_text: None,
        };

        let control = control(&document, &options, Language::new());
        let el = control.el();

        assert_eq!(el.attribute("type").as_deref(), Some("button"));
        assert_eq!(
            el.attribute("class").as_deref(),
            Some("test-control vjs-control vjs-button extra other")
        );

        let children = el.children();
        assert_eq!(children.len(), 1);
        assert!(children[0].has_class("vjs-control-text"));
        assert_eq!(children[0].attribute("aria-live").as_deref(), Some("polite"));
        assert_eq!(children[0].text(), "Test");
        assert_eq!(el.attribute("title").as_deref(), Some("Test"));
    }

    #[test]
    fn test_control_text_localized() {
        let document = Document::new();
        let options = ControlOptions {
            class_name: None,
            control_text: Some(String::from("Initial")),
        };

        let mut language = Language::new();
        language.insert("Play", "Abspielen");

        let control = control(&document, &options, language);
        assert_eq!(control.el().children()[0].text(), "Initial");

        control.control_text("Play");
        assert_eq!(control.el().children()[0].text(), "Abspielen");
        assert_eq!(control.el().attribute("title").as_deref(), Some("Abspielen"));
    }

    #[test]
    fn test_control_disabled_activation() {
        let document = Document::new();
        let mut control = control(&document, &ControlOptions::default(), Language::new());

        let clicks = Rc::new(Cell::new(0));
        {
            let clicks = clicks.clone();
            control.on_activate(Callback::from(move |()| clicks.set(clicks.get() + 1)));
        }

        control.el().activate();
        assert_eq!(clicks.get(), 1);

        control.set_aria_disabled(true);
        assert!(control.is_disabled());
        control.el().activate();
        assert_eq!(clicks.get(), 1);

        control.set_aria_disabled(false);
        assert!(!control.is_disabled());
        control.el().activate();
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn test_control_dispose() {
        let document = Document::new();
        let body = document.body().unwrap();
        let mut control = control(&document, &ControlOptions::default(), Language::new());

        let clicks = Rc::new(Cell::new(0));
        {
            let clicks = clicks.clone();
            control.on_activate(Callback::from(move |()| clicks.set(clicks.get() + 1)));
        }

        let el = control.el().clone();
        body.append_child(&el).unwrap();

        control.dispose();
        assert!(body.children().is_empty());

        el.activate();
        assert_eq!(clicks.get(), 0);
    }
}
