//! Document root abstraction.
//!
//! The controller marks the active theme on a single root element: a class
//! from the theme's config and a `data-theme` attribute. [`RootElement`] is the
//! handle it writes through, so the same controller drives a browser document
//! (see the `web` feature) or an in-memory [`MemoryRoot`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Attribute written on the root element for the active theme.
pub const DATA_THEME_ATTRIBUTE: &str = "data-theme";

/// A root element exposing a class set and an attribute store.
pub trait RootElement {
    /// Adds a class; adding a present class is a no-op.
    fn add_class(&mut self, class: &str);

    /// Removes a class; removing an absent class is a no-op.
    fn remove_class(&mut self, class: &str);

    /// Returns whether the class is present.
    fn has_class(&self, class: &str) -> bool;

    /// Sets an attribute, replacing any previous value.
    fn set_attribute(&mut self, name: &str, value: &str);

    /// Removes an attribute.
    fn remove_attribute(&mut self, name: &str);

    /// Returns the value of an attribute, if set.
    fn attribute(&self, name: &str) -> Option<String>;
}

/// An in-memory root element.
///
/// Classes keep insertion order, like a DOM class list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryRoot {
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
}

impl MemoryRoot {
    /// Creates a root with no classes or attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a class, returning the root for chaining.
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Returns the classes in insertion order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.as_str())
    }

    /// Returns all attributes.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

impl RootElement for MemoryRoot {
    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}

impl<R: RootElement + ?Sized> RootElement for &mut R {
    fn add_class(&mut self, class: &str) {
        (**self).add_class(class)
    }

    fn remove_class(&mut self, class: &str) {
        (**self).remove_class(class)
    }

    fn has_class(&self, class: &str) -> bool {
        (**self).has_class(class)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        (**self).set_attribute(name, value)
    }

    fn remove_attribute(&mut self, name: &str) {
        (**self).remove_attribute(name)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        (**self).attribute(name)
    }
}

/// Shared roots let the caller keep a handle while the controller writes.
impl<R: RootElement + ?Sized> RootElement for Rc<RefCell<R>> {
    fn add_class(&mut self, class: &str) {
        self.borrow_mut().add_class(class)
    }

    fn remove_class(&mut self, class: &str) {
        self.borrow_mut().remove_class(class)
    }

    fn has_class(&self, class: &str) -> bool {
        self.borrow().has_class(class)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.borrow_mut().set_attribute(name, value)
    }

    fn remove_attribute(&mut self, name: &str) {
        self.borrow_mut().remove_attribute(name)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.borrow().attribute(name)
    }
}
