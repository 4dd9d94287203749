//! Owned element tree standing in for the host document.
//!
//! Widgets are attached directly to the elements they render into, so a
//! handle stays reachable from the document for later update or destroy
//! calls.

use crate::widget::Widget;
use chartbind_common::WidgetId;
use std::collections::BTreeMap;
use std::fmt;

/// A constructed widget stored on its target element.
pub struct WidgetHandle {
    id: WidgetId,
    widget: Box<dyn Widget>,
}

impl WidgetHandle {
    /// Wraps a widget together with its document-unique id.
    pub fn new(id: WidgetId, widget: Box<dyn Widget>) -> Self {
        Self { id, widget }
    }

    /// The id assigned when the widget was constructed.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The widget behind this handle.
    pub fn widget(&self) -> &dyn Widget {
        &*self.widget
    }

    /// Mutable access to the widget, for update and destroy calls.
    pub fn widget_mut(&mut self) -> &mut dyn Widget {
        &mut *self.widget
    }
}

impl fmt::Debug for WidgetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WidgetHandle").field(&self.id).finish()
    }
}

/// A single element in the document tree.
#[derive(Debug)]
pub struct Element {
    tag: String,
    id: Option<String>,
    attributes: BTreeMap<String, String>,
    children: Vec<Element>,
    widget: Option<WidgetHandle>,
}

impl Element {
    /// Creates an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            widget: None,
        }
    }

    /// Sets the element id, builder style.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets an attribute, builder style.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Appends a child, builder style.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// The element's tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The element's id attribute, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Looks up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the element carries the given attribute.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Sets or replaces an attribute value.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// The element's children, in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Appends a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// The widget handle stored on this element, if one is attached.
    pub fn widget(&self) -> Option<&WidgetHandle> {
        self.widget.as_ref()
    }

    /// Mutable access to the stored widget handle.
    pub fn widget_mut(&mut self) -> Option<&mut WidgetHandle> {
        self.widget.as_mut()
    }

    /// Whether a widget is currently attached.
    pub fn has_widget(&self) -> bool {
        self.widget.is_some()
    }

    /// Stores a widget handle on this element.
    ///
    /// Any previously stored widget is destroyed; its id is returned so
    /// callers can observe the replacement.
    pub fn attach_widget(&mut self, handle: WidgetHandle) -> Option<WidgetId> {
        let replaced = self.widget.replace(handle);
        replaced.map(|mut old| {
            old.widget.destroy();
            old.id
        })
    }
}

/// Path of child indices leading from the document root to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPath(Vec<usize>);

impl ElementPath {
    /// The child indices making up this path; empty means the root.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

/// The document tree plus the widget id counter for this document.
#[derive(Debug)]
pub struct Document {
    root: Element,
    next_widget_id: u64,
}

impl Document {
    /// Creates a document with an empty `body` root.
    pub fn new() -> Self {
        Self::with_root(Element::new("body"))
    }

    /// Creates a document around an existing element tree.
    pub fn with_root(root: Element) -> Self {
        Self {
            root,
            next_widget_id: 0,
        }
    }

    /// The root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Mutable access to the root element.
    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Finds the first element with the given id, depth-first pre-order.
    pub fn element_by_id(&self, id: &str) -> Option<&Element> {
        find_by_id(&self.root, id)
    }

    /// Mutable variant of [`Document::element_by_id`].
    pub fn element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        find_by_id_mut(&mut self.root, id)
    }

    /// Materializes the paths of every element carrying the attribute,
    /// in document order.
    pub fn marked_paths(&self, attribute: &str) -> Vec<ElementPath> {
        let mut paths = Vec::new();
        let mut current = Vec::new();
        collect_marked(&self.root, attribute, &mut current, &mut paths);
        paths
    }

    /// Resolves a path to the element it points at.
    pub fn element_at(&self, path: &ElementPath) -> Option<&Element> {
        let mut element = &self.root;
        for &index in path.indices() {
            element = element.children.get(index)?;
        }
        Some(element)
    }

    /// Mutable variant of [`Document::element_at`].
    pub fn element_at_mut(&mut self, path: &ElementPath) -> Option<&mut Element> {
        let mut element = &mut self.root;
        for &index in path.indices() {
            element = element.children.get_mut(index)?;
        }
        Some(element)
    }

    /// Hands out the next widget id for this document.
    pub fn allocate_widget_id(&mut self) -> WidgetId {
        let id = WidgetId(self.next_widget_id);
        self.next_widget_id += 1;
        id
    }

    /// Counts elements that currently hold a widget handle.
    pub fn widget_count(&self) -> usize {
        count_widgets(&self.root)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn find_by_id<'a>(element: &'a Element, id: &str) -> Option<&'a Element> {
    if element.id.as_deref() == Some(id) {
        return Some(element);
    }
    for child in &element.children {
        if let Some(found) = find_by_id(child, id) {
            return Some(found);
        }
    }
    None
}

fn find_by_id_mut<'a>(element: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if element.id.as_deref() == Some(id) {
        return Some(element);
    }
    for child in &mut element.children {
        if let Some(found) = find_by_id_mut(child, id) {
            return Some(found);
        }
    }
    None
}

fn collect_marked(
    element: &Element,
    attribute: &str,
    current: &mut Vec<usize>,
    paths: &mut Vec<ElementPath>,
) {
    if element.attributes.contains_key(attribute) {
        paths.push(ElementPath(current.clone()));
    }
    for (index, child) in element.children.iter().enumerate() {
        current.push(index);
        collect_marked(child, attribute, current, paths);
        current.pop();
    }
}

fn count_widgets(element: &Element) -> usize {
    let own = usize::from(element.widget.is_some());
    own + element.children.iter().map(count_widgets).sum::<usize>()
}
