//! Owned display trees.
//!
//! A [`DisplayNode`] is what views produce and what [`Surface`](`crate::surface::Surface`)s hold.
//! Trees are built fresh on every render request and are cheap to throw away.

use core::{
	fmt::{self, Write},
	slice,
};
use hashbrown::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayNode {
	Element(Element),
	Text(String),
	/// A transparent run of sibling nodes. Has no representation of its own on a surface.
	Multi(Vec<DisplayNode>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
	pub name: String,
	pub attributes: Vec<Attribute>,
	pub children: Vec<DisplayNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
	pub name: String,
	pub value: String,
}

impl DisplayNode {
	#[must_use]
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}

	/// An empty fragment.
	#[must_use]
	pub fn empty() -> Self {
		Self::Multi(Vec::new())
	}

	#[must_use]
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Self::Element(element) => Some(element),
			Self::Text(_) | Self::Multi(_) => None,
		}
	}

	/// Concatenated text of this node and all its descendants, in document order.
	#[must_use]
	pub fn text_content(&self) -> String {
		let mut text = String::new();
		self.append_text_content(&mut text);
		text
	}

	fn append_text_content(&self, buffer: &mut String) {
		match self {
			Self::Text(text) => buffer.push_str(text),
			Self::Element(element) => element.children.iter().for_each(|child| child.append_text_content(buffer)),
			Self::Multi(nodes) => nodes.iter().for_each(|node| node.append_text_content(buffer)),
		}
	}

	/// Element nodes in pre-order (depth-first, document order). Text nodes are skipped and fragments are transparent.
	#[must_use]
	pub fn elements(&self) -> Vec<&Element> {
		let mut elements = Vec::new();
		self.collect_elements(&mut elements);
		elements
	}

	fn collect_elements<'a>(&'a self, elements: &mut Vec<&'a Element>) {
		match self {
			Self::Text(_) => (),
			Self::Element(element) => {
				elements.push(element);
				element.children.iter().for_each(|child| child.collect_elements(elements));
			}
			Self::Multi(nodes) => nodes.iter().for_each(|node| node.collect_elements(elements)),
		}
	}

	/// The `index`th element in pre-order, see [`DisplayNode::elements`].
	pub fn element_at_mut(&mut self, index: usize) -> Option<&mut Element> {
		let mut remaining = index;
		self.find_element_mut(&mut remaining)
	}

	fn find_element_mut(&mut self, remaining: &mut usize) -> Option<&mut Element> {
		match self {
			Self::Text(_) => None,
			Self::Element(element) => {
				if *remaining == 0 {
					return Some(element);
				}
				*remaining -= 1;
				element.children.iter_mut().find_map(|child| child.find_element_mut(remaining))
			}
			Self::Multi(nodes) => nodes.iter_mut().find_map(|node| node.find_element_mut(remaining)),
		}
	}

	/// Deep structural equality in the sense of the DOM's `isEqualNode`:
	/// names, attribute *sets* and child sequences must match, fragments are flattened first.
	#[must_use]
	pub fn is_equal_node(&self, other: &Self) -> bool {
		sequences_equal(slice::from_ref(self), slice::from_ref(other))
	}

	fn flatten_into<'a>(&'a self, nodes: &mut Vec<&'a DisplayNode>) {
		match self {
			Self::Multi(children) => children.iter().for_each(|child| child.flatten_into(nodes)),
			Self::Element(_) | Self::Text(_) => nodes.push(self),
		}
	}

	/// Serializes the tree as HTML, for hosts that attach markup strings rather than trees.
	#[must_use]
	pub fn to_markup(&self) -> String {
		let mut markup = String::new();
		// Writing into a `String` can't fail.
		let _ = self.write_markup(&mut markup);
		markup
	}

	fn write_markup(&self, out: &mut impl Write) -> fmt::Result {
		match self {
			Self::Text(text) => write_escaped(out, text, false),
			Self::Multi(nodes) => nodes.iter().try_for_each(|node| node.write_markup(out)),
			Self::Element(element) => {
				write!(out, "<{}", element.name)?;
				for Attribute { name, value } in &element.attributes {
					write!(out, " {}=\"", name)?;
					write_escaped(out, value, true)?;
					out.write_char('"')?;
				}
				out.write_char('>')?;
				if is_void(&element.name) {
					return Ok(());
				}
				for child in &element.children {
					child.write_markup(out)?;
				}
				write!(out, "</{}>", element.name)
			}
		}
	}
}

fn sequences_equal(a: &[DisplayNode], b: &[DisplayNode]) -> bool {
	let mut flat_a = Vec::new();
	let mut flat_b = Vec::new();
	a.iter().for_each(|node| node.flatten_into(&mut flat_a));
	b.iter().for_each(|node| node.flatten_into(&mut flat_b));
	flat_a.len() == flat_b.len() && flat_a.iter().zip(&flat_b).all(|(a, b)| single_equal(a, b))
}

fn single_equal(a: &DisplayNode, b: &DisplayNode) -> bool {
	match (a, b) {
		(DisplayNode::Text(a), DisplayNode::Text(b)) => a == b,
		(DisplayNode::Element(a), DisplayNode::Element(b)) => a.is_equal_node(b),
		_ => false,
	}
}

fn same_attribute_set(a: &[Attribute], b: &[Attribute]) -> bool {
	if a.len() != b.len() {
		return false;
	}
	let a: HashMap<&str, &str> = a.iter().map(|attribute| (attribute.name.as_str(), attribute.value.as_str())).collect();
	b.iter().all(|attribute| a.get(attribute.name.as_str()) == Some(&attribute.value.as_str()))
}

fn is_void(name: &str) -> bool {
	matches!(name, "img" | "input" | "br" | "hr" | "meta" | "link")
}

fn write_escaped(out: &mut impl Write, text: &str, attribute: bool) -> fmt::Result {
	for c in text.chars() {
		match c {
			'&' => out.write_str("&amp;")?,
			'<' => out.write_str("&lt;")?,
			'>' => out.write_str("&gt;")?,
			'"' if attribute => out.write_str("&quot;")?,
			c => out.write_char(c)?,
		}
	}
	Ok(())
}

impl Element {
	#[must_use]
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			attributes: Vec::new(),
			children: Vec::new(),
		}
	}

	#[must_use]
	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes.iter().find(|attribute| attribute.name == name).map(|attribute| attribute.value.as_str())
	}

	/// Overwrites the attribute's value if it exists, appends it otherwise.
	pub fn set_attribute(&mut self, name: &str, value: &str) {
		match self.attributes.iter_mut().find(|attribute| attribute.name == name) {
			Some(attribute) => value.clone_into(&mut attribute.value),
			None => self.attributes.push(Attribute {
				name: name.to_owned(),
				value: value.to_owned(),
			}),
		}
	}

	/// Replaces all children with a single text node, like assigning `textContent`.
	pub fn set_text_content(&mut self, text: &str) {
		self.children.clear();
		if !text.is_empty() {
			self.children.push(DisplayNode::text(text));
		}
	}

	/// Compares only the children, with fragments flattened.
	#[must_use]
	pub fn children_equal(&self, other: &Self) -> bool {
		sequences_equal(&self.children, &other.children)
	}

	/// See [`DisplayNode::is_equal_node`].
	#[must_use]
	pub fn is_equal_node(&self, other: &Self) -> bool {
		self.name == other.name && same_attribute_set(&self.attributes, &other.attributes) && sequences_equal(&self.children, &other.children)
	}

	#[must_use]
	pub fn text_content(&self) -> String {
		let mut text = String::new();
		self.children.iter().for_each(|child| child.append_text_content(&mut text));
		text
	}

	/// The first child, looking through fragments.
	#[must_use]
	pub fn first_child(&self) -> Option<&DisplayNode> {
		fn first(nodes: &[DisplayNode]) -> Option<&DisplayNode> {
			nodes.iter().find_map(|node| match node {
				DisplayNode::Multi(nodes) => first(nodes),
				DisplayNode::Element(_) | DisplayNode::Text(_) => Some(node),
			})
		}
		first(&self.children)
	}

	#[must_use]
	pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push(Attribute { name: name.into(), value: value.into() });
		self
	}

	#[must_use]
	pub fn with_class(self, class: impl Into<String>) -> Self {
		self.with_attribute("class", class)
	}

	#[must_use]
	pub fn with_child(mut self, child: impl Into<DisplayNode>) -> Self {
		self.children.push(child.into());
		self
	}

	#[must_use]
	pub fn with_children<I>(mut self, children: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<DisplayNode>,
	{
		self.children.extend(children.into_iter().map(Into::into));
		self
	}

	#[must_use]
	pub fn with_text(self, text: impl Into<String>) -> Self {
		self.with_child(DisplayNode::Text(text.into()))
	}
}

impl From<Element> for DisplayNode {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}

impl From<Vec<DisplayNode>> for DisplayNode {
	fn from(nodes: Vec<DisplayNode>) -> Self {
		Self::Multi(nodes)
	}
}
