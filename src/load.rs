//! Snapshots live DOM content into owned [`DisplayNode`] trees.
//!
//! Comments and other non-element, non-text nodes have no [`DisplayNode`] counterpart and are skipped.

use crate::node::{Attribute, DisplayNode, Element as DElement};
use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{Attr, Element, NamedNodeMap, Node, NodeList, Text};

/// All children of `parent` as one fragment.
#[must_use]
pub fn load_children(parent: &Node) -> DisplayNode {
	DisplayNode::Multi(load_child_nodes(&parent.child_nodes()))
}

#[must_use]
pub fn load_child_nodes(child_nodes: &NodeList) -> Vec<DisplayNode> {
	(0..child_nodes.length())
		.filter_map(|i| child_nodes.item(i))
		.filter_map(|child| {
			if let Some(element) = child.dyn_ref::<Element>() {
				Some(DisplayNode::Element(load_element(element)))
			} else if let Some(text) = child.dyn_ref::<Text>() {
				Some(DisplayNode::Text(text.data()))
			} else {
				trace!("Skipping node of type {}.", child.node_type());
				None
			}
		})
		.collect()
}

#[must_use]
pub fn load_element(element: &Element) -> DElement {
	let node: &Node = element.as_ref();
	DElement {
		name: element.local_name(),
		attributes: load_attributes(&element.attributes()),
		children: load_child_nodes(&node.child_nodes()),
	}
}

#[must_use]
pub fn load_attributes(attributes: &NamedNodeMap) -> Vec<Attribute> {
	(0..attributes.length()).filter_map(|i| attributes.item(i)).map(|attribute| load_attribute(&attribute)).collect()
}

#[must_use]
pub fn load_attribute(attribute: &Attr) -> Attribute {
	Attribute {
		name: attribute.local_name(),
		value: attribute.value(),
	}
}
