//! Output surfaces a [`TreeReconciler`](`crate::diff::TreeReconciler`) writes into.
//!
//! A surface holds exactly one live tree: whatever was last attached with [`Surface::replace`],
//! plus any in-place mutations applied since. Elements are addressed by their pre-order index
//! among all elements of the live tree, see [`DisplayNode::elements`].

use crate::node::DisplayNode;
use std::borrow::Cow;
use tracing::{instrument, warn};

pub trait Surface {
	/// The currently live tree.
	///
	/// In-memory surfaces can lend it; surfaces backed by a foreign document have to load it.
	fn snapshot(&self) -> Cow<'_, DisplayNode>;

	/// Discards the live tree and attaches `tree` in its place.
	fn replace(&mut self, tree: DisplayNode);

	/// Replaces all children of the `index`th element with a single text node.
	fn set_text_content(&mut self, index: usize, text: &str);

	/// Adds or overwrites one attribute of the `index`th element.
	fn set_attribute(&mut self, index: usize, name: &str, value: &str);
}

/// One observed write, as recorded by [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
	Replace,
	SetText { index: usize, text: String },
	SetAttribute { index: usize, name: String, value: String },
}

/// A headless surface that keeps the live tree in memory and journals every write.
#[derive(Debug, Clone)]
pub struct MemorySurface {
	tree: DisplayNode,
	journal: Vec<Mutation>,
}

impl Default for MemorySurface {
	fn default() -> Self {
		Self::new()
	}
}

impl MemorySurface {
	#[must_use]
	pub fn new() -> Self {
		Self {
			tree: DisplayNode::empty(),
			journal: Vec::new(),
		}
	}

	#[must_use]
	pub fn tree(&self) -> &DisplayNode {
		&self.tree
	}

	/// Writes since construction or the last [`MemorySurface::take_journal`], oldest first.
	#[must_use]
	pub fn journal(&self) -> &[Mutation] {
		&self.journal
	}

	pub fn take_journal(&mut self) -> Vec<Mutation> {
		core::mem::take(&mut self.journal)
	}
}

impl Surface for MemorySurface {
	fn snapshot(&self) -> Cow<'_, DisplayNode> {
		Cow::Borrowed(&self.tree)
	}

	fn replace(&mut self, tree: DisplayNode) {
		self.tree = tree;
		self.journal.push(Mutation::Replace);
	}

	#[instrument(skip(self, text))]
	fn set_text_content(&mut self, index: usize, text: &str) {
		match self.tree.element_at_mut(index) {
			Some(element) => element.set_text_content(text),
			None => return warn!("No element at index {} to set text on.", index),
		}
		self.journal.push(Mutation::SetText { index, text: text.to_owned() });
	}

	#[instrument(skip(self, value))]
	fn set_attribute(&mut self, index: usize, name: &str, value: &str) {
		match self.tree.element_at_mut(index) {
			Some(element) => element.set_attribute(name, value),
			None => return warn!("No element at index {} to set attribute {:?} on.", index, name),
		}
		self.journal.push(Mutation::SetAttribute {
			index,
			name: name.to_owned(),
			value: value.to_owned(),
		});
	}
}
