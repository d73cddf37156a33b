//! Browser bindings: a [`Surface`] over the children of a DOM element, and bookmarks in `localStorage`.

use crate::{
	error::{Error, Result},
	load,
	node::DisplayNode,
	persist::{BookmarkStore, STORAGE_KEY},
	state::RecipeSummary,
	surface::Surface,
};
use core::convert::TryFrom;
use std::borrow::Cow;
use tracing::{instrument, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Node, Storage};

/// Renders into the children of `root`. The root element itself is never touched.
#[derive(Debug, Clone)]
pub struct DomSurface {
	root: Element,
}

impl DomSurface {
	#[must_use]
	pub fn new(root: Element) -> Self {
		Self { root }
	}

	#[must_use]
	pub fn root(&self) -> &Element {
		&self.root
	}

	/// The `index`th descendant element in document order, matching [`DisplayNode::elements`].
	fn element_at(&self, index: usize) -> Option<Element> {
		let elements = match self.root.query_selector_all("*") {
			Ok(elements) => elements,
			Err(error) => {
				warn!("Could not list descendants: {:?}", error);
				return None;
			}
		};
		let element = u32::try_from(index).ok().and_then(|index| elements.item(index)).and_then(|node| node.dyn_into::<Element>().ok());
		if element.is_none() {
			warn!("Element {} is out of range. Ignoring the write.", index);
		}
		element
	}
}

impl Surface for DomSurface {
	fn snapshot(&self) -> Cow<'_, DisplayNode> {
		let node: &Node = self.root.as_ref();
		Cow::Owned(load::load_children(node))
	}

	#[instrument(skip(self, tree))]
	fn replace(&mut self, tree: DisplayNode) {
		self.root.set_inner_html(&tree.to_markup());
	}

	fn set_text_content(&mut self, index: usize, text: &str) {
		if let Some(element) = self.element_at(index) {
			let node: &Node = element.as_ref();
			node.set_text_content(Some(text));
		}
	}

	fn set_attribute(&mut self, index: usize, name: &str, value: &str) {
		if let Some(element) = self.element_at(index) {
			if let Err(error) = element.set_attribute(name, value) {
				warn!("Could not set attribute {:?}: {:?}", name, error);
			}
		}
	}
}

/// Bookmarks as one JSON snapshot in `localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
	storage: Storage,
}

fn js_error(what: &str, error: &JsValue) -> Error {
	let detail = error
		.dyn_ref::<js_sys::Error>()
		.map_or_else(|| format!("{:?}", error), |error| String::from(error.message()));
	Error::Persistence(format!("{}: {}", what, detail))
}

impl LocalStorageStore {
	/// # Errors
	///
	/// If there's no window or it has no `localStorage`.
	pub fn new() -> Result<Self> {
		let window = web_sys::window().ok_or_else(|| Error::Persistence("no window".to_owned()))?;
		let storage = window
			.local_storage()
			.map_err(|error| js_error("localStorage is not accessible", &error))?
			.ok_or_else(|| Error::Persistence("localStorage is unavailable".to_owned()))?;
		Ok(Self { storage })
	}
}

impl BookmarkStore for LocalStorageStore {
	fn load(&self) -> Result<Vec<RecipeSummary>> {
		match self.storage.get_item(STORAGE_KEY).map_err(|error| js_error("Could not read bookmarks", &error))? {
			Some(json) => Ok(serde_json::from_str(&json)?),
			None => Ok(Vec::new()),
		}
	}

	#[instrument(skip(self, bookmarks), fields(count = bookmarks.len()))]
	fn save(&mut self, bookmarks: &[RecipeSummary]) -> Result<()> {
		let json = serde_json::to_string(bookmarks)?;
		self.storage.set_item(STORAGE_KEY, &json).map_err(|error| js_error("Could not write bookmarks", &error))
	}
}
