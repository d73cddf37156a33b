//! Views turn state slices into display trees; [`ViewSlot`]s attach them to surfaces.

use crate::{
	diff::{Outcome, TreeReconciler},
	node::{DisplayNode, Element},
	surface::Surface,
};
use tracing::{instrument, trace};

mod pagination;
mod preview;
mod recipe;
mod upload;

pub use self::{
	pagination::PaginationView,
	preview::{BookmarksView, Previews, ResultsView},
	recipe::RecipeView,
	upload::UploadView,
};

/// What every renderable region knows about itself, independent of the data it renders.
pub trait Component {
	/// URL of the icon sprite.
	fn icons(&self) -> &str;

	/// Shown for missing or empty data, and by [`ViewSlot::render_error`] without an override.
	fn error_message(&self) -> &str;

	/// Shown by [`ViewSlot::render_message`] without an override.
	fn message(&self) -> &str {
		""
	}
}

/// Generates display trees from data of type `D`.
///
/// Calling [`View::generate_tree`] twice with data of the same *shape* must yield trees with the same pre-order element structure,
/// so that [`ViewSlot::update`] can patch one into the other.
pub trait View<D: ?Sized>: Component {
	fn generate_tree(&self, data: &D) -> DisplayNode;

	/// Empty data is rendered as an error instead.
	fn is_empty(&self, _data: &D) -> bool {
		false
	}
}

/// A view bound to the surface it renders into.
#[derive(Debug)]
pub struct ViewSlot<V, S> {
	view: V,
	reconciler: TreeReconciler<S>,
}

impl<V: Component, S: Surface> ViewSlot<V, S> {
	#[must_use]
	pub fn new(view: V, surface: S) -> Self {
		Self {
			view,
			reconciler: TreeReconciler::new(surface),
		}
	}

	#[must_use]
	pub fn view(&self) -> &V {
		&self.view
	}

	#[must_use]
	pub fn surface(&self) -> &S {
		self.reconciler.surface()
	}

	pub fn surface_mut(&mut self) -> &mut S {
		self.reconciler.surface_mut()
	}

	/// Replaces the surface content with the tree for `data`, or with the default error if there's no data.
	#[instrument(skip(self, data))]
	pub fn render<D: ?Sized>(&mut self, data: Option<&D>)
	where
		V: View<D>,
	{
		match data.filter(|data| !self.view.is_empty(data)) {
			Some(data) => {
				let tree = self.view.generate_tree(data);
				self.reconciler.render(tree);
			}
			None => {
				trace!("No data.");
				self.render_error(None);
			}
		}
	}

	/// Patches the surface content towards the tree for `data`, or replaces it with the default error if there's no data.
	///
	/// Returns [`None`] iff the error was rendered.
	#[instrument(skip(self, data))]
	pub fn update<D: ?Sized>(&mut self, data: Option<&D>) -> Option<Outcome>
	where
		V: View<D>,
	{
		match data.filter(|data| !self.view.is_empty(data)) {
			Some(data) => {
				let tree = self.view.generate_tree(data);
				Some(self.reconciler.update(&tree))
			}
			None => {
				trace!("No data.");
				self.render_error(None);
				None
			}
		}
	}

	pub fn render_error(&mut self, message: Option<&str>) {
		let message = message.unwrap_or_else(|| self.view.error_message());
		let tree = status_tree("error", self.view.icons(), "icon-alert-triangle", message);
		self.reconciler.render(tree);
	}

	pub fn render_message(&mut self, message: Option<&str>) {
		let message = message.unwrap_or_else(|| self.view.message());
		let tree = status_tree("message", self.view.icons(), "icon-smile", message);
		self.reconciler.render(tree);
	}

	pub fn render_spinner(&mut self) {
		let tree = Element::new("div").with_class("spinner").with_child(icon(self.view.icons(), "icon-loader", None));
		self.reconciler.render(tree.into());
	}
}

fn status_tree(class: &str, icons: &str, icon_name: &str, message: &str) -> DisplayNode {
	Element::new("div")
		.with_class(class)
		.with_child(Element::new("div").with_child(icon(icons, icon_name, None)))
		.with_child(Element::new("p").with_text(message))
		.into()
}

/// `<svg class="…"><use href="{icons}#{name}"></use></svg>`
pub(crate) fn icon(icons: &str, name: &str, class: Option<&str>) -> Element {
	let svg = Element::new("svg");
	let svg = match class {
		Some(class) => svg.with_class(class),
		None => svg,
	};
	svg.with_child(Element::new("use").with_attribute("href", format!("{}#{}", icons, name)))
}
