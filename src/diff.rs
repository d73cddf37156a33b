use crate::{
	node::{DisplayNode, Element},
	surface::Surface,
};
use thiserror::Error;
use tracing::{error, info, instrument, level_filters::STATIC_MAX_LEVEL, trace, trace_span, Level};

/// Attached to a specific [`Surface`] during instantiation, this `struct` keeps the surface's live tree in line with freshly generated candidate trees.
///
/// Candidates are *not* retained between calls. The only tree the reconciler knows about is the one currently attached to the surface.
///
/// # Correct Use
///
/// [`TreeReconciler::update`] is a fine-grained update mechanism, not a general tree diff.
/// It pairs elements of the live tree and the candidate by pre-order index, so both must have the same shape.
/// Call it only with trees generated from data of the same shape as the previously rendered data,
/// and use [`TreeReconciler::render`] for transitions between shapes (e.g. from a spinner to a recipe).
///
/// Violating this is not unsafe: the reconciler logs an error and falls back to full replacement.
#[derive(Debug)]
pub struct TreeReconciler<S> {
	surface: S,
}

/// A single in-place write computed by [`diff`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
	/// Replace all children of the `index`th element with one text node.
	SetText { index: usize, text: String },
	/// Add or overwrite one attribute of the `index`th element.
	SetAttribute { index: usize, name: String, value: String },
}

impl Patch {
	#[must_use]
	pub fn index(&self) -> usize {
		match *self {
			Self::SetText { index, .. } | Self::SetAttribute { index, .. } => index,
		}
	}
}

/// The live tree and the candidate can't be paired element by element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
	#[error("Expected {live} element(s) but the candidate has {candidate}")]
	Count { live: usize, candidate: usize },
	#[error("Expected <{live}> at pre-order index {index} but the candidate has <{candidate}>")]
	Tag { index: usize, live: String, candidate: String },
}

/// How [`TreeReconciler::update`] brought the surface in line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
	/// The live tree was patched in place with this many writes.
	Patched(usize),
	/// The trees had different shapes, so the candidate replaced the live tree wholesale.
	Replaced,
}

impl<S: Surface> TreeReconciler<S> {
	#[must_use]
	pub fn new(surface: S) -> Self {
		Self { surface }
	}

	#[must_use]
	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	#[must_use]
	pub fn into_surface(self) -> S {
		self.surface
	}

	/// Discards the live tree and attaches `tree` as the new one.
	#[instrument(skip(self, tree))]
	pub fn render(&mut self, tree: DisplayNode) {
		trace!("Replacing the live tree.");
		self.surface.replace(tree);
	}

	/// Patches the live tree in place so that it becomes observably equivalent to `candidate`.
	///
	/// See [Correct Use](`TreeReconciler`#correct-use).
	#[instrument(skip(self, candidate))]
	pub fn update(&mut self, candidate: &DisplayNode) -> Outcome {
		let patches = diff(&self.surface.snapshot(), candidate);
		let patches = match patches {
			Ok(patches) => patches,
			Err(mismatch) => {
				error!("{}; Replacing the live tree instead of updating it.", mismatch);
				self.surface.replace(candidate.clone());
				return Outcome::Replaced;
			}
		};

		let mut texts = 0_usize;
		let mut attributes = 0_usize;
		// Descendants first, so that a text replacement on an ancestor can't shift indices that are still pending.
		for patch in patches.iter().rev() {
			match patch {
				Patch::SetText { index, text } => {
					texts += 1;
					self.surface.set_text_content(*index, text)
				}
				Patch::SetAttribute { index, name, value } => {
					attributes += 1;
					self.surface.set_attribute(*index, name, value)
				}
			}
		}
		info!("Applied {} text and {} attribute mutation(s).", texts, attributes);
		Outcome::Patched(patches.len())
	}
}

/// Computes the in-place writes that bring `live` in line with `candidate`, in ascending index order.
///
/// For each structurally unequal element pair:
///
/// - if the candidate element's first child is text with non-whitespace content, and the children differ, its text content replaces the live element's children;
/// - every candidate attribute whose value differs from (or is missing on) the live element is set.
///
/// Attributes present only on the live element are left alone.
///
/// # Errors
///
/// Iff the two trees don't have the same element count and tag sequence.
pub fn diff(live: &DisplayNode, candidate: &DisplayNode) -> Result<Vec<Patch>, ShapeMismatch> {
	let live_elements = live.elements();
	let candidate_elements = candidate.elements();
	if live_elements.len() != candidate_elements.len() {
		return Err(ShapeMismatch::Count {
			live: live_elements.len(),
			candidate: candidate_elements.len(),
		});
	}

	let mut patches = Vec::new();
	for (index, (&old, &new)) in live_elements.iter().zip(&candidate_elements).enumerate() {
		if old.name != new.name {
			return Err(ShapeMismatch::Tag {
				index,
				live: old.name.clone(),
				candidate: new.name.clone(),
			});
		}

		let span = trace_span!("Diffing element", index, tag = %new.name);
		let _enter = span.enter();

		if old.is_equal_node(new) {
			continue;
		}

		if let Some(DisplayNode::Text(first)) = new.first_child() {
			if !first.trim().is_empty() && !old.children_equal(new) {
				let text = new.text_content();
				trace_text("Replacing text content", &text);
				patches.push(Patch::SetText { index, text });
			}
		}

		for attribute in &new.attributes {
			if old.attribute(&attribute.name) != Some(attribute.value.as_str()) {
				trace_text(&format!("Setting attribute {:?}", attribute.name), &attribute.value);
				patches.push(Patch::SetAttribute {
					index,
					name: attribute.name.clone(),
					value: attribute.value.clone(),
				});
			}
		}

		if STATIC_MAX_LEVEL >= Level::TRACE {
			log_stale_attributes(old, new);
		}
	}
	Ok(patches)
}

fn log_stale_attributes(old: &Element, new: &Element) {
	for stale in old.attributes.iter().filter(|attribute| new.attribute(&attribute.name).is_none()) {
		trace!("Keeping attribute {:?} that the candidate doesn't specify.", stale.name);
	}
}

fn trace_text(what: &str, text: &str) {
	if cfg!(feature = "dangerous-logging") {
		trace!("{}: {:?}", what, text);
	} else {
		trace!("{} ({} byte(s)).", what, text.len());
	}
}
