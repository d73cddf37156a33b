use super::{icon, Component, View};
use crate::{
	node::{DisplayNode, Element},
	state::RecipeSummary,
};

/// A list of recipe previews, one of which may be highlighted as the recipe currently shown.
#[derive(Debug, Clone, Copy)]
pub struct Previews<'a> {
	pub items: &'a [RecipeSummary],
	pub active_id: Option<&'a str>,
}

/// The highlight and the user-generated marker are expressed as classes only,
/// so moving the highlight or re-rendering the same list is always a patch.
fn preview(summary: &RecipeSummary, active: bool, icons: &str) -> Element {
	let link_class = if active { "preview__link preview__link--active" } else { "preview__link" };
	let user_generated_class = if summary.key.is_some() {
		"preview__user-generated"
	} else {
		"preview__user-generated hidden"
	};

	Element::new("li").with_class("preview").with_child(
		Element::new("a")
			.with_class(link_class)
			.with_attribute("href", format!("#{}", summary.id))
			.with_child(
				Element::new("figure")
					.with_class("preview__fig")
					.with_child(Element::new("img").with_attribute("src", &summary.image).with_attribute("alt", &summary.title)),
			)
			.with_child(
				Element::new("div")
					.with_class("preview__data")
					.with_child(Element::new("h4").with_class("preview__title").with_text(&summary.title))
					.with_child(Element::new("p").with_class("preview__publisher").with_text(&summary.publisher))
					.with_child(Element::new("div").with_class(user_generated_class).with_child(icon(icons, "icon-user", None))),
			),
	)
}

fn previews(data: &Previews<'_>, icons: &str) -> DisplayNode {
	data.items
		.iter()
		.map(|summary| preview(summary, data.active_id == Some(summary.id.as_str()), icons).into())
		.collect::<Vec<DisplayNode>>()
		.into()
}

/// The current page of search results.
#[derive(Debug, Clone)]
pub struct ResultsView {
	icons: String,
}

impl ResultsView {
	#[must_use]
	pub fn new(icons: impl Into<String>) -> Self {
		Self { icons: icons.into() }
	}
}

impl Component for ResultsView {
	fn icons(&self) -> &str {
		&self.icons
	}

	fn error_message(&self) -> &str {
		"No recipes found for your query! Please try again"
	}
}

impl<'a> View<Previews<'a>> for ResultsView {
	fn generate_tree(&self, data: &Previews<'a>) -> DisplayNode {
		previews(data, &self.icons)
	}

	fn is_empty(&self, data: &Previews<'a>) -> bool {
		data.items.is_empty()
	}
}

/// All bookmarks.
#[derive(Debug, Clone)]
pub struct BookmarksView {
	icons: String,
}

impl BookmarksView {
	#[must_use]
	pub fn new(icons: impl Into<String>) -> Self {
		Self { icons: icons.into() }
	}
}

impl Component for BookmarksView {
	fn icons(&self) -> &str {
		&self.icons
	}

	fn error_message(&self) -> &str {
		"No bookmarks yet. Find a nice recipe and bookmark it"
	}
}

impl<'a> View<Previews<'a>> for BookmarksView {
	fn generate_tree(&self, data: &Previews<'a>) -> DisplayNode {
		previews(data, &self.icons)
	}

	fn is_empty(&self, data: &Previews<'a>) -> bool {
		data.items.is_empty()
	}
}
