use super::{icon, Component, View};
use crate::{
	node::{DisplayNode, Element},
	state::SearchState,
};

/// Previous/next page buttons for the current search.
///
/// Each button carries the page it leads to in `data-goto`.
#[derive(Debug, Clone)]
pub struct PaginationView {
	icons: String,
}

impl PaginationView {
	#[must_use]
	pub fn new(icons: impl Into<String>) -> Self {
		Self { icons: icons.into() }
	}

	fn button(&self, direction: &str, page: usize) -> Element {
		let button = Element::new("button")
			.with_class(format!("btn--inline pagination__btn--{}", direction))
			.with_attribute("data-goto", page.to_string());
		let label = Element::new("span").with_text(format!("Page {}", page));
		if direction == "prev" {
			button.with_child(icon(&self.icons, "icon-arrow-left", Some("search__icon"))).with_child(label)
		} else {
			button.with_child(label).with_child(icon(&self.icons, "icon-arrow-right", Some("search__icon")))
		}
	}
}

impl Component for PaginationView {
	fn icons(&self) -> &str {
		&self.icons
	}

	fn error_message(&self) -> &str {
		""
	}
}

impl View<SearchState> for PaginationView {
	fn generate_tree(&self, data: &SearchState) -> DisplayNode {
		let buttons = data.page_buttons();
		let mut nodes = Vec::new();
		if let Some(page) = buttons.previous {
			nodes.push(self.button("prev", page).into());
		}
		if let Some(page) = buttons.next {
			nodes.push(self.button("next", page).into());
		}
		DisplayNode::Multi(nodes)
	}
}
