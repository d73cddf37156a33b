use super::{icon, Component, View};
use crate::{
	form::{UploadFields, INGREDIENT_PREFIX, INGREDIENT_SLOTS},
	node::{DisplayNode, Element},
};

const RECIPE_FIELDS: &[(&str, &str, &str)] = &[
	("title", "Title", "text"),
	("sourceUrl", "URL", "text"),
	("image", "Image URL", "text"),
	("publisher", "Publisher", "text"),
	("cookingTime", "Prep time", "number"),
	("servings", "Servings", "number"),
];

/// The upload form, prefilled from previously entered fields.
#[derive(Debug, Clone)]
pub struct UploadView {
	icons: String,
}

impl UploadView {
	#[must_use]
	pub fn new(icons: impl Into<String>) -> Self {
		Self { icons: icons.into() }
	}
}

fn input(name: &str, kind: &str, value: &str) -> Element {
	Element::new("input")
		.with_attribute("name", name)
		.with_attribute("type", kind)
		.with_attribute("value", value)
		.with_attribute("required", "")
}

impl Component for UploadView {
	fn icons(&self) -> &str {
		&self.icons
	}

	fn error_message(&self) -> &str {
		"The recipe could not be uploaded. Please try again!"
	}

	fn message(&self) -> &str {
		"Recipe was successfully uploaded"
	}
}

impl View<UploadFields> for UploadView {
	fn generate_tree(&self, fields: &UploadFields) -> DisplayNode {
		let recipe_column = Element::new("div")
			.with_class("upload__column")
			.with_child(Element::new("h3").with_class("upload__heading").with_text("Recipe data"))
			.with_children(RECIPE_FIELDS.iter().flat_map(|&(name, label, kind)| {
				vec![
					Element::new("label").with_text(label),
					input(name, kind, fields.get(name).unwrap_or_default()),
				]
			}));

		let ingredient_column = Element::new("div")
			.with_class("upload__column")
			.with_child(Element::new("h3").with_class("upload__heading").with_text("Ingredients"))
			.with_children((1..=INGREDIENT_SLOTS).flat_map(|slot| {
				let name = format!("{}-{}", INGREDIENT_PREFIX, slot);
				let value = fields.get(&name).unwrap_or_default();
				let ingredient = Element::new("input")
					.with_attribute("name", &name)
					.with_attribute("type", "text")
					.with_attribute("value", value)
					.with_attribute("placeholder", "Format: 'Quantity,Unit,Description'");
				vec![Element::new("label").with_text(format!("Ingredient {}", slot)), ingredient]
			}));

		Element::new("form")
			.with_class("upload")
			.with_child(recipe_column)
			.with_child(ingredient_column)
			.with_child(
				Element::new("button")
					.with_class("btn upload__btn")
					.with_child(icon(&self.icons, "icon-upload-cloud", None))
					.with_child(Element::new("span").with_text("Upload")),
			)
			.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn offers_every_ingredient_slot() {
		let tree = UploadView::new("icons.svg").generate_tree(&UploadFields::new());
		let names: Vec<_> = tree
			.elements()
			.into_iter()
			.filter_map(|element| element.attribute("name"))
			.filter(|name| name.starts_with(INGREDIENT_PREFIX))
			.collect();
		assert_eq!(names.len(), INGREDIENT_SLOTS);
		assert_eq!(names[0], "ingredient-1");
	}

	#[test]
	fn entered_values_are_kept() {
		let fields = UploadFields::new().with("title", "Avocado toast").with("ingredient-2", "1,,Avocado");
		let tree = UploadView::new("icons.svg").generate_tree(&fields);
		let value_of = |name: &str| {
			tree.elements()
				.into_iter()
				.find(|element| element.attribute("name") == Some(name))
				.and_then(|element| element.attribute("value"))
				.map(str::to_owned)
		};
		assert_eq!(value_of("title").as_deref(), Some("Avocado toast"));
		assert_eq!(value_of("ingredient-2").as_deref(), Some("1,,Avocado"));
		assert_eq!(value_of("servings").as_deref(), Some(""));
	}
}
