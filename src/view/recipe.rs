use super::{icon, Component, View};
use crate::{
	node::{DisplayNode, Element},
	servings::format_quantity,
	state::{Ingredient, RecipeState},
};

/// The full recipe: figure, details with servings and bookmark controls, ingredients and directions.
///
/// Changing servings or the bookmark flag only changes text and attribute values, never the element structure.
#[derive(Debug, Clone)]
pub struct RecipeView {
	icons: String,
}

impl RecipeView {
	#[must_use]
	pub fn new(icons: impl Into<String>) -> Self {
		Self { icons: icons.into() }
	}

	fn figure(recipe: &RecipeState) -> Element {
		Element::new("figure")
			.with_class("recipe__fig")
			.with_child(
				Element::new("img")
					.with_class("recipe__img")
					.with_attribute("src", &recipe.image)
					.with_attribute("alt", &recipe.title),
			)
			.with_child(Element::new("h1").with_class("recipe__title").with_child(Element::new("span").with_text(&recipe.title)))
	}

	fn details(&self, recipe: &RecipeState) -> Element {
		let icons = self.icons.as_str();

		let cooking_time = Element::new("div")
			.with_class("recipe__info")
			.with_child(icon(icons, "icon-clock", Some("recipe__info-icon")))
			.with_child(
				Element::new("span")
					.with_class("recipe__info-data recipe__info-data--minutes")
					.with_text(recipe.cooking_time.to_string()),
			)
			.with_child(Element::new("span").with_class("recipe__info-text").with_text("minutes"));

		let servings_button = |to: u32, icon_name: &str| {
			Element::new("button")
				.with_class("btn--tiny btn--update-servings")
				.with_attribute("data-update-to", to.to_string())
				.with_child(icon(icons, icon_name, None))
		};
		let servings = Element::new("div")
			.with_class("recipe__info")
			.with_child(icon(icons, "icon-users", Some("recipe__info-icon")))
			.with_child(
				Element::new("span")
					.with_class("recipe__info-data recipe__info-data--people")
					.with_text(recipe.servings.to_string()),
			)
			.with_child(Element::new("span").with_class("recipe__info-text").with_text("servings"))
			.with_child(
				Element::new("div")
					.with_class("recipe__info-buttons")
					.with_child(servings_button(recipe.servings.saturating_sub(1), "icon-minus-circle"))
					.with_child(servings_button(recipe.servings + 1, "icon-plus-circle")),
			);

		let user_generated_class = if recipe.key.is_some() {
			"recipe__user-generated"
		} else {
			"recipe__user-generated hidden"
		};
		let bookmark_icon = if recipe.bookmarked { "icon-bookmark-fill" } else { "icon-bookmark" };

		Element::new("div")
			.with_class("recipe__details")
			.with_child(cooking_time)
			.with_child(servings)
			.with_child(Element::new("div").with_class(user_generated_class).with_child(icon(icons, "icon-user", None)))
			.with_child(
				Element::new("button")
					.with_class("btn--round btn--bookmark")
					.with_child(icon(icons, bookmark_icon, None)),
			)
	}

	fn ingredient(&self, ingredient: &Ingredient) -> Element {
		let quantity = Element::new("div").with_class("recipe__quantity");
		let quantity = match ingredient.quantity {
			Some(value) => quantity.with_text(format_quantity(value)),
			None => quantity,
		};
		Element::new("li")
			.with_class("recipe__ingredient")
			.with_child(icon(&self.icons, "icon-check", Some("recipe__icon")))
			.with_child(quantity)
			.with_child(
				Element::new("div")
					.with_class("recipe__description")
					.with_child(Element::new("span").with_class("recipe__unit").with_text(&ingredient.unit))
					.with_text(&ingredient.description),
			)
	}

	fn directions(&self, recipe: &RecipeState) -> Element {
		Element::new("div")
			.with_class("recipe__directions")
			.with_child(Element::new("h2").with_class("heading--2").with_text("How to cook it"))
			.with_child(
				Element::new("p")
					.with_class("recipe__directions-text")
					.with_text("This recipe was carefully designed and tested by ")
					.with_child(Element::new("span").with_class("recipe__publisher").with_text(&recipe.publisher))
					.with_text(". Please check out directions at their website."),
			)
			.with_child(
				Element::new("a")
					.with_class("btn--small recipe__btn")
					.with_attribute("href", &recipe.source_url)
					.with_attribute("target", "_blank")
					.with_child(Element::new("span").with_text("Directions"))
					.with_child(icon(&self.icons, "icon-arrow-right", Some("search__icon"))),
			)
	}
}

impl Component for RecipeView {
	fn icons(&self) -> &str {
		&self.icons
	}

	fn error_message(&self) -> &str {
		"We could not find that recipe. Please try another one!"
	}
}

impl View<RecipeState> for RecipeView {
	fn generate_tree(&self, recipe: &RecipeState) -> DisplayNode {
		let ingredients = Element::new("div")
			.with_class("recipe__ingredients")
			.with_child(Element::new("h2").with_class("heading--2").with_text("Recipe ingredients"))
			.with_child(
				Element::new("ul")
					.with_class("recipe__ingredient-list")
					.with_children(recipe.ingredients.iter().map(|ingredient| self.ingredient(ingredient))),
			);

		vec![
			Self::figure(recipe).into(),
			self.details(recipe).into(),
			ingredients.into(),
			self.directions(recipe).into(),
		]
		.into()
	}
}
