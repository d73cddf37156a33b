#![allow(dead_code)]

use async_trait::async_trait;
use recipe_dom::{
	api::{NewRecipe, RecipeApi, RecipeData},
	state::{Ingredient, RecipeSummary},
	Error, Result,
};
use std::sync::Mutex;

pub const PIZZA_ID: &str = "5ed6604591c37cdc054bc886";

/// Serves canned recipes and search results, and records uploads.
#[derive(Debug, Default)]
pub struct StubApi {
	pub recipes: Vec<RecipeData>,
	pub results: Vec<RecipeSummary>,
	pub uploads: Mutex<Vec<NewRecipe>>,
	pub upload_key: Option<String>,
}

impl StubApi {
	pub fn new() -> Self {
		Self {
			recipes: vec![pizza()],
			results: summaries("pizza", 47),
			uploads: Mutex::new(Vec::new()),
			upload_key: Some("test-key".to_owned()),
		}
	}

	pub fn upload_count(&self) -> usize {
		self.uploads.lock().unwrap().len()
	}
}

pub fn pizza() -> RecipeData {
	RecipeData {
		id: PIZZA_ID.to_owned(),
		title: "Pizza dough".to_owned(),
		publisher: "Closet Cooking".to_owned(),
		source_url: "https://example.com/pizza-dough".to_owned(),
		image_url: "https://example.com/pizza-dough.jpg".to_owned(),
		servings: 4,
		cooking_time: 45,
		ingredients: vec![
			ingredient(Some(2.0), "cups", "flour"),
			ingredient(Some(0.5), "tsp", "yeast"),
			ingredient(None, "", "salt"),
		],
		key: None,
	}
}

pub fn ingredient(quantity: Option<f64>, unit: &str, description: &str) -> Ingredient {
	Ingredient {
		quantity,
		unit: unit.to_owned(),
		description: description.to_owned(),
	}
}

pub fn summary(id: &str) -> RecipeSummary {
	RecipeSummary {
		id: id.to_owned(),
		title: format!("Recipe {}", id),
		publisher: "Test Kitchen".to_owned(),
		image: format!("https://example.com/{}.jpg", id),
		key: None,
	}
}

pub fn summaries(prefix: &str, count: usize) -> Vec<RecipeSummary> {
	(0..count).map(|i| summary(&format!("{}-{}", prefix, i))).collect()
}

#[async_trait]
impl RecipeApi for StubApi {
	async fn fetch_recipe(&self, id: &str) -> Result<RecipeData> {
		self.recipes.iter().find(|recipe| recipe.id == id).cloned().ok_or_else(|| Error::Api {
			status: 400,
			message: format!("Invalid _id: {}", id),
		})
	}

	async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>> {
		Ok(self.results.iter().filter(|summary| summary.id.starts_with(query)).cloned().collect())
	}

	async fn upload(&self, recipe: &NewRecipe) -> Result<RecipeData> {
		let mut uploads = self.uploads.lock().unwrap();
		uploads.push(recipe.clone());
		Ok(RecipeData {
			id: format!("uploaded-{}", uploads.len()),
			title: recipe.title.clone(),
			publisher: recipe.publisher.clone(),
			source_url: recipe.source_url.clone(),
			image_url: recipe.image_url.clone(),
			servings: recipe.servings,
			cooking_time: recipe.cooking_time,
			ingredients: recipe.ingredients.clone(),
			key: self.upload_key.clone(),
		})
	}
}
