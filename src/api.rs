//! The remote recipe service.
//!
//! [`RecipeApi`] is the seam the state cache fetches through; [`HttpRecipeApi`] talks to the real service,
//! racing every request against a fixed timeout.

use crate::{
	config::Config,
	error::{Error, Result},
	state::{Ingredient, RecipeSummary},
};
use async_trait::async_trait;
use core::time::Duration;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, instrument};

#[async_trait]
pub trait RecipeApi: Send + Sync {
	/// `GET {base}/{id}?key={key}`
	async fn fetch_recipe(&self, id: &str) -> Result<RecipeData>;

	/// `GET {base}?search={query}&key={key}`
	async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>>;

	/// `POST {base}?key={key}`
	async fn upload(&self, recipe: &NewRecipe) -> Result<RecipeData>;
}

/// A recipe as the service returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeData {
	pub id: String,
	pub title: String,
	pub publisher: String,
	pub source_url: String,
	pub image_url: String,
	pub servings: u32,
	pub cooking_time: u32,
	pub ingredients: Vec<Ingredient>,
	/// Present on recipes uploaded with the same key.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub key: Option<String>,
}

/// The upload body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRecipe {
	pub title: String,
	pub source_url: String,
	pub image_url: String,
	pub publisher: String,
	pub cooking_time: u32,
	pub servings: u32,
	pub ingredients: Vec<Ingredient>,
}

#[derive(Deserialize)]
struct Envelope<T> {
	data: T,
}

#[derive(Debug, Deserialize)]
struct RecipeBody {
	recipe: RecipeData,
}

#[derive(Deserialize)]
struct SearchBody {
	recipes: Vec<SummaryData>,
}

#[derive(Deserialize)]
struct SummaryData {
	id: String,
	title: String,
	publisher: String,
	image_url: String,
	#[serde(default)]
	key: Option<String>,
}

impl From<SummaryData> for RecipeSummary {
	fn from(data: SummaryData) -> Self {
		Self {
			id: data.id,
			title: data.title,
			publisher: data.publisher,
			image: data.image_url,
			key: data.key,
		}
	}
}

#[derive(Deserialize)]
struct ErrorBody {
	message: String,
}

#[derive(Debug, Clone)]
pub struct HttpRecipeApi {
	http: Client,
	base: String,
	key: String,
	timeout: Duration,
}

impl HttpRecipeApi {
	#[must_use]
	pub fn new(base: impl Into<String>, key: impl Into<String>, timeout: Duration) -> Self {
		let mut base = base.into();
		while base.ends_with('/') {
			base.pop();
		}
		Self {
			http: Client::new(),
			base,
			key: key.into(),
			timeout,
		}
	}

	#[must_use]
	pub fn from_config(config: &Config) -> Self {
		Self::new(&config.api_url, &config.key, config.timeout())
	}

	/// Sends `request`, racing it against the timeout, and unwraps the `data` envelope of the response.
	async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
		let response = match tokio::time::timeout(self.timeout, request.send()).await {
			Ok(response) => response.map_err(|error| Error::Network(error.to_string()))?,
			Err(_) => return Err(Error::Timeout(self.timeout)),
		};
		let status = response.status();
		let body = response.text().await.map_err(|error| Error::Network(error.to_string()))?;
		debug!(%status, bytes = body.len(), "Received response.");
		decode(status, &body)
	}
}

/// Decodes a response body: the `data` payload for 2xx statuses, an [`Error::Api`] with the service's message otherwise.
fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
	if !status.is_success() {
		let message = serde_json::from_str::<ErrorBody>(body)
			.map(|body| body.message)
			.unwrap_or_else(|_| status.canonical_reason().unwrap_or("Request failed").to_owned());
		return Err(Error::Api { status: status.as_u16(), message });
	}
	Ok(serde_json::from_str::<Envelope<T>>(body)?.data)
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
	#[instrument(skip(self))]
	async fn fetch_recipe(&self, id: &str) -> Result<RecipeData> {
		let request = self.http.get(format!("{}/{}", self.base, id)).query(&[("key", self.key.as_str())]);
		let body: RecipeBody = self.send(request).await?;
		Ok(body.recipe)
	}

	#[instrument(skip(self))]
	async fn search(&self, query: &str) -> Result<Vec<RecipeSummary>> {
		let request = self.http.get(&self.base).query(&[("search", query), ("key", self.key.as_str())]);
		let body: SearchBody = self.send(request).await?;
		Ok(body.recipes.into_iter().map(RecipeSummary::from).collect())
	}

	#[instrument(skip(self, recipe), fields(ingredients = recipe.ingredients.len()))]
	async fn upload(&self, recipe: &NewRecipe) -> Result<RecipeData> {
		let request = self.http.post(&self.base).query(&[("key", self.key.as_str())]).json(recipe);
		let body: RecipeBody = self.send(request).await?;
		Ok(body.recipe)
	}
}
