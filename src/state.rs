//! Application state: the current recipe, the current search and the bookmarks.
//!
//! [`StateStore`] owns all of it and knows nothing about rendering.

use crate::{
	api::{RecipeApi, RecipeData},
	error::{Error, Result},
	form::UploadFields,
	pagination::{self, PageButtons, FIRST_PAGE},
	persist::BookmarkStore,
	servings,
};
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
	/// Absent for things like "salt".
	pub quantity: Option<f64>,
	#[serde(default)]
	pub unit: String,
	pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
	pub id: String,
	pub title: String,
	pub publisher: String,
	pub image: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecipeState {
	pub id: String,
	pub title: String,
	pub publisher: String,
	pub image: String,
	/// Minutes.
	pub cooking_time: u32,
	/// Always positive.
	pub servings: u32,
	pub ingredients: Vec<Ingredient>,
	pub source_url: String,
	/// Present on recipes uploaded by this client's key.
	pub key: Option<String>,
	pub bookmarked: bool,
}

impl RecipeState {
	#[must_use]
	pub fn from_data(data: RecipeData, bookmarked: bool) -> Self {
		Self {
			id: data.id,
			title: data.title,
			publisher: data.publisher,
			image: data.image_url,
			cooking_time: data.cooking_time,
			servings: data.servings,
			ingredients: data.ingredients,
			source_url: data.source_url,
			key: data.key,
			bookmarked,
		}
	}

	#[must_use]
	pub fn summary(&self) -> RecipeSummary {
		RecipeSummary {
			id: self.id.clone(),
			title: self.title.clone(),
			publisher: self.publisher.clone(),
			image: self.image.clone(),
			key: self.key.clone(),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
	pub query: String,
	pub results: Vec<RecipeSummary>,
	pub results_per_page: usize,
	/// 1-indexed. Set as a side effect of [`StateStore::search_results_page`].
	pub page: usize,
}

impl SearchState {
	#[must_use]
	pub fn new(results_per_page: usize) -> Self {
		Self {
			query: String::new(),
			results: Vec::new(),
			results_per_page,
			page: FIRST_PAGE,
		}
	}

	#[must_use]
	pub fn page_count(&self) -> usize {
		pagination::page_count(self.results.len(), self.results_per_page)
	}

	#[must_use]
	pub fn page_buttons(&self) -> PageButtons {
		pagination::page_buttons(self.results.len(), self.results_per_page, self.page)
	}
}

/// Bookmarked recipes, unique by id, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct BookmarkSet {
	items: Vec<RecipeSummary>,
	ids: HashSet<String>,
}

impl BookmarkSet {
	/// Rebuilds the set from a persisted snapshot. Later duplicates of an id are dropped.
	#[must_use]
	pub fn from_snapshot(snapshot: Vec<RecipeSummary>) -> Self {
		let mut set = Self::default();
		for summary in snapshot {
			set.insert(summary);
		}
		set
	}

	#[must_use]
	pub fn contains(&self, id: &str) -> bool {
		self.ids.contains(id)
	}

	/// Appends `summary` unless its id is already present. Returns whether it was appended.
	pub fn insert(&mut self, summary: RecipeSummary) -> bool {
		if self.ids.contains(summary.id.as_str()) {
			return false;
		}
		self.ids.insert(summary.id.clone());
		self.items.push(summary);
		true
	}

	pub fn remove(&mut self, id: &str) -> Option<RecipeSummary> {
		if !self.ids.remove(id) {
			return None;
		}
		let index = self.items.iter().position(|summary| summary.id == id)?;
		Some(self.items.remove(index))
	}

	#[must_use]
	pub fn as_slice(&self) -> &[RecipeSummary] {
		&self.items
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.items.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &RecipeSummary> {
		self.items.iter()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadKind {
	Recipe,
	Search,
}

/// Hands out the right to commit one load. Only the newest ticket of each kind can commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a load ticket does nothing unless it's used to finish the load"]
pub struct LoadTicket {
	kind: LoadKind,
	generation: u64,
}

pub struct StateStore<P> {
	recipe: Option<RecipeState>,
	search: SearchState,
	bookmarks: BookmarkSet,
	persistence: P,
	recipe_generation: u64,
	search_generation: u64,
}

impl<P: BookmarkStore> StateStore<P> {
	/// Loads the bookmark snapshot once; everything else starts out empty.
	///
	/// # Errors
	///
	/// If the snapshot can't be loaded.
	#[instrument(skip(persistence))]
	pub fn open(persistence: P, results_per_page: usize) -> Result<Self> {
		let bookmarks = BookmarkSet::from_snapshot(persistence.load()?);
		info!("Loaded {} bookmark(s).", bookmarks.len());
		Ok(Self {
			recipe: None,
			search: SearchState::new(results_per_page),
			bookmarks,
			persistence,
			recipe_generation: 0,
			search_generation: 0,
		})
	}

	#[must_use]
	pub fn recipe(&self) -> Option<&RecipeState> {
		self.recipe.as_ref()
	}

	#[must_use]
	pub fn search(&self) -> &SearchState {
		&self.search
	}

	#[must_use]
	pub fn bookmarks(&self) -> &BookmarkSet {
		&self.bookmarks
	}

	#[must_use]
	pub fn persistence(&self) -> &P {
		&self.persistence
	}

	/// Fetches and installs recipe `id`, marking it bookmarked if it's in the bookmark set.
	///
	/// # Errors
	///
	/// [`Error::NotFound`] for an empty id, otherwise whatever the fetch fails with,
	/// or [`Error::Superseded`] if another recipe load or upload was started in the meantime.
	#[instrument(skip(self, api))]
	pub async fn load_recipe<A: RecipeApi + ?Sized>(&mut self, api: &A, id: &str) -> Result<&RecipeState> {
		if id.is_empty() {
			return Err(Error::NotFound);
		}
		let ticket = self.begin_recipe_load();
		let data = api.fetch_recipe(id).await?;
		self.finish_recipe_load(ticket, data)
	}

	/// Starts a recipe load, superseding any that is still in flight.
	pub fn begin_recipe_load(&mut self) -> LoadTicket {
		self.recipe_generation += 1;
		LoadTicket {
			kind: LoadKind::Recipe,
			generation: self.recipe_generation,
		}
	}

	/// Installs `data` as the current recipe if `ticket` is still the newest recipe load.
	///
	/// # Errors
	///
	/// [`Error::Superseded`] if it isn't.
	pub fn finish_recipe_load(&mut self, ticket: LoadTicket, data: RecipeData) -> Result<&RecipeState> {
		debug_assert_eq!(ticket.kind, LoadKind::Recipe);
		if ticket.kind != LoadKind::Recipe || ticket.generation != self.recipe_generation {
			warn!("Discarding recipe {:?} from a superseded load.", data.id);
			return Err(Error::Superseded);
		}
		let bookmarked = self.bookmarks.contains(&data.id);
		Ok(&*self.recipe.insert(RecipeState::from_data(data, bookmarked)))
	}

	/// Fetches the results for `query`. Leaves the current page alone; re-window with [`StateStore::search_results_page`].
	///
	/// # Errors
	///
	/// [`Error::EmptyQuery`] for a blank query, otherwise whatever the fetch fails with,
	/// or [`Error::Superseded`] if another search was started in the meantime.
	#[instrument(skip(self, api))]
	pub async fn load_search_results<A: RecipeApi + ?Sized>(&mut self, api: &A, query: &str) -> Result<&[RecipeSummary]> {
		if query.trim().is_empty() {
			return Err(Error::EmptyQuery);
		}
		let ticket = self.begin_search();
		let results = api.search(query).await?;
		self.finish_search(ticket, query, results)
	}

	pub fn begin_search(&mut self) -> LoadTicket {
		self.search_generation += 1;
		LoadTicket {
			kind: LoadKind::Search,
			generation: self.search_generation,
		}
	}

	/// # Errors
	///
	/// [`Error::Superseded`] if `ticket` isn't the newest search.
	pub fn finish_search(&mut self, ticket: LoadTicket, query: &str, results: Vec<RecipeSummary>) -> Result<&[RecipeSummary]> {
		debug_assert_eq!(ticket.kind, LoadKind::Search);
		if ticket.kind != LoadKind::Search || ticket.generation != self.search_generation {
			warn!("Discarding {} result(s) from a superseded search.", results.len());
			return Err(Error::Superseded);
		}
		info!("{} result(s).", results.len());
		query.clone_into(&mut self.search.query);
		self.search.results = results;
		Ok(&self.search.results)
	}

	/// Moves to `page` (default [`FIRST_PAGE`]) and returns the results visible there.
	pub fn search_results_page(&mut self, page: Option<usize>) -> &[RecipeSummary] {
		self.search.page = page.unwrap_or(FIRST_PAGE);
		pagination::window_for(&self.search.results, Some(self.search.page), self.search.results_per_page)
	}

	/// Rescales every ingredient quantity of the current recipe to `new_servings`.
	///
	/// # Errors
	///
	/// [`Error::Validation`] for zero servings, [`Error::NoRecipe`] if no recipe is loaded.
	#[instrument(skip(self))]
	pub fn update_servings(&mut self, new_servings: u32) -> Result<()> {
		if new_servings == 0 {
			return Err(Error::Validation("servings must be positive".to_owned()));
		}
		let recipe = self.recipe.as_mut().ok_or(Error::NoRecipe)?;
		servings::scale_in_place(&mut recipe.ingredients, recipe.servings, new_servings);
		recipe.servings = new_servings;
		Ok(())
	}

	/// Bookmarks `recipe` unless it already is, then persists the bookmark snapshot.
	///
	/// # Errors
	///
	/// If persisting fails. The in-memory bookmark is kept regardless.
	#[instrument(skip(self, recipe), fields(id = %recipe.id))]
	pub fn add_bookmark(&mut self, recipe: &RecipeSummary) -> Result<()> {
		if !self.bookmarks.insert(recipe.clone()) {
			trace!("Already bookmarked.");
		}
		if let Some(current) = &mut self.recipe {
			if current.id == recipe.id {
				current.bookmarked = true;
			}
		}
		self.persist()
	}

	/// Removes the bookmark of the **currently loaded** recipe, then persists the bookmark snapshot.
	///
	/// Only the `bookmarked` flag is keyed on `recipe`. This is correct only as long as callers pass the
	/// recipe that is currently displayed, which is the only way the bookmark toggle ever calls this.
	///
	/// # Errors
	///
	/// If persisting fails.
	#[instrument(skip(self, recipe), fields(id = %recipe.id))]
	pub fn delete_bookmark(&mut self, recipe: &RecipeSummary) -> Result<()> {
		let current_id = self.recipe.as_ref().map(|current| current.id.clone());
		if current_id.and_then(|id| self.bookmarks.remove(&id)).is_none() {
			warn!("The loaded recipe isn't bookmarked. Nothing was removed.");
		}
		if let Some(current) = &mut self.recipe {
			if current.id == recipe.id {
				current.bookmarked = false;
			}
		}
		self.persist()
	}

	fn persist(&mut self) -> Result<()> {
		self.persistence.save(self.bookmarks.as_slice())
	}

	/// Uploads a recipe assembled from form `fields`, installs the service's response as the current recipe and bookmarks it.
	///
	/// # Errors
	///
	/// [`Error::Validation`] for malformed fields, otherwise whatever the upload or persisting fails with.
	#[instrument(skip(self, api, fields))]
	pub async fn upload_recipe<A: RecipeApi + ?Sized>(&mut self, api: &A, fields: &UploadFields) -> Result<&RecipeState> {
		let new_recipe = fields.to_new_recipe()?;
		// An upload replaces the current recipe just like a load does.
		let _ = self.begin_recipe_load();
		let data = api.upload(&new_recipe).await?;
		let recipe = RecipeState::from_data(data, false);
		let summary = recipe.summary();
		self.recipe = Some(recipe);
		self.add_bookmark(&summary)?;
		self.recipe.as_ref().ok_or(Error::NoRecipe)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn summary(id: &str) -> RecipeSummary {
		RecipeSummary {
			id: id.to_owned(),
			title: id.to_uppercase(),
			publisher: "p".to_owned(),
			image: "i".to_owned(),
			key: None,
		}
	}

	#[test]
	fn bookmark_set_is_unique_and_ordered() {
		let mut set = BookmarkSet::from_snapshot(vec![summary("b"), summary("a"), summary("b")]);
		assert_eq!(set.len(), 2);
		assert!(!set.insert(summary("a")));
		assert!(set.insert(summary("c")));
		let ids: Vec<_> = set.iter().map(|summary| summary.id.as_str()).collect();
		assert_eq!(ids, ["b", "a", "c"]);
		assert_eq!(set.remove("a").map(|summary| summary.id), Some("a".to_owned()));
		assert!(!set.contains("a"));
		assert_eq!(set.remove("a"), None);
	}
}
