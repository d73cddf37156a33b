//! The application context: state, one view slot per screen region and the command channel that drives them.

use crate::{
	api::RecipeApi,
	config::Config,
	error::{Error, Result},
	form::UploadFields,
	pagination::FIRST_PAGE,
	persist::BookmarkStore,
	scheduler::{Scheduler, TaskHandle},
	state::StateStore,
	surface::Surface,
	view::{BookmarksView, PaginationView, Previews, RecipeView, ResultsView, UploadView, ViewSlot},
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, instrument, warn};

/// Everything a host (or a scheduled task) can ask the application to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
	/// The location changed to this recipe id.
	ShowRecipe(String),
	Search(String),
	GoToPage(usize),
	UpdateServings(u32),
	/// Bookmarks or un-bookmarks the current recipe.
	ToggleBookmark,
	ShowBookmarks,
	Upload(UploadFields),
	ToggleUploadWindow,
	/// Puts a fresh form into the upload window.
	ResetUploadForm,
}

/// One surface per screen region.
#[derive(Debug)]
pub struct Surfaces<S> {
	pub recipe: S,
	pub results: S,
	pub pagination: S,
	pub bookmarks: S,
	pub upload: S,
}

pub struct App<A, P, S> {
	config: Config,
	api: A,
	store: StateStore<P>,
	recipe_view: ViewSlot<RecipeView, S>,
	results_view: ViewSlot<ResultsView, S>,
	pagination_view: ViewSlot<PaginationView, S>,
	bookmarks_view: ViewSlot<BookmarksView, S>,
	upload_view: ViewSlot<UploadView, S>,
	scheduler: Scheduler<Command>,
	receiver: UnboundedReceiver<Command>,
	location: Option<String>,
	upload_window_open: bool,
	pending_close: Vec<TaskHandle>,
}

impl<A: RecipeApi, P: BookmarkStore, S: Surface> App<A, P, S> {
	/// Opens the state store and wires up the views. Commands sent through the returned sender are handled by [`App::step`] and [`App::run`].
	///
	/// # Errors
	///
	/// If the bookmark snapshot can't be loaded.
	pub fn new(config: Config, api: A, persistence: P, surfaces: Surfaces<S>) -> Result<(Self, UnboundedSender<Command>)> {
		let store = StateStore::open(persistence, config.results_per_page)?;
		let (sender, receiver) = unbounded_channel();
		let icons = config.icons.clone();
		let app = Self {
			store,
			recipe_view: ViewSlot::new(RecipeView::new(&icons), surfaces.recipe),
			results_view: ViewSlot::new(ResultsView::new(&icons), surfaces.results),
			pagination_view: ViewSlot::new(PaginationView::new(&icons), surfaces.pagination),
			bookmarks_view: ViewSlot::new(BookmarksView::new(&icons), surfaces.bookmarks),
			upload_view: ViewSlot::new(UploadView::new(icons), surfaces.upload),
			scheduler: Scheduler::new(&sender),
			receiver,
			config,
			api,
			location: None,
			upload_window_open: false,
			pending_close: Vec::new(),
		};
		Ok((app, sender))
	}

	#[must_use]
	pub fn config(&self) -> &Config {
		&self.config
	}

	#[must_use]
	pub fn store(&self) -> &StateStore<P> {
		&self.store
	}

	/// The recipe id the host should show in its location, if any.
	#[must_use]
	pub fn location(&self) -> Option<&str> {
		self.location.as_deref()
	}

	#[must_use]
	pub fn upload_window_open(&self) -> bool {
		self.upload_window_open
	}

	#[must_use]
	pub fn recipe_view(&self) -> &ViewSlot<RecipeView, S> {
		&self.recipe_view
	}

	#[must_use]
	pub fn results_view(&self) -> &ViewSlot<ResultsView, S> {
		&self.results_view
	}

	#[must_use]
	pub fn pagination_view(&self) -> &ViewSlot<PaginationView, S> {
		&self.pagination_view
	}

	#[must_use]
	pub fn bookmarks_view(&self) -> &ViewSlot<BookmarksView, S> {
		&self.bookmarks_view
	}

	#[must_use]
	pub fn upload_view(&self) -> &ViewSlot<UploadView, S> {
		&self.upload_view
	}

	/// Handles one command. Failures are rendered into the affected region before they are returned.
	///
	/// # Errors
	///
	/// Whatever the command's state operation fails with.
	#[instrument(skip(self, command))]
	pub async fn dispatch(&mut self, command: Command) -> Result<()> {
		if cfg!(feature = "dangerous-logging") {
			debug!(?command, "Dispatching.");
		}
		match command {
			Command::ShowRecipe(id) => self.show_recipe(id).await,
			Command::Search(query) => self.search(&query).await,
			Command::GoToPage(page) => {
				self.go_to_page(page);
				Ok(())
			}
			Command::UpdateServings(servings) => self.update_servings(servings),
			Command::ToggleBookmark => self.toggle_bookmark(),
			Command::ShowBookmarks => {
				self.render_bookmarks();
				Ok(())
			}
			Command::Upload(fields) => self.upload(&fields).await,
			Command::ToggleUploadWindow => {
				self.upload_window_open = !self.upload_window_open;
				debug!(open = self.upload_window_open, "Toggled the upload window.");
				Ok(())
			}
			Command::ResetUploadForm => {
				self.upload_view.render(Some(&UploadFields::new()));
				Ok(())
			}
		}
	}

	/// Waits for the next command and handles it. Returns [`None`] once every sender is gone.
	pub async fn step(&mut self) -> Option<Result<()>> {
		let command = self.receiver.recv().await?;
		Some(self.dispatch(command).await)
	}

	/// Handles commands until every sender is gone, logging failures.
	///
	/// The app itself holds no sender, but pending scheduled commands keep the channel open until they're handled.
	pub async fn run(mut self) {
		while let Some(result) = self.step().await {
			if let Err(error) = result {
				warn!("Command failed: {}", error);
			}
		}
	}

	/// Renders the bookmark list and a fresh upload form, as on startup.
	pub fn init(&mut self) {
		self.render_bookmarks();
		self.upload_view.render(Some(&UploadFields::new()));
	}

	async fn show_recipe(&mut self, id: String) -> Result<()> {
		if id.is_empty() {
			return Ok(());
		}
		self.recipe_view.render_spinner();
		self.location = Some(id);

		// Moves the highlight without resetting the page.
		let search = self.store.search();
		if !search.results.is_empty() {
			let page = search.page;
			let active_id = self.location.as_deref();
			let items = self.store.search_results_page(Some(page));
			self.results_view.update(Some(&Previews { items, active_id }));
		}
		self.update_bookmarks();

		let id = self.location.clone().unwrap_or_default();
		match self.store.load_recipe(&self.api, &id).await {
			Ok(recipe) => {
				self.recipe_view.render(Some(recipe));
				Ok(())
			}
			Err(error) => {
				self.recipe_view.render_error(None);
				Err(error)
			}
		}
	}

	async fn search(&mut self, query: &str) -> Result<()> {
		if query.trim().is_empty() {
			return Ok(());
		}
		self.results_view.render_spinner();
		if let Err(error) = self.store.load_search_results(&self.api, query).await {
			self.results_view.render_error(Some(&error.to_string()));
			return Err(error);
		}
		self.go_to_page(FIRST_PAGE);
		Ok(())
	}

	fn go_to_page(&mut self, page: usize) {
		let active_id = self.location.as_deref();
		let items = self.store.search_results_page(Some(page));
		self.results_view.render(Some(&Previews { items, active_id }));
		self.pagination_view.render(Some(self.store.search()));
	}

	fn update_servings(&mut self, servings: u32) -> Result<()> {
		if servings == 0 {
			return Ok(());
		}
		self.store.update_servings(servings)?;
		self.recipe_view.update(self.store.recipe());
		Ok(())
	}

	fn toggle_bookmark(&mut self) -> Result<()> {
		let recipe = self.store.recipe().ok_or(Error::NoRecipe)?;
		let summary = recipe.summary();
		let persisted = if recipe.bookmarked {
			self.store.delete_bookmark(&summary)
		} else {
			self.store.add_bookmark(&summary)
		};
		self.recipe_view.update(self.store.recipe());
		self.render_bookmarks();
		persisted
	}

	async fn upload(&mut self, fields: &UploadFields) -> Result<()> {
		self.upload_view.render_spinner();
		let id = match self.store.upload_recipe(&self.api, fields).await {
			Ok(recipe) => {
				self.recipe_view.render(Some(recipe));
				recipe.id.clone()
			}
			Err(error) => {
				self.upload_view.render_error(Some(&error.to_string()));
				return Err(error);
			}
		};
		self.upload_view.render_message(None);
		self.render_bookmarks();
		self.location = Some(id);

		for handle in self.pending_close.drain(..) {
			handle.cancel();
		}
		let close = self.config.modal_close();
		self.pending_close.push(self.scheduler.schedule(close, Command::ToggleUploadWindow));
		let reset = close.checked_add(close / 20).unwrap_or(close);
		self.pending_close.push(self.scheduler.schedule(reset, Command::ResetUploadForm));
		Ok(())
	}

	fn render_bookmarks(&mut self) {
		let previews = Previews {
			items: self.store.bookmarks().as_slice(),
			active_id: self.location.as_deref(),
		};
		self.bookmarks_view.render(Some(&previews));
	}

	fn update_bookmarks(&mut self) {
		let previews = Previews {
			items: self.store.bookmarks().as_slice(),
			active_id: self.location.as_deref(),
		};
		self.bookmarks_view.update(Some(&previews));
	}
}
