use recipe_dom::{
	config::Config,
	form::UploadFields,
	pagination::page_buttons,
	persist::{BookmarkStore, JsonFileStore, MemoryStore},
	state::StateStore,
	Error,
};

mod stub_api_;
use stub_api_::{pizza, summary, StubApi, PIZZA_ID};

fn store() -> StateStore<MemoryStore> {
	logging_::init();
	StateStore::open(MemoryStore::new(), 10).unwrap()
}

fn upload_fields() -> UploadFields {
	UploadFields::new()
		.with("title", "Avocado toast")
		.with("sourceUrl", "https://example.com/toast")
		.with("image", "https://example.com/toast.jpg")
		.with("publisher", "Me")
		.with("cookingTime", "10")
		.with("servings", "2")
		.with("ingredient-1", "1, ,Avocado")
		.with("ingredient-2", "")
		.with("ingredient-3", "2,slices,bread")
}

#[tokio::test]
async fn doubling_servings_doubles_quantities() {
	let api = StubApi::new();
	let mut store = store();
	let recipe = store.load_recipe(&api, PIZZA_ID).await.unwrap();
	assert_eq!(recipe.servings, 4);
	assert!(!recipe.bookmarked);

	store.update_servings(8).unwrap();
	let recipe = store.recipe().unwrap();
	assert_eq!(recipe.servings, 8);
	let quantities: Vec<_> = recipe.ingredients.iter().map(|ingredient| ingredient.quantity).collect();
	assert_eq!(quantities, [Some(4.0), Some(1.0), None]);

	store.update_servings(4).unwrap();
	assert_eq!(store.recipe().unwrap().ingredients, pizza().ingredients);
}

#[tokio::test]
async fn invalid_servings_and_missing_recipe() {
	let api = StubApi::new();
	let mut store = store();
	assert!(matches!(store.update_servings(2), Err(Error::NoRecipe)));
	store.load_recipe(&api, PIZZA_ID).await.unwrap();
	assert!(matches!(store.update_servings(0), Err(Error::Validation(_))));
	assert_eq!(store.recipe().unwrap().servings, 4);
}

#[tokio::test]
async fn empty_inputs_short_circuit() {
	let api = StubApi::new();
	let mut store = store();
	assert!(matches!(store.load_recipe(&api, "").await, Err(Error::NotFound)));
	assert!(matches!(store.load_search_results(&api, "  ").await, Err(Error::EmptyQuery)));
	assert!(store.recipe().is_none());
}

#[tokio::test]
async fn service_errors_are_propagated() {
	let api = StubApi::new();
	let mut store = store();
	let error = store.load_recipe(&api, "nope").await.unwrap_err();
	assert_eq!(error.to_string(), "Invalid _id: nope (400)");
	assert!(!error.is_local());
}

#[tokio::test]
async fn last_page_is_partial() {
	let api = StubApi::new();
	let mut store = store();
	assert_eq!(store.load_search_results(&api, "pizza").await.unwrap().len(), 47);
	assert_eq!(store.search().query, "pizza");

	assert_eq!(store.search_results_page(None).len(), 10);
	assert_eq!(store.search().page, 1);

	let last = store.search_results_page(Some(5));
	assert_eq!(last.len(), 7);
	assert_eq!(last[0].id, "pizza-40");
	assert_eq!(store.search().page, 5);
	assert_eq!(store.search().page_count(), 5);
	let buttons = store.search().page_buttons();
	assert_eq!((buttons.previous, buttons.next), (Some(4), None));

	assert!(store.search_results_page(Some(6)).is_empty());
}

#[tokio::test]
async fn searching_keeps_the_page() {
	let api = StubApi::new();
	let mut store = store();
	store.load_search_results(&api, "pizza").await.unwrap();
	let _ = store.search_results_page(Some(3));
	store.load_search_results(&api, "pizza").await.unwrap();
	assert_eq!(store.search().page, 3);
}

#[test]
fn page_buttons_by_position() {
	assert!(page_buttons(10, 10, 1).is_empty());
	assert_eq!(page_buttons(47, 10, 1).next, Some(2));
	assert_eq!(page_buttons(47, 10, 1).previous, None);
	assert_eq!(page_buttons(47, 10, 3).previous, Some(2));
	assert_eq!(page_buttons(47, 10, 3).next, Some(4));
}

#[tokio::test]
async fn bookmarking_is_idempotent_and_persisted() {
	let api = StubApi::new();
	let mut store = store();
	let recipe = store.load_recipe(&api, PIZZA_ID).await.unwrap().summary();

	store.add_bookmark(&recipe).unwrap();
	store.add_bookmark(&recipe).unwrap();
	assert_eq!(store.bookmarks().len(), 1);
	assert!(store.recipe().unwrap().bookmarked);
	assert_eq!(store.persistence().save_count(), 2);

	let snapshot = store.persistence().load().unwrap();
	assert_eq!(snapshot, [recipe.clone()]);

	// Reloading a bookmarked recipe marks it as such.
	store.load_recipe(&api, PIZZA_ID).await.unwrap();
	assert!(store.recipe().unwrap().bookmarked);

	store.delete_bookmark(&recipe).unwrap();
	assert!(store.bookmarks().is_empty());
	assert!(!store.recipe().unwrap().bookmarked);
	assert!(store.persistence().load().unwrap().is_empty());
}

#[tokio::test]
async fn deleting_removes_the_loaded_recipe_bookmark() {
	let api = StubApi::new();
	let mut store = store();
	let pizza = store.load_recipe(&api, PIZZA_ID).await.unwrap().summary();
	let other = summary("other");
	store.add_bookmark(&other).unwrap();
	store.add_bookmark(&pizza).unwrap();

	// The removal is keyed on the loaded recipe, not on the argument.
	store.delete_bookmark(&other).unwrap();
	let ids: Vec<_> = store.bookmarks().iter().map(|summary| summary.id.as_str()).collect();
	assert_eq!(ids, ["other"]);
	assert!(store.recipe().unwrap().bookmarked);

	// Nothing left to remove for the loaded recipe.
	store.delete_bookmark(&pizza).unwrap();
	assert_eq!(store.bookmarks().len(), 1);
	assert!(!store.recipe().unwrap().bookmarked);
}

#[test]
fn bookmarks_survive_reopening() {
	logging_::init();
	let directory = tempfile::tempdir().unwrap();
	let mut first = StateStore::open(JsonFileStore::in_dir(directory.path()), 10).unwrap();
	first.add_bookmark(&summary("a")).unwrap();
	first.add_bookmark(&summary("b")).unwrap();
	drop(first);

	let second = StateStore::open(JsonFileStore::in_dir(directory.path()), 10).unwrap();
	let ids: Vec<_> = second.bookmarks().iter().map(|summary| summary.id.as_str()).collect();
	assert_eq!(ids, ["a", "b"]);
}

#[test]
fn bookmarks_go_where_the_configuration_says() {
	logging_::init();
	let directory = tempfile::tempdir().unwrap();
	let bookmarks = directory.path().join("data").join("marks.json");
	let config_path = directory.path().join("recipes.toml");
	std::fs::write(&config_path, format!("bookmarks-path = {:?}\n", bookmarks.to_str().unwrap())).unwrap();

	let config = Config::load(&config_path).unwrap();
	let persistence = JsonFileStore::from_config(&config);
	assert_eq!(persistence.path(), bookmarks);

	let mut store = StateStore::open(persistence, config.results_per_page).unwrap();
	store.add_bookmark(&summary("a")).unwrap();
	assert!(bookmarks.is_file());
	assert_eq!(JsonFileStore::at(&bookmarks).load().unwrap(), [summary("a")]);
}

#[test]
fn corrupt_snapshots_fail_to_open() {
	assert!(matches!(
		StateStore::open(MemoryStore::with_snapshot("{not json"), 10),
		Err(Error::Decode(_))
	));
}

#[test]
fn superseded_loads_are_discarded() {
	let mut store = store();
	let first = store.begin_recipe_load();
	let second = store.begin_recipe_load();

	let mut newer = pizza();
	newer.title = "Newer".to_owned();
	store.finish_recipe_load(second, newer).unwrap();
	assert!(matches!(store.finish_recipe_load(first, pizza()), Err(Error::Superseded)));
	assert_eq!(store.recipe().unwrap().title, "Newer");

	let first = store.begin_search();
	let second = store.begin_search();
	store.finish_search(second, "pasta", Vec::new()).unwrap();
	assert!(matches!(
		store.finish_search(first, "pizza", vec![summary("pizza-0")]),
		Err(Error::Superseded)
	));
	assert_eq!(store.search().query, "pasta");
	assert!(store.search().results.is_empty());
}

#[tokio::test]
async fn upload_installs_and_bookmarks_the_recipe() {
	let api = StubApi::new();
	let mut store = store();
	let recipe = store.upload_recipe(&api, &upload_fields()).await.unwrap();
	assert_eq!(recipe.id, "uploaded-1");
	assert_eq!(recipe.key.as_deref(), Some("test-key"));
	assert!(recipe.bookmarked);
	assert_eq!(recipe.ingredients.len(), 2);
	assert_eq!(recipe.ingredients[0].unit, "");
	assert_eq!(store.bookmarks().len(), 1);

	let uploads = api.uploads.lock().unwrap();
	let sent = &uploads[0];
	assert_eq!(sent.title, "Avocado toast");
	assert_eq!(sent.servings, 2);
}

#[tokio::test]
async fn malformed_uploads_are_rejected_before_sending() {
	let api = StubApi::new();
	let mut store = store();
	let fields = upload_fields().with("ingredient-4", "1 Avocado");
	let error = store.upload_recipe(&api, &fields).await.unwrap_err();
	assert_eq!(error.to_string(), "Wrong ingredient format! Please use the correct format!");
	assert_eq!(api.upload_count(), 0);
	assert!(store.recipe().is_none());
	assert!(store.bookmarks().is_empty());
}
