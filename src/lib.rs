#![doc(html_root_url = "https://docs.rs/recipe-dom/0.1.0")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod api;
pub mod app;
pub mod config;
pub mod diff;
pub mod error;
pub mod form;
pub mod node;
pub mod pagination;
pub mod persist;
pub mod scheduler;
pub mod servings;
pub mod state;
pub mod surface;
pub mod view;

#[cfg(feature = "web")]
pub mod load;
#[cfg(feature = "web")]
pub mod web;

pub use error::{Error, Result};
