//! Upload form entries and their parsing into an upload body.

use crate::{
	api::NewRecipe,
	error::{Error, Result},
	state::Ingredient,
};
use core::iter::FromIterator;

/// Prefix of the form fields that carry `quantity,unit,description` ingredient encodings.
pub const INGREDIENT_PREFIX: &str = "ingredient";

/// Number of ingredient inputs the upload form offers.
pub const INGREDIENT_SLOTS: usize = 6;

/// Submitted form entries, in form order, as name/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadFields {
	entries: Vec<(String, String)>,
}

impl UploadFields {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	#[must_use]
	pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.entries.push((name.into(), value.into()));
		self
	}

	/// The first value submitted under `name`.
	#[must_use]
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries.iter().find(|(n, _)| n == name).map(|(_, value)| value.as_str())
	}

	pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(name, value)| (name.as_str(), value.as_str()))
	}

	/// Ingredient entries that were filled in, parsed.
	///
	/// # Errors
	///
	/// [`Error::Validation`] for the first entry that isn't a valid encoding.
	pub fn ingredients(&self) -> Result<Vec<Ingredient>> {
		self.entries()
			.filter(|(name, value)| name.starts_with(INGREDIENT_PREFIX) && !value.trim().is_empty())
			.map(|(_, value)| parse_ingredient(value))
			.collect()
	}

	/// Assembles the upload body.
	///
	/// # Errors
	///
	/// [`Error::Validation`] if a field is missing, a number doesn't parse, servings are zero, or an ingredient is malformed.
	pub fn to_new_recipe(&self) -> Result<NewRecipe> {
		let servings = self.number("servings")?;
		if servings == 0 {
			return Err(Error::Validation("servings must be positive".to_owned()));
		}
		Ok(NewRecipe {
			title: self.required("title")?.to_owned(),
			source_url: self.required("sourceUrl")?.to_owned(),
			image_url: self.required("image")?.to_owned(),
			publisher: self.required("publisher")?.to_owned(),
			cooking_time: self.number("cookingTime")?,
			servings,
			ingredients: self.ingredients()?,
		})
	}

	fn required(&self, name: &str) -> Result<&str> {
		match self.get(name).map(str::trim) {
			Some(value) if !value.is_empty() => Ok(value),
			_ => Err(Error::Validation(format!("missing field {:?}", name))),
		}
	}

	fn number(&self, name: &str) -> Result<u32> {
		let value = self.required(name)?;
		value.parse().map_err(|_| Error::Validation(format!("field {:?} must be a whole number, not {:?}", name, value)))
	}
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for UploadFields {
	fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().map(|(name, value)| (name.into(), value.into())).collect(),
		}
	}
}

/// Parses `quantity,unit,description`. Each field is trimmed; an empty quantity means "no quantity".
///
/// # Errors
///
/// [`Error::Validation`] unless there are exactly three fields and the quantity (if any) is a number.
pub fn parse_ingredient(encoded: &str) -> Result<Ingredient> {
	let fields: Vec<&str> = encoded.split(',').map(str::trim).collect();
	let (quantity, unit, description) = match fields.as_slice() {
		[quantity, unit, description] => (*quantity, *unit, *description),
		_ => return Err(Error::Validation("Wrong ingredient format! Please use the correct format!".to_owned())),
	};
	let quantity = if quantity.is_empty() {
		None
	} else {
		let parsed: f64 = quantity.parse().map_err(|_| Error::Validation(format!("ingredient quantity {:?} is not a number", quantity)))?;
		if !parsed.is_finite() {
			return Err(Error::Validation(format!("ingredient quantity {:?} is not a number", quantity)));
		}
		Some(parsed)
	};
	Ok(Ingredient {
		quantity,
		unit: unit.to_owned(),
		description: description.to_owned(),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ingredient_encodings() {
		let rice = parse_ingredient("0.5,kg,Rice").unwrap();
		assert_eq!(rice.quantity, Some(0.5));
		assert_eq!(rice.unit, "kg");
		assert_eq!(rice.description, "Rice");

		let salt = parse_ingredient(" , , salt ").unwrap();
		assert_eq!(salt.quantity, None);
		assert_eq!(salt.unit, "");
		assert_eq!(salt.description, "salt");

		assert!(matches!(parse_ingredient("1,Avocado"), Err(Error::Validation(_))));
		assert!(matches!(parse_ingredient("1,,Avocado,ripe"), Err(Error::Validation(_))));
		assert!(matches!(parse_ingredient("lots,,Avocado"), Err(Error::Validation(_))));
	}

	#[test]
	fn empty_ingredient_slots_are_skipped() {
		let fields: UploadFields = vec![("ingredient-1", "1,,Avocado"), ("ingredient-2", ""), ("ingredient-3", ",,salt")].into_iter().collect();
		assert_eq!(fields.ingredients().unwrap().len(), 2);
	}

	#[test]
	fn missing_and_malformed_fields() {
		let fields = UploadFields::new()
			.with("title", "Test")
			.with("sourceUrl", "https://example.com")
			.with("image", "https://example.com/a.jpg")
			.with("publisher", "Me")
			.with("cookingTime", "60");
		assert!(matches!(fields.to_new_recipe(), Err(Error::Validation(message)) if message.contains("servings")));
		assert!(matches!(fields.clone().with("servings", "0").to_new_recipe(), Err(Error::Validation(_))));
		assert!(matches!(fields.clone().with("servings", "six").to_new_recipe(), Err(Error::Validation(_))));
		assert_eq!(fields.with("servings", "6").to_new_recipe().unwrap().servings, 6);
	}
}
