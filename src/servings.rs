//! Proportional ingredient scaling.

use crate::state::Ingredient;

const EPSILON: f64 = 1e-6;

/// `ingredients` rescaled from `from` to `to` servings. Ingredients without a quantity are copied as they are.
///
/// `to` is not validated here; callers reject zero servings before scaling.
#[must_use]
pub fn scale(ingredients: &[Ingredient], from: u32, to: u32) -> Vec<Ingredient> {
	let mut scaled = ingredients.to_vec();
	scale_in_place(&mut scaled, from, to);
	scaled
}

/// In-place variant of [`scale`].
pub fn scale_in_place(ingredients: &mut [Ingredient], from: u32, to: u32) {
	let (from, to) = (f64::from(from), f64::from(to));
	for quantity in ingredients.iter_mut().filter_map(|ingredient| ingredient.quantity.as_mut()) {
		*quantity = *quantity * to / from;
	}
}

/// Formats a quantity for display: whole numbers as such, halves, thirds, quarters and eighths as (mixed) fractions, anything else with up to two decimals.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_quantity(quantity: f64) -> String {
	if (quantity - quantity.round()).abs() < EPSILON {
		return format!("{}", quantity.round() as i64);
	}

	let whole = quantity.trunc();
	let fraction = quantity - whole;
	for &denominator in &[2_u8, 3, 4, 8] {
		let scaled = fraction * f64::from(denominator);
		if (scaled - scaled.round()).abs() < EPSILON * f64::from(denominator) {
			let numerator = scaled.round() as i64;
			return if whole.abs() < 1.0 {
				format!("{}/{}", numerator, denominator)
			} else {
				format!("{} {}/{}", whole as i64, numerator, denominator)
			};
		}
	}

	let decimals = format!("{:.2}", quantity);
	decimals.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fractions() {
		assert_eq!(format_quantity(2.0), "2");
		assert_eq!(format_quantity(0.5), "1/2");
		assert_eq!(format_quantity(1.25), "1 1/4");
		assert_eq!(format_quantity(1.0 / 3.0), "1/3");
		assert_eq!(format_quantity(0.375), "3/8");
		assert_eq!(format_quantity(0.123), "0.12");
		assert_eq!(format_quantity(1.1), "1.1");
	}

	#[test]
	fn scaling_rounds_trip_within_tolerance() {
		let original = vec![
			Ingredient {
				quantity: Some(1.0 / 3.0),
				unit: "cup".to_owned(),
				description: "flour".to_owned(),
			},
			Ingredient {
				quantity: None,
				unit: String::new(),
				description: "salt".to_owned(),
			},
		];
		let mut ingredients = original.clone();
		for &(from, to) in &[(4, 7), (7, 3), (3, 8), (8, 4)] {
			scale_in_place(&mut ingredients, from, to);
		}
		assert!((ingredients[0].quantity.unwrap() - original[0].quantity.unwrap()).abs() < 1e-9);
		assert_eq!(ingredients[1].quantity, None);
	}
}
