//! Ordinal color scale for categorical node attributes.
//!
//! Maps each distinct category to a palette color in first-seen order. The
//! scale is built once from the full node set and threaded through to the
//! renderer; lookups afterwards are pure, so a category always maps to the
//! same color.

use std::collections::HashMap;

use super::types::ClassLabel;

/// The standard 10-color categorical palette.
pub const CATEGORY10: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// Category-to-color assignment over a fixed palette.
///
/// Categories beyond the palette size wrap around, so two classes can share
/// a color only once the palette is exhausted.
#[derive(Clone, Debug)]
pub struct OrdinalScale {
	palette: Vec<String>,
	assigned: HashMap<ClassLabel, usize>,
}

impl OrdinalScale {
	/// Build a scale over the given palette, assigning slots to categories
	/// in the order they are first seen.
	pub fn from_categories<'a, I>(palette: &[&str], categories: I) -> Self
	where
		I: IntoIterator<Item = &'a ClassLabel>,
	{
		let mut assigned = HashMap::new();
		for category in categories {
			let next = assigned.len();
			assigned.entry(category.clone()).or_insert(next);
		}
		Self {
			palette: palette.iter().map(|c| c.to_string()).collect(),
			assigned,
		}
	}

	/// Build a scale over [`CATEGORY10`].
	pub fn category10<'a, I>(categories: I) -> Self
	where
		I: IntoIterator<Item = &'a ClassLabel>,
	{
		Self::from_categories(CATEGORY10, categories)
	}

	/// Color for a category. Categories not seen at build time fall back to
	/// the first palette color.
	pub fn color(&self, category: &ClassLabel) -> &str {
		let slot = self.assigned.get(category).copied().unwrap_or(0);
		&self.palette[slot % self.palette.len()]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn classes(indices: &[i64]) -> Vec<ClassLabel> {
		indices.iter().map(|&i| ClassLabel::Index(i)).collect()
	}

	#[test]
	fn same_category_always_maps_to_the_same_color() {
		let cats = classes(&[2, 0, 2, 1]);
		let scale = OrdinalScale::category10(&cats);
		assert_eq!(
			scale.color(&ClassLabel::Index(2)),
			scale.color(&ClassLabel::Index(2))
		);
	}

	#[test]
	fn distinct_categories_get_distinct_colors() {
		let cats = classes(&[0, 1, 2, 3, 4]);
		let scale = OrdinalScale::category10(&cats);
		let mut seen = std::collections::HashSet::new();
		for c in &cats {
			assert!(seen.insert(scale.color(c)), "color reused within palette");
		}
	}

	#[test]
	fn assignment_follows_first_seen_order() {
		let cats = classes(&[7, 3, 7, 0]);
		let scale = OrdinalScale::category10(&cats);
		assert_eq!(scale.color(&ClassLabel::Index(7)), CATEGORY10[0]);
		assert_eq!(scale.color(&ClassLabel::Index(3)), CATEGORY10[1]);
		assert_eq!(scale.color(&ClassLabel::Index(0)), CATEGORY10[2]);
	}

	#[test]
	fn wraps_around_when_palette_is_exhausted() {
		let cats = classes(&(0..12).collect::<Vec<_>>());
		let scale = OrdinalScale::category10(&cats);
		assert_eq!(scale.color(&ClassLabel::Index(10)), CATEGORY10[0]);
		assert_eq!(scale.color(&ClassLabel::Index(11)), CATEGORY10[1]);
	}

	#[test]
	fn string_and_numeric_labels_are_distinct_categories() {
		let cats = vec![ClassLabel::Index(1), ClassLabel::Name("1".into())];
		let scale = OrdinalScale::category10(&cats);
		assert_ne!(
			scale.color(&ClassLabel::Index(1)),
			scale.color(&ClassLabel::Name("1".into()))
		);
	}
}
