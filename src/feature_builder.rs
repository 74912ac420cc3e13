//! Feature row construction for single-property inference.
//!
//! The model was trained on a wide, mostly engineered feature set while the
//! form only collects a handful of attributes. Rows are therefore built by
//! reconciling the supplied attributes against the expected column list:
//!
//! - every expected column is present, in the expected order, defaulting to 0
//! - an attribute whose name matches a column overwrites it
//! - an attribute with no matching column is dropped and reported in
//!   [`FeatureRow::dropped`]

use tracing::debug;

/// Columns used when the expected-feature list was not shipped with the model
pub const FALLBACK_FEATURES: [&str; 5] = [
    "LivingArea",
    "BedroomsTotal",
    "BathroomsTotalInteger",
    "YearBuilt",
    "GarageSpaces",
];

/// A single-record table ready for inference
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<String>,
    values: Vec<f64>,
    dropped: Vec<String>,
}

impl FeatureRow {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Input keys that had no matching column
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Value of the first column with this name
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    /// Values in column order as the runtime's input type
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}

/// Builds feature rows against a fixed column list
#[derive(Debug, Clone)]
pub struct FeatureVectorBuilder {
    columns: Vec<String>,
    using_fallback: bool,
}

impl FeatureVectorBuilder {
    /// Builder over the expected columns, or the fallback list when the
    /// expected list is unavailable or empty.
    pub fn new(expected: Option<&[String]>) -> Self {
        match expected {
            Some(columns) if !columns.is_empty() => Self {
                columns: columns.to_vec(),
                using_fallback: false,
            },
            _ => Self {
                columns: FALLBACK_FEATURES.iter().map(|c| c.to_string()).collect(),
                using_fallback: true,
            },
        }
    }

    /// Whether the fallback column list is in use
    pub fn using_fallback(&self) -> bool {
        self.using_fallback
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the number of columns produced.
    pub fn feature_count(&self) -> usize {
        self.columns.len()
    }

    /// Build a row from `(column name, value)` attributes
    pub fn build<'a, I>(&self, attributes: I) -> FeatureRow
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut values = vec![0.0; self.columns.len()];
        let mut dropped = Vec::new();

        for (name, value) in attributes {
            let mut matched = false;
            for (column, slot) in self.columns.iter().zip(values.iter_mut()) {
                if column == name {
                    *slot = value;
                    matched = true;
                }
            }
            if !matched {
                dropped.push(name.to_string());
            }
        }

        if !dropped.is_empty() {
            debug!(dropped = ?dropped, "Attributes not in expected feature list");
        }

        FeatureRow {
            columns: self.columns.clone(),
            values,
            dropped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(columns: &[&str]) -> Vec<String> {
        columns.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_unknown_attributes_are_dropped() {
        let expected = names(&["LivingArea", "BedroomsTotal", "YearBuilt"]);
        let builder = FeatureVectorBuilder::new(Some(expected.as_slice()));

        let row = builder.build([
            ("LivingArea", 2000.0),
            ("BedroomsTotal", 3.0),
            ("YearBuilt", 2000.0),
            ("GarageSpaces", 2.0),
        ]);

        assert_eq!(row.columns(), expected.as_slice());
        assert_eq!(row.values(), &[2000.0, 3.0, 2000.0]);
        assert_eq!(row.dropped(), &["GarageSpaces".to_string()]);
        assert_eq!(row.get("GarageSpaces"), None);
    }

    #[test]
    fn test_width_matches_expected_and_unset_columns_are_zero() {
        let mut expected: Vec<String> = (0..50).map(|i| format!("feature_{i}")).collect();
        expected[7] = "LivingArea".to_string();
        let builder = FeatureVectorBuilder::new(Some(expected.as_slice()));

        let row = builder.build([("LivingArea", 1500.0), ("StoriesTotal", 2.0)]);

        assert_eq!(row.width(), 50);
        for (i, value) in row.values().iter().enumerate() {
            if i == 7 {
                assert_eq!(*value, 1500.0);
            } else {
                assert_eq!(*value, 0.0);
            }
        }
    }

    #[test]
    fn test_no_attributes_gives_all_zero_row() {
        let expected = names(&["a", "b"]);
        let row = FeatureVectorBuilder::new(Some(expected.as_slice()))
            .build(Vec::<(&str, f64)>::new());
        assert_eq!(row.values(), &[0.0, 0.0]);
        assert!(row.dropped().is_empty());
    }

    #[test]
    fn test_building_twice_is_identical() {
        let expected = names(&["LivingArea", "YearBuilt", "PoolPrivateYN"]);
        let builder = FeatureVectorBuilder::new(Some(expected.as_slice()));
        let attrs = [("LivingArea", 2400.0), ("YearBuilt", 1987.0)];

        let first = builder.build(attrs);
        let second = builder.build(attrs);

        assert_eq!(first, second);
        let first_bytes: Vec<u8> = first.values().iter().flat_map(|v| v.to_le_bytes()).collect();
        let second_bytes: Vec<u8> = second.values().iter().flat_map(|v| v.to_le_bytes()).collect();
        assert_eq!(first_bytes, second_bytes);
    }

    #[test]
    fn test_fallback_when_expected_missing_or_empty() {
        let builder = FeatureVectorBuilder::new(None);
        assert!(builder.using_fallback());
        assert_eq!(builder.feature_count(), 5);

        let empty: Vec<String> = Vec::new();
        let builder = FeatureVectorBuilder::new(Some(empty.as_slice()));
        assert!(builder.using_fallback());

        let row = builder.build([("StoriesTotal", 2.0), ("GarageSpaces", 1.0)]);
        assert_eq!(row.get("GarageSpaces"), Some(1.0));
        assert_eq!(row.dropped(), &["StoriesTotal".to_string()]);
    }

    #[test]
    fn test_f32_conversion_keeps_order() {
        let expected = names(&["YearBuilt", "LivingArea"]);
        let row = FeatureVectorBuilder::new(Some(expected.as_slice()))
            .build([("LivingArea", 2000.0), ("YearBuilt", 1999.0)]);
        assert_eq!(row.to_f32(), vec![1999.0_f32, 2000.0_f32]);
    }
}
