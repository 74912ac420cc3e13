//! Property attributes entered by a user

use serde::Deserialize;

/// Column names the numeric attributes are matched against
pub const LIVING_AREA: &str = "LivingArea";
pub const BEDROOMS: &str = "BedroomsTotal";
pub const BATHROOMS: &str = "BathroomsTotalInteger";
pub const YEAR_BUILT: &str = "YearBuilt";
pub const GARAGE_SPACES: &str = "GarageSpaces";
pub const STORIES: &str = "StoriesTotal";

/// A property to value.
///
/// Only the numeric attributes reach the model. Location, type and
/// condition are echoed back in the property summary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertyInput {
    /// Living area in square feet
    #[serde(alias = "LivingArea")]
    pub living_area: f64,

    #[serde(alias = "BedroomsTotal")]
    pub bedrooms: u32,

    #[serde(alias = "BathroomsTotalInteger")]
    pub bathrooms: u32,

    #[serde(alias = "YearBuilt")]
    pub year_built: i32,

    #[serde(alias = "GarageSpaces")]
    pub garage_spaces: u32,

    #[serde(alias = "StoriesTotal")]
    pub stories: u32,

    #[serde(default, alias = "City")]
    pub city: String,

    #[serde(default, alias = "PostalCode")]
    pub postal_code: String,

    #[serde(default, alias = "PropertyType")]
    pub property_type: String,

    #[serde(default, alias = "Condition")]
    pub condition: String,
}

impl PropertyInput {
    /// Numeric attributes keyed by the column name they fill
    pub fn attributes(&self) -> Vec<(&'static str, f64)> {
        vec![
            (LIVING_AREA, self.living_area),
            (BEDROOMS, self.bedrooms as f64),
            (BATHROOMS, self.bathrooms as f64),
            (YEAR_BUILT, self.year_built as f64),
            (GARAGE_SPACES, self.garage_spaces as f64),
            (STORIES, self.stories as f64),
        ]
    }
}

impl Default for PropertyInput {
    fn default() -> Self {
        Self {
            living_area: 2000.0,
            bedrooms: 3,
            bathrooms: 2,
            year_built: 2000,
            garage_spaces: 2,
            stories: 1,
            city: "Baton Rouge".to_string(),
            postal_code: "70808".to_string(),
            property_type: "Single Family Residential".to_string(),
            condition: "Excellent".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_use_model_column_names() {
        let input = PropertyInput::default();
        let attrs = input.attributes();

        assert_eq!(attrs.len(), 6);
        assert_eq!(attrs[0], ("LivingArea", 2000.0));
        assert_eq!(attrs[3], ("YearBuilt", 2000.0));
        assert_eq!(attrs[5], ("StoriesTotal", 1.0));
    }

    #[test]
    fn test_deserialize_from_column_names() {
        let json = r#"{
            "LivingArea": 1850,
            "BedroomsTotal": 4,
            "BathroomsTotalInteger": 2,
            "YearBuilt": 1995,
            "GarageSpaces": 1,
            "StoriesTotal": 2
        }"#;

        let input: PropertyInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.living_area, 1850.0);
        assert_eq!(input.bedrooms, 4);
        assert_eq!(input.stories, 2);
        assert!(input.city.is_empty());
    }
}
