//! Amenity categories and the provider place types behind them.

use core_config::ConfigError;

/// User-facing category, e.g. "Medical", backed by one or more place types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmenityCategory {
    pub name: String,
    pub place_types: Vec<String>,
}

impl AmenityCategory {
    pub fn new(name: impl Into<String>, place_types: &[&str]) -> Self {
        Self {
            name: name.into(),
            place_types: place_types.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Ordered category list; annotations follow this order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmenityCatalog {
    categories: Vec<AmenityCategory>,
}

pub const DEFAULT_CATALOG: &str = "Institute=school;\
    Medical=hospital|doctor;\
    Parks=park;\
    Gyms=gym;\
    Shopping=shopping_mall|store;\
    Mosques=mosque;\
    Banks/ATMs=bank|atm;\
    Restaurants=restaurant;\
    Petrol/Fuel Pumps=gas_station;\
    Filtration Plants=water_treatment";

impl AmenityCatalog {
    pub fn new(categories: Vec<AmenityCategory>) -> Self {
        Self { categories }
    }

    /// Parses `Name=type|type;Name=type`. Used for `AMENITY_CATEGORIES`.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = |details: String| ConfigError::Invalid {
            key: "AMENITY_CATEGORIES".to_string(),
            details,
        };

        let mut categories = Vec::new();
        for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, types) = entry
                .split_once('=')
                .ok_or_else(|| invalid(format!("'{entry}' is not Name=type|type")))?;

            let name = name.trim();
            let place_types: Vec<String> = types
                .split('|')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();

            if name.is_empty() || place_types.is_empty() {
                return Err(invalid(format!("'{entry}' needs a name and a place type")));
            }
            if categories
                .iter()
                .any(|c: &AmenityCategory| c.name.eq_ignore_ascii_case(name))
            {
                return Err(invalid(format!("category '{name}' listed twice")));
            }

            categories.push(AmenityCategory {
                name: name.to_string(),
                place_types,
            });
        }

        if categories.is_empty() {
            return Err(invalid("no categories".to_string()));
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[AmenityCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Case-insensitive lookup by category name
    pub fn get(&self, name: &str) -> Option<&AmenityCategory> {
        let name = name.trim();
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

impl Default for AmenityCatalog {
    fn default() -> Self {
        Self::new(vec![
            AmenityCategory::new("Institute", &["school"]),
            AmenityCategory::new("Medical", &["hospital", "doctor"]),
            AmenityCategory::new("Parks", &["park"]),
            AmenityCategory::new("Gyms", &["gym"]),
            AmenityCategory::new("Shopping", &["shopping_mall", "store"]),
            AmenityCategory::new("Mosques", &["mosque"]),
            AmenityCategory::new("Banks/ATMs", &["bank", "atm"]),
            AmenityCategory::new("Restaurants", &["restaurant"]),
            AmenityCategory::new("Petrol/Fuel Pumps", &["gas_station"]),
            AmenityCategory::new("Filtration Plants", &["water_treatment"]),
        ])
    }
}
