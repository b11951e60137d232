use crate::error::{CatalogError, CatalogResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadCategory {
    Occupant,
    FixedAppliance,
    /// User-authored; never appears in the static catalog.
    Custom,
}

impl LoadCategory {
    pub const ALL: [LoadCategory; 3] = [
        LoadCategory::Occupant,
        LoadCategory::FixedAppliance,
        LoadCategory::Custom,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LoadCategory::Occupant => "Occupants",
            LoadCategory::FixedAppliance => "Fixed Appliances",
            LoadCategory::Custom => "Custom / Additional Sources",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadCatalogEntry {
    pub id: &'static str,
    pub category: LoadCategory,
    /// Sensible heat while active, W.
    pub watts: f64,
    /// Active hours per day.
    pub duty_hours: f64,
    pub default_quantity: u32,
}

impl LoadCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        query.is_empty() || self.id.to_ascii_lowercase().contains(&query)
    }
}

const STANDARD_LOADS: [LoadCatalogEntry; 15] = [
    LoadCatalogEntry {
        id: "Adult Male",
        category: LoadCategory::Occupant,
        watts: 75.0,
        duty_hours: 24.0,
        default_quantity: 1,
    },
    LoadCatalogEntry {
        id: "Adult Female",
        category: LoadCategory::Occupant,
        watts: 65.0,
        duty_hours: 24.0,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "Child",
        category: LoadCategory::Occupant,
        watts: 45.0,
        duty_hours: 24.0,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "Dog (Medium)",
        category: LoadCategory::Occupant,
        watts: 30.0,
        duty_hours: 24.0,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "Cat",
        category: LoadCategory::Occupant,
        watts: 10.0,
        duty_hours: 24.0,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "Fridge 12V DC (50L)",
        category: LoadCategory::FixedAppliance,
        watts: 45.0,
        duty_hours: 8.0,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "Chest Freezer 12V DC",
        category: LoadCategory::FixedAppliance,
        watts: 60.0,
        duty_hours: 10.0,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "Laptop",
        category: LoadCategory::FixedAppliance,
        watts: 60.0,
        duty_hours: 6.0,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "LED Light Fixture",
        category: LoadCategory::FixedAppliance,
        watts: 10.0,
        duty_hours: 5.0,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "TV (32in LED)",
        category: LoadCategory::FixedAppliance,
        watts: 40.0,
        duty_hours: 4.0,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "Router / Modem",
        category: LoadCategory::FixedAppliance,
        watts: 12.0,
        duty_hours: 24.0,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "Induction Cooktop",
        category: LoadCategory::FixedAppliance,
        watts: 1800.0,
        duty_hours: 1.0,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "Electric Kettle",
        category: LoadCategory::FixedAppliance,
        watts: 1500.0,
        duty_hours: 0.25,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "Microwave",
        category: LoadCategory::FixedAppliance,
        watts: 1000.0,
        duty_hours: 0.25,
        default_quantity: 0,
    },
    LoadCatalogEntry {
        id: "Water Pump 12V",
        category: LoadCategory::FixedAppliance,
        watts: 60.0,
        duty_hours: 0.5,
        default_quantity: 0,
    },
];

pub fn load_catalog() -> &'static [LoadCatalogEntry] {
    &STANDARD_LOADS
}

pub fn lookup_load(id: &str) -> CatalogResult<&'static LoadCatalogEntry> {
    let id = id.trim();
    load_catalog()
        .iter()
        .find(|entry| entry.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| CatalogError::UnknownLoad { id: id.to_string() })
}

pub fn filter_load_catalog(query: &str) -> Vec<LoadCatalogEntry> {
    load_catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}
