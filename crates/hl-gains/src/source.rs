//! Load sources and the watts → BTU/hr conversion.

use crate::error::{GainsError, GainsResult};
use hl_catalog::{LoadCatalogEntry, LoadCategory};
use hl_core::constants::{HOURS_PER_DAY, WATTS_TO_BTU_PER_HOUR};
use hl_core::ensure_non_negative;
use serde::{Deserialize, Serialize};

/// A heat source with a nominal draw and a daily duty cycle.
///
/// Fields are only reachable through validated setters: watts and duty are
/// finite and non-negative, duty is clamped to 24 h.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoadSource")]
pub struct LoadSource {
    category: LoadCategory,
    name: String,
    watts: f64,
    duty_hours: f64,
    quantity: u32,
}

#[derive(Deserialize)]
struct RawLoadSource {
    category: LoadCategory,
    name: String,
    watts: f64,
    duty_hours: f64,
    quantity: u32,
}

impl TryFrom<RawLoadSource> for LoadSource {
    type Error = GainsError;

    fn try_from(raw: RawLoadSource) -> Result<Self, Self::Error> {
        LoadSource::new(raw.category, raw.name, raw.watts, raw.duty_hours, raw.quantity)
    }
}

/// One editable attribute of a source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceField {
    Name(String),
    Watts(f64),
    DutyHours(f64),
    Quantity(u32),
}

impl SourceField {
    pub fn key(&self) -> &'static str {
        match self {
            SourceField::Name(_) => "name",
            SourceField::Watts(_) => "watts",
            SourceField::DutyHours(_) => "duty_hours",
            SourceField::Quantity(_) => "quantity",
        }
    }
}

/// Values for a new custom source; unset fields take the defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomSourceDraft {
    pub name: Option<String>,
    pub watts: Option<f64>,
    pub duty_hours: Option<f64>,
    pub quantity: Option<u32>,
}

impl CustomSourceDraft {
    pub const DEFAULT_NAME: &'static str = "New Source";
    pub const DEFAULT_WATTS: f64 = 100.0;
    pub const DEFAULT_DUTY_HOURS: f64 = 24.0;
    pub const DEFAULT_QUANTITY: u32 = 1;

    pub fn build(self) -> GainsResult<LoadSource> {
        LoadSource::new(
            LoadCategory::Custom,
            match self.name {
                Some(name) => check_name(name)?,
                None => Self::DEFAULT_NAME.to_string(),
            },
            self.watts.unwrap_or(Self::DEFAULT_WATTS),
            self.duty_hours.unwrap_or(Self::DEFAULT_DUTY_HOURS),
            self.quantity.unwrap_or(Self::DEFAULT_QUANTITY),
        )
    }
}

fn check_name(name: String) -> GainsResult<String> {
    if name.trim().is_empty() {
        return Err(GainsError::InvalidInput {
            field: "name",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(name)
}

fn check_watts(watts: f64) -> GainsResult<f64> {
    Ok(ensure_non_negative(watts, "watts")?)
}

fn check_duty(hours: f64) -> GainsResult<f64> {
    let hours = ensure_non_negative(hours, "duty hours")?;
    Ok(hours.min(HOURS_PER_DAY))
}

impl LoadSource {
    pub fn new(
        category: LoadCategory,
        name: impl Into<String>,
        watts: f64,
        duty_hours: f64,
        quantity: u32,
    ) -> GainsResult<Self> {
        Ok(Self {
            category,
            name: name.into(),
            watts: check_watts(watts)?,
            duty_hours: check_duty(duty_hours)?,
            quantity,
        })
    }

    pub fn from_catalog(entry: &LoadCatalogEntry) -> GainsResult<Self> {
        Self::new(
            entry.category,
            entry.id,
            entry.watts,
            entry.duty_hours,
            entry.default_quantity,
        )
    }

    pub fn category(&self) -> LoadCategory {
        self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn watts(&self) -> f64 {
        self.watts
    }

    pub fn duty_hours(&self) -> f64 {
        self.duty_hours
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Apply one edit. On error the source is unchanged.
    pub fn apply(&mut self, field: SourceField) -> GainsResult<()> {
        match field {
            SourceField::Name(name) => self.name = check_name(name)?,
            SourceField::Watts(w) => self.watts = check_watts(w)?,
            SourceField::DutyHours(h) => self.duty_hours = check_duty(h)?,
            SourceField::Quantity(q) => self.quantity = q,
        }
        Ok(())
    }
}

/// Average draw of one unit over a day, W.
pub fn average_power(source: &LoadSource) -> f64 {
    source.watts * source.duty_hours.clamp(0.0, HOURS_PER_DAY) / HOURS_PER_DAY
}

/// Average watts → BTU/hr.
pub fn to_heat_rate(watts: f64) -> f64 {
    watts * WATTS_TO_BTU_PER_HOUR
}

/// Heat rate of every unit of a source, BTU/hr.
pub fn source_heat_rate(source: &LoadSource) -> f64 {
    f64::from(source.quantity) * to_heat_rate(average_power(source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl_catalog::lookup_load;

    fn custom(watts: f64, duty: f64, qty: u32) -> LoadSource {
        LoadSource::new(LoadCategory::Custom, "test", watts, duty, qty).unwrap()
    }

    #[test]
    fn wood_stove_four_hours() {
        let stove = custom(5000.0, 4.0, 1);
        assert!((average_power(&stove) - 833.333).abs() < 1e-3);
        assert!((source_heat_rate(&stove) - 2843.3).abs() < 0.05);
    }

    #[test]
    fn adult_male_from_catalog() {
        let person = LoadSource::from_catalog(lookup_load("Adult Male").unwrap()).unwrap();
        assert_eq!(average_power(&person), 75.0);
        assert!((source_heat_rate(&person) - 255.9).abs() < 1e-9);
    }

    #[test]
    fn fridge_duty_cycle() {
        let mut fridge =
            LoadSource::from_catalog(lookup_load("Fridge 12V DC (50L)").unwrap()).unwrap();
        assert_eq!(source_heat_rate(&fridge), 0.0);
        fridge.apply(SourceField::Quantity(1)).unwrap();
        assert!((average_power(&fridge) - 15.0).abs() < 1e-12);
        assert!((source_heat_rate(&fridge) - 51.18).abs() < 1e-9);
    }

    #[test]
    fn duty_above_a_day_clamps() {
        let over = custom(100.0, 30.0, 1);
        assert_eq!(over.duty_hours(), 24.0);
        assert_eq!(source_heat_rate(&over), source_heat_rate(&custom(100.0, 24.0, 1)));
    }

    #[test]
    fn zero_quantity_or_duty_is_exactly_zero() {
        assert_eq!(source_heat_rate(&custom(1500.0, 3.0, 0)), 0.0);
        assert_eq!(source_heat_rate(&custom(1500.0, 0.0, 4)), 0.0);
    }

    #[test]
    fn invalid_values_rejected_and_source_kept() {
        assert!(LoadSource::new(LoadCategory::Custom, "x", -1.0, 1.0, 1).is_err());
        assert!(LoadSource::new(LoadCategory::Custom, "x", 1.0, f64::NAN, 1).is_err());

        let mut source = custom(100.0, 5.0, 1);
        let before = source.clone();
        assert!(matches!(
            source.apply(SourceField::Watts(f64::INFINITY)),
            Err(GainsError::InvalidInput { field: "watts", .. })
        ));
        assert!(source.apply(SourceField::DutyHours(-2.0)).is_err());
        assert!(source.apply(SourceField::Name("  ".into())).is_err());
        assert_eq!(source, before);
    }

    #[test]
    fn draft_defaults() {
        let source = CustomSourceDraft::default().build().unwrap();
        assert_eq!(source.name(), "New Source");
        assert_eq!(source.watts(), 100.0);
        assert_eq!(source.duty_hours(), 24.0);
        assert_eq!(source.quantity(), 1);
        assert_eq!(source.category(), LoadCategory::Custom);
    }

    #[test]
    fn draft_rejects_blank_name() {
        for name in ["", "   "] {
            let draft = CustomSourceDraft {
                name: Some(name.to_string()),
                ..CustomSourceDraft::default()
            };
            assert!(matches!(
                draft.build(),
                Err(GainsError::InvalidInput { field: "name", .. })
            ));
        }
    }

    #[test]
    fn deserialization_validates() {
        let ok: LoadSource = serde_json::from_str(
            r#"{"category":"custom","name":"Heater","watts":500.0,"duty_hours":30.0,"quantity":2}"#,
        )
        .unwrap();
        assert_eq!(ok.duty_hours(), 24.0);
        let bad = serde_json::from_str::<LoadSource>(
            r#"{"category":"custom","name":"Heater","watts":-5.0,"duty_hours":3.0,"quantity":1}"#,
        );
        assert!(bad.is_err());
    }
}
