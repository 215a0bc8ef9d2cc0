use derive_more::Display;

/// Conversion factor between the two supported weight units.
pub const LBS_PER_KG: f64 = 2.20462;

#[derive(Debug, Default, Clone, Copy, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeightUnit {
    #[display("kg")]
    Kg,
    #[default]
    #[display("lbs")]
    Lbs,
}

impl WeightUnit {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl TryFrom<&str> for WeightUnit {
    type Error = WeightUnitError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "kg" => Ok(WeightUnit::Kg),
            "lbs" => Ok(WeightUnit::Lbs),
            _ => Err(WeightUnitError::Unknown),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightUnitError {
    #[error("weight unit must be one of 'kg' and 'lbs'")]
    Unknown,
}

/// A weight as it occurs in stored records and form input, either a number or
/// its textual representation.
#[derive(Debug, Clone, Display, PartialEq)]
pub enum WeightValue {
    #[display("{_0}")]
    Number(f64),
    #[display("{_0}")]
    Text(String),
}

impl WeightValue {
    /// Returns the numeric value, if there is one. NaN and text that does not
    /// parse as a float yield `None`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            WeightValue::Number(number) => (!number.is_nan()).then_some(*number),
            WeightValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|number| !number.is_nan()),
        }
    }
}

impl From<f64> for WeightValue {
    fn from(value: f64) -> Self {
        WeightValue::Number(value)
    }
}

impl From<&str> for WeightValue {
    fn from(value: &str) -> Self {
        WeightValue::Text(value.to_string())
    }
}

impl From<String> for WeightValue {
    fn from(value: String) -> Self {
        WeightValue::Text(value)
    }
}

/// Converts a weight between the units named by `from_unit` and `to_unit`.
///
/// A successful conversion yields a text value with one decimal digit.
/// Everything else echoes the input unchanged: identical units, values that
/// do not parse as a number, and unit pairs other than kg/lbs in either
/// direction. This function never fails.
#[must_use]
pub fn convert_weight(weight: &WeightValue, from_unit: &str, to_unit: &str) -> WeightValue {
    if from_unit == to_unit {
        return weight.clone();
    }
    let Some(value) = weight.as_number() else {
        return weight.clone();
    };
    let converted = match (from_unit, to_unit) {
        ("kg", "lbs") => value * LBS_PER_KG,
        ("lbs", "kg") => value / LBS_PER_KG,
        _ => return weight.clone(),
    };
    WeightValue::Text(format!("{converted:.1}"))
}

/// Converts between known units.
#[must_use]
pub fn convert(weight: &WeightValue, from: WeightUnit, to: WeightUnit) -> WeightValue {
    convert_weight(weight, from.as_str(), to.as_str())
}

/// Formats a weight for display, echoing values that do not parse as a
/// number verbatim.
#[must_use]
pub fn format_weight(weight: &WeightValue, unit: &str) -> String {
    match weight.as_number() {
        Some(value) => format!("{value:.1} {unit}"),
        None => format!("{weight} {unit}"),
    }
}

#[must_use]
pub fn unit_label(label: &str, unit: &str) -> String {
    format!("{label} ({unit})")
}

#[must_use]
pub fn weight_label(unit: &str) -> String {
    unit_label("Weight", unit)
}

/// Resolves the unit a set was stored in: the set's own unit, the enclosing
/// workout's unit, lbs.
#[must_use]
pub fn resolve_weight_unit(
    set_unit: Option<WeightUnit>,
    workout_unit: Option<WeightUnit>,
) -> WeightUnit {
    set_unit.or(workout_unit).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::same_unit_number(WeightValue::Number(100.0), "kg", "kg", WeightValue::Number(100.0))]
    #[case::same_unit_text(WeightValue::from("100"), "lbs", "lbs", WeightValue::from("100"))]
    #[case::same_unknown_unit(WeightValue::Number(7.5), "stones", "stones", WeightValue::Number(7.5))]
    #[case::kg_to_lbs(WeightValue::Number(100.0), "kg", "lbs", WeightValue::from("220.5"))]
    #[case::lbs_to_kg(WeightValue::Number(220.0), "lbs", "kg", WeightValue::from("99.8"))]
    #[case::text_input(WeightValue::from("100"), "kg", "lbs", WeightValue::from("220.5"))]
    #[case::padded_text_input(WeightValue::from(" 60.5 "), "kg", "lbs", WeightValue::from("133.4"))]
    #[case::unparsable_text(WeightValue::from("abc"), "kg", "lbs", WeightValue::from("abc"))]
    #[case::empty_text(WeightValue::from(""), "kg", "lbs", WeightValue::from(""))]
    #[case::unsupported_target(
        WeightValue::Number(100.0),
        "kg",
        "stones",
        WeightValue::Number(100.0)
    )]
    #[case::unsupported_source(
        WeightValue::Number(100.0),
        "stones",
        "kg",
        WeightValue::Number(100.0)
    )]
    fn test_convert_weight(
        #[case] weight: WeightValue,
        #[case] from_unit: &str,
        #[case] to_unit: &str,
        #[case] expected: WeightValue,
    ) {
        assert_eq!(convert_weight(&weight, from_unit, to_unit), expected);
    }

    #[test]
    fn test_convert_weight_nan() {
        assert!(matches!(
            convert_weight(&WeightValue::Number(f64::NAN), "kg", "lbs"),
            WeightValue::Number(value) if value.is_nan()
        ));
    }

    #[rstest]
    #[case(10.0)]
    #[case(42.5)]
    #[case(100.0)]
    #[case(187.5)]
    #[case(300.0)]
    fn test_convert_weight_round_trip(#[case] value: f64) {
        let converted = convert_weight(&WeightValue::Number(value), "kg", "lbs");
        let back = convert_weight(&converted, "lbs", "kg");
        assert_approx_eq!(back.as_number().unwrap(), value, 0.2);
    }

    #[test]
    fn test_convert() {
        assert_eq!(
            convert(&WeightValue::Number(100.0), WeightUnit::Kg, WeightUnit::Lbs),
            WeightValue::from("220.5")
        );
        assert_eq!(
            convert(&WeightValue::Number(100.0), WeightUnit::Kg, WeightUnit::Kg),
            WeightValue::Number(100.0)
        );
    }

    #[rstest]
    #[case::number(WeightValue::Number(12.5), Some(12.5))]
    #[case::nan(WeightValue::Number(f64::NAN), None)]
    #[case::numeric_text(WeightValue::from("12.5"), Some(12.5))]
    #[case::padded_text(WeightValue::from(" 7 "), Some(7.0))]
    #[case::nan_text(WeightValue::from("NaN"), None)]
    #[case::non_numeric_text(WeightValue::from("abc"), None)]
    #[case::empty_text(WeightValue::from(""), None)]
    fn test_weight_value_as_number(#[case] value: WeightValue, #[case] expected: Option<f64>) {
        assert_eq!(value.as_number(), expected);
    }

    #[rstest]
    #[case::whole_number(WeightValue::Number(70.0), "kg", "70.0 kg")]
    #[case::fractional_number(WeightValue::Number(102.46), "lbs", "102.5 lbs")]
    #[case::numeric_text(WeightValue::from("85.26"), "kg", "85.3 kg")]
    #[case::unparsable_text(WeightValue::from("abc"), "kg", "abc kg")]
    fn test_format_weight(#[case] weight: WeightValue, #[case] unit: &str, #[case] expected: &str) {
        assert_eq!(format_weight(&weight, unit), expected);
    }

    #[test]
    fn test_format_weight_nan() {
        assert_eq!(format_weight(&WeightValue::Number(f64::NAN), "kg"), "NaN kg");
    }

    #[test]
    fn test_weight_label() {
        assert_eq!(weight_label("kg"), "Weight (kg)");
        assert_eq!(weight_label("lbs"), "Weight (lbs)");
    }

    #[test]
    fn test_unit_label() {
        assert_eq!(unit_label("Max", "kg"), "Max (kg)");
        assert_eq!(unit_label("Volume", "lbs"), "Volume (lbs)");
    }

    #[rstest]
    #[case::set_unit_wins(Some(WeightUnit::Kg), Some(WeightUnit::Lbs), WeightUnit::Kg)]
    #[case::set_unit_without_workout_unit(Some(WeightUnit::Kg), None, WeightUnit::Kg)]
    #[case::workout_unit_fallback(None, Some(WeightUnit::Kg), WeightUnit::Kg)]
    #[case::default_fallback(None, None, WeightUnit::Lbs)]
    fn test_resolve_weight_unit(
        #[case] set_unit: Option<WeightUnit>,
        #[case] workout_unit: Option<WeightUnit>,
        #[case] expected: WeightUnit,
    ) {
        assert_eq!(resolve_weight_unit(set_unit, workout_unit), expected);
    }

    #[rstest]
    #[case::kg("kg", Ok(WeightUnit::Kg))]
    #[case::lbs("lbs", Ok(WeightUnit::Lbs))]
    #[case::unknown("stones", Err(WeightUnitError::Unknown))]
    #[case::capitalized("Kg", Err(WeightUnitError::Unknown))]
    fn test_weight_unit_try_from(
        #[case] value: &str,
        #[case] expected: Result<WeightUnit, WeightUnitError>,
    ) {
        assert_eq!(WeightUnit::try_from(value), expected);
    }

    #[test]
    fn test_weight_unit_display() {
        assert_eq!(WeightUnit::Kg.to_string(), "kg");
        assert_eq!(WeightUnit::Lbs.to_string(), "lbs");
    }
}
