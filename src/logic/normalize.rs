use crate::models::{Parameter, ParameterMap, RawValue};
use serde::Serialize;
use std::borrow::Cow;

/// What the normalizer left out of a record, for callers that want to surface it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizationReport {
    /// Keys with no mapping in the vocabulary.
    pub unrecognized: Vec<String>,
    /// Recognized keys whose value was not a finite number.
    pub dropped: Vec<String>,
    /// Keys that mapped onto a parameter already seen; the later value wins.
    pub duplicates: Vec<String>,
}

impl NormalizationReport {
    pub fn is_clean(&self) -> bool {
        self.unrecognized.is_empty() && self.dropped.is_empty() && self.duplicates.is_empty()
    }
}

/// Map a raw report key onto the canonical vocabulary.
///
/// Case-insensitive; `_`, `-` and whitespace are ignored. Recognizes common
/// synonyms and chemical symbols (`n`, `ca`, `hco3`, ...).
pub fn normalize(raw_key: &str) -> Option<Parameter> {
    let compact: String = raw_key
        .chars()
        .filter(|c| !(c.is_whitespace() || *c == '_' || *c == '-'))
        .flat_map(char::to_lowercase)
        .collect();

    let parameter = match compact.as_str() {
        "ph" | "phvalue" | "soilph" => Parameter::Ph,
        "ec" | "electricalconductivity" | "conductivity" | "salinity" => Parameter::Ec,
        "oc" | "organiccarbon" | "orgcarbon" => Parameter::OrganicCarbon,
        "n" | "nitrogen" | "availablenitrogen" | "availablen" | "totalnitrogen" => {
            Parameter::Nitrogen
        }
        "p" | "phosphorus" | "phosphorous" | "availablephosphorus" | "availablep" | "olsenp" => {
            Parameter::Phosphorus
        }
        "k" | "potassium" | "availablepotassium" | "availablek" => Parameter::Potassium,
        "ca" | "calcium" => Parameter::Calcium,
        "mg" | "magnesium" => Parameter::Magnesium,
        "s" | "sulfur" | "sulphur" => Parameter::Sulfur,
        "zn" | "zinc" => Parameter::Zinc,
        "fe" | "iron" => Parameter::Iron,
        "mn" | "manganese" => Parameter::Manganese,
        "cu" | "copper" => Parameter::Copper,
        "b" | "boron" => Parameter::Boron,
        "na" | "sodium" => Parameter::Sodium,
        "cl" | "chloride" | "chlorine" => Parameter::Chloride,
        "hco3" | "bicarbonate" | "bicarbonates" => Parameter::Bicarbonate,
        "co3" | "carbonate" | "carbonates" => Parameter::Carbonate,
        _ => return None,
    };

    Some(parameter)
}

/// Canonical key for `raw_key`, or `raw_key` unchanged when no mapping exists.
pub fn normalize_key(raw_key: &str) -> Cow<'_, str> {
    match normalize(raw_key) {
        Some(parameter) => Cow::Borrowed(parameter.key()),
        None => Cow::Borrowed(raw_key),
    }
}

/// Coerce a lab value to a finite number. NaN, infinities and non-numeric text yield `None`.
pub fn parse_numeric(raw: &RawValue) -> Option<f64> {
    let value = match raw {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
    };

    value.is_finite().then_some(value)
}

/// Normalize a raw key/value bag into a typed parameter map.
pub fn normalize_parameters<K, V, I>(raw: I) -> (ParameterMap, NormalizationReport)
where
    K: AsRef<str>,
    V: Into<RawValue>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut parameters = ParameterMap::new();
    let mut report = NormalizationReport::default();

    for (key, value) in raw {
        let key = key.as_ref();
        let Some(parameter) = normalize(key) else {
            tracing::debug!("Ignoring unrecognized lab parameter '{}'", key);
            report.unrecognized.push(key.to_string());
            continue;
        };

        let value = value.into();
        let Some(number) = parse_numeric(&value) else {
            tracing::warn!("Dropping malformed value {:?} for {}", value, parameter.key());
            report.dropped.push(key.to_string());
            continue;
        };

        if parameters.contains(parameter) {
            tracing::debug!("Duplicate key '{}' for {}; keeping latest", key, parameter.key());
            report.duplicates.push(key.to_string());
        }

        if let Err(e) = parameters.insert(parameter, number) {
            tracing::warn!("Dropping {}: {}", key, e);
            report.dropped.push(key.to_string());
        }
    }

    (parameters, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ignores_case_and_separators() {
        assert_eq!(normalize("pH"), Some(Parameter::Ph));
        assert_eq!(normalize("PH"), Some(Parameter::Ph));
        assert_eq!(normalize("organic_carbon"), Some(Parameter::OrganicCarbon));
        assert_eq!(normalize("Organic Carbon"), Some(Parameter::OrganicCarbon));
        assert_eq!(normalize("organic-carbon"), Some(Parameter::OrganicCarbon));
        assert_eq!(normalize("  Available  N "), Some(Parameter::Nitrogen));
    }

    #[test]
    fn normalize_recognizes_chemical_symbols() {
        assert_eq!(normalize("n"), Some(Parameter::Nitrogen));
        assert_eq!(normalize("Ca"), Some(Parameter::Calcium));
        assert_eq!(normalize("HCO3"), Some(Parameter::Bicarbonate));
        assert_eq!(normalize("Zn"), Some(Parameter::Zinc));
        assert_eq!(normalize("Sulphur"), Some(Parameter::Sulfur));
    }

    #[test]
    fn normalize_key_passes_unknown_through() {
        assert_eq!(normalize_key("Ca"), "calcium");
        assert_eq!(normalize_key("Soil Texture"), "Soil Texture");
        assert_eq!(normalize("Soil Texture"), None);
    }

    #[test]
    fn parse_numeric_accepts_finite_only() {
        assert_eq!(parse_numeric(&RawValue::Number(6.5)), Some(6.5));
        assert_eq!(parse_numeric(&RawValue::from(" 7.25 ")), Some(7.25));
        assert_eq!(parse_numeric(&RawValue::from("-1")), Some(-1.0));
        assert_eq!(parse_numeric(&RawValue::Number(f64::NAN)), None);
        assert_eq!(parse_numeric(&RawValue::Number(f64::INFINITY)), None);
        assert_eq!(parse_numeric(&RawValue::from("NaN")), None);
        assert_eq!(parse_numeric(&RawValue::from("Infinity")), None);
        assert_eq!(parse_numeric(&RawValue::from("inf")), None);
        assert_eq!(parse_numeric(&RawValue::from("high")), None);
        assert_eq!(parse_numeric(&RawValue::from("")), None);
    }

    #[test]
    fn normalize_parameters_reports_omissions() {
        let raw: Vec<(&str, RawValue)> = vec![
            ("pH", RawValue::from("6.1")),
            ("N", RawValue::Number(250.0)),
            ("Zn", RawValue::from("trace")),
            ("Lab Ref", RawValue::from("A-113")),
            ("nitrogen", RawValue::Number(260.0)),
        ];
        let (params, report) = normalize_parameters(raw);

        assert_eq!(params.len(), 2);
        assert_eq!(params.get(Parameter::Ph), Some(6.1));
        assert_eq!(params.get(Parameter::Nitrogen), Some(260.0));
        assert_eq!(report.dropped, vec!["Zn".to_string()]);
        assert_eq!(report.unrecognized, vec!["Lab Ref".to_string()]);
        assert_eq!(report.duplicates, vec!["nitrogen".to_string()]);
        assert!(!report.is_clean());
    }
}
