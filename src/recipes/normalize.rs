//! Canonicalization of ingredient / shopping-list entries.
//!
//! Entries reach us in three shapes: a plain string ("Pepper"), a stringified
//! JSON object ('{"name":"Salt","quantity":"1","unit":"tsp"}'), or a structured
//! object. Legacy rows can even hold a catalog `name` that is itself a
//! JSON-encoded object (double-encoded). Everything funnels through this
//! module at ingress and egress; nothing else in the crate branches on entry
//! shape.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// An ingredient or shopping-list entry as it arrives from forms, AI output,
/// or stored rows, before canonicalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawEntry {
    Structured {
        name: String,
        #[serde(default)]
        quantity: Option<String>,
        #[serde(default)]
        unit: Option<String>,
    },
    Text(String),
}

/// The canonical entry shape used everywhere past the ingress boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NormalizedEntry {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

/// Deserialization routes through [`RawEntry`] and [`normalize`], so payloads
/// arriving with entries as strings, stringified JSON, or partial objects all
/// land in the canonical shape without callers branching on shape.
impl<'de> Deserialize<'de> for NormalizedEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawEntry::deserialize(deserializer)?;
        Ok(normalize(&raw))
    }
}

impl NormalizedEntry {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            quantity: String::new(),
            unit: String::new(),
        }
    }
}

/// Canonicalize one entry. Never fails: strings that do not parse as a JSON
/// object with a `name` field are taken verbatim as the name.
pub fn normalize(entry: &RawEntry) -> NormalizedEntry {
    match entry {
        RawEntry::Structured {
            name,
            quantity,
            unit,
        } => NormalizedEntry {
            name: name.clone(),
            quantity: quantity.clone().unwrap_or_default(),
            unit: unit.clone().unwrap_or_default(),
        },
        RawEntry::Text(raw) => parse_embedded(raw).unwrap_or_else(|| NormalizedEntry::named(raw)),
    }
}

/// Read-side unwrap for a stored catalog name plus optional join-level
/// quantity/unit. Detects double-encoded legacy names and unwraps them;
/// join values win over anything embedded in the name when non-empty.
pub fn display_entry(stored_name: &str, join_quantity: &str, join_unit: &str) -> NormalizedEntry {
    let mut entry = unwrap_name(stored_name);
    if !join_quantity.is_empty() {
        entry.quantity = join_quantity.to_string();
    }
    if !join_unit.is_empty() {
        entry.unit = join_unit.to_string();
    }
    entry
}

/// Repeatedly unwrap a name that is itself a JSON-encoded entry. Legacy data
/// has been observed double-encoded, so keep going until it stops parsing.
fn unwrap_name(stored_name: &str) -> NormalizedEntry {
    let mut entry = NormalizedEntry::named(stored_name);
    while let Some(inner) = parse_embedded(&entry.name) {
        if inner.quantity.is_empty() && inner.unit.is_empty() {
            entry.name = inner.name;
        } else {
            entry = inner;
        }
    }
    entry
}

/// Try to interpret a string as a JSON object carrying a `name` field.
/// Quantity may arrive as a JSON number rather than a string.
fn parse_embedded(raw: &str) -> Option<NormalizedEntry> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('{') {
        return None;
    }
    let value: Value = serde_json::from_str(trimmed).ok()?;
    let obj = value.as_object()?;
    let name = obj.get("name").and_then(Value::as_str)?;
    Some(NormalizedEntry {
        name: name.to_string(),
        quantity: obj.get("quantity").map(field_as_string).unwrap_or_default(),
        unit: obj.get("unit").map(field_as_string).unwrap_or_default(),
    })
}

fn field_as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RawEntry {
        RawEntry::Text(s.to_string())
    }

    #[test]
    fn test_normalize_json_string_and_object_agree() {
        let from_string = normalize(&text(r#"{"name":"Salt","quantity":"1","unit":"tsp"}"#));
        let from_object = normalize(&RawEntry::Structured {
            name: "Salt".to_string(),
            quantity: Some("1".to_string()),
            unit: Some("tsp".to_string()),
        });
        assert_eq!(from_string, from_object);
        assert_eq!(from_string.name, "Salt");
        assert_eq!(from_string.quantity, "1");
        assert_eq!(from_string.unit, "tsp");
    }

    #[test]
    fn test_normalize_plain_string() {
        let entry = normalize(&text("Pepper"));
        assert_eq!(entry.name, "Pepper");
        assert_eq!(entry.quantity, "");
        assert_eq!(entry.unit, "");
    }

    #[test]
    fn test_normalize_malformed_json_falls_back_to_name() {
        let entry = normalize(&text(r#"{"name": "Broken"#));
        assert_eq!(entry.name, r#"{"name": "Broken"#);
    }

    #[test]
    fn test_normalize_json_without_name_field_is_verbatim() {
        let entry = normalize(&text(r#"{"quantity":"2"}"#));
        assert_eq!(entry.name, r#"{"quantity":"2"}"#);
    }

    #[test]
    fn test_normalize_defaults_missing_quantity_and_unit() {
        let entry = normalize(&text(r#"{"name":"Flour"}"#));
        assert_eq!(entry.name, "Flour");
        assert_eq!(entry.quantity, "");
        assert_eq!(entry.unit, "");
    }

    #[test]
    fn test_normalize_numeric_quantity() {
        let entry = normalize(&text(r#"{"name":"Eggs","quantity":2,"unit":"pcs"}"#));
        assert_eq!(entry.quantity, "2");
    }

    #[test]
    fn test_display_entry_unwraps_double_encoded_name() {
        let stored = r#"{"name":"{\"name\":\"Carrots\",\"quantity\":\"2\",\"unit\":\"pcs\"}"}"#;
        let entry = display_entry(stored, "", "");
        assert_eq!(entry.name, "Carrots");
        assert_eq!(entry.quantity, "2");
        assert_eq!(entry.unit, "pcs");
    }

    #[test]
    fn test_display_entry_join_values_win() {
        let entry = display_entry(r#"{"name":"Rice","quantity":"1","unit":"cup"}"#, "3", "cups");
        assert_eq!(entry.name, "Rice");
        assert_eq!(entry.quantity, "3");
        assert_eq!(entry.unit, "cups");
    }

    #[test]
    fn test_display_entry_keeps_embedded_values_without_join_override() {
        let entry = display_entry(r#"{"name":"Rice","quantity":"1","unit":"cup"}"#, "", "");
        assert_eq!(entry.quantity, "1");
        assert_eq!(entry.unit, "cup");
    }

    #[test]
    fn test_display_entry_plain_name_passes_through() {
        let entry = display_entry("Onions", "2", "pcs");
        assert_eq!(entry.name, "Onions");
        assert_eq!(entry.quantity, "2");
    }

    #[test]
    fn test_deserialize_accepts_all_three_shapes() {
        let from_object: NormalizedEntry =
            serde_json::from_str(r#"{"name":"Salt","quantity":"1","unit":"tsp"}"#).unwrap();
        let from_json_string: NormalizedEntry =
            serde_json::from_str(r#""{\"name\":\"Salt\",\"quantity\":\"1\",\"unit\":\"tsp\"}""#)
                .unwrap();
        let from_plain_string: NormalizedEntry = serde_json::from_str(r#""Pepper""#).unwrap();

        assert_eq!(from_object, from_json_string);
        assert_eq!(from_plain_string.name, "Pepper");
        assert_eq!(from_plain_string.quantity, "");
    }
}
