use crate::core::{Converter, DynamicMap, Property};
use crate::utils::error::{Result, ShapeError};
use std::collections::HashSet;

fn key_identity(name: &str, ignore_case: bool) -> String {
    if ignore_case {
        name.to_ascii_lowercase()
    } else {
        name.to_string()
    }
}

/// Reads every resolved property off `source` into an insertion-ordered map.
///
/// The converter, when present, sees each raw value exactly once and its
/// return value is what gets stored. Inserting the same key twice fails with
/// [`ShapeError::DuplicateKey`]; with `ignore_case` keys that differ only by
/// ASCII case count as the same key.
pub fn extract<T>(
    properties: &[&Property<T>],
    source: &T,
    ignore_case: bool,
    mut converter: Option<&mut Converter<'_, T>>,
) -> Result<DynamicMap> {
    let mut map = DynamicMap::new();
    let mut seen = HashSet::with_capacity(properties.len());

    for property in properties {
        let name = property.name();
        if !seen.insert(key_identity(name, ignore_case)) {
            return Err(ShapeError::DuplicateKey {
                key: name.to_string(),
            });
        }

        let raw = property.read(source)?;
        let value = match converter.as_deref_mut() {
            Some(convert) => convert(source, name, raw)?,
            None => raw,
        };
        map.insert(name.to_string(), value);
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::resolve_properties;
    use serde_json::{json, Value};

    struct Account {
        id: i64,
        owner: String,
    }

    fn account_properties() -> Vec<Property<Account>> {
        vec![
            Property::new("Id", |a: &Account| Ok(json!(a.id))),
            Property::new("Owner", |a: &Account| Ok(json!(a.owner))),
        ]
    }

    fn account() -> Account {
        Account {
            id: 7,
            owner: "Ada".to_string(),
        }
    }

    #[test]
    fn test_extract_in_resolution_order() {
        let properties = account_properties();
        let resolved = resolve_properties(&properties, Some("owner,id"), true);

        let map = extract(&resolved, &account(), true, None).unwrap();
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, vec!["Owner", "Id"]);
        assert_eq!(map["Id"], json!(7));
        assert_eq!(map["Owner"], json!("Ada"));
    }

    #[test]
    fn test_duplicate_property_fails() {
        let properties = account_properties();
        let resolved = resolve_properties(&properties, Some("id,id"), true);

        let err = extract(&resolved, &account(), true, None).unwrap_err();
        assert!(matches!(err, ShapeError::DuplicateKey { key } if key == "Id"));
    }

    #[test]
    fn test_case_folding_collision_fails_only_when_ignoring_case() {
        let properties = vec![
            Property::new("Name", |_: &Account| Ok(json!("upper"))),
            Property::new("name", |_: &Account| Ok(json!("lower"))),
        ];
        let resolved = resolve_properties(&properties, None, true);
        let err = extract(&resolved, &account(), true, None).unwrap_err();
        assert!(matches!(err, ShapeError::DuplicateKey { key } if key == "name"));

        let resolved = resolve_properties(&properties, None, false);
        let map = extract(&resolved, &account(), false, None).unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_converter_receives_raw_value() {
        let properties = account_properties();
        let resolved = resolve_properties(&properties, None, true);
        let mut seen = Vec::new();
        let mut converter = |src: &Account, name: &str, raw: Value| -> Result<Value> {
            seen.push((src.id, name.to_string(), raw.clone()));
            Ok(Value::String(raw.to_string()))
        };

        let map = extract(&resolved, &account(), true, Some(&mut converter)).unwrap();
        assert_eq!(map["Id"], json!("7"));
        assert_eq!(
            seen,
            vec![
                (7, "Id".to_string(), json!(7)),
                (7, "Owner".to_string(), json!("Ada")),
            ]
        );
    }

    #[test]
    fn test_getter_failure_propagates() {
        let properties = vec![Property::new("Broken", |_: &Account| {
            Err(ShapeError::PropertyAccess {
                property: "Broken".to_string(),
                message: "storage unavailable".to_string(),
            })
        })];
        let resolved = resolve_properties(&properties, None, true);

        let err = extract(&resolved, &account(), true, None).unwrap_err();
        assert!(matches!(err, ShapeError::PropertyAccess { .. }));
    }
}
