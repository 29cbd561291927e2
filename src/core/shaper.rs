use crate::core::extractor::extract;
use crate::core::resolver::resolve_properties;
use crate::core::{Converter, DynamicMap, FieldRecord, Property, Shapeable, ShapedCollection};
use crate::utils::error::Result;

/// Options shared by every shaping entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeOptions {
    pub ignore_case: bool,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self { ignore_case: true }
    }
}

impl ShapeOptions {
    pub fn case_sensitive() -> Self {
        Self { ignore_case: false }
    }
}

fn into_records(map: DynamicMap) -> Vec<FieldRecord> {
    map.into_iter()
        .map(|(key, value)| FieldRecord {
            key: Some(key),
            value,
        })
        .collect()
}

pub(crate) fn shape_object<T>(
    properties: &[Property<T>],
    source: Option<&T>,
    fields: Option<&str>,
    options: ShapeOptions,
    converter: Option<&mut Converter<'_, T>>,
) -> Result<Option<Vec<FieldRecord>>> {
    let Some(source) = source else {
        return Ok(None);
    };

    let resolved = resolve_properties(properties, fields, options.ignore_case);
    tracing::debug!("Resolved {} of {} properties", resolved.len(), properties.len());

    let map = extract(&resolved, source, options.ignore_case, converter)?;
    Ok(Some(into_records(map)))
}

pub(crate) fn shape_many<'a, T: 'a, I>(
    properties: &[Property<T>],
    source: Option<I>,
    fields: Option<&str>,
    options: ShapeOptions,
    mut converter: Option<&mut Converter<'_, T>>,
) -> Result<Option<ShapedCollection>>
where
    I: IntoIterator<Item = &'a T>,
{
    let Some(source) = source else {
        return Ok(None);
    };

    // 只解析一次，所有列共用同一組屬性
    let resolved = resolve_properties(properties, fields, options.ignore_case);
    tracing::debug!("Resolved {} of {} properties", resolved.len(), properties.len());

    let mut collection = ShapedCollection::new();
    let mut dropped = 0usize;
    for item in source {
        let map = extract(&resolved, item, options.ignore_case, converter.as_deref_mut())?;
        if map.is_empty() {
            dropped += 1;
            continue;
        }
        collection.push_row(into_records(map));
    }

    tracing::debug!(
        "Shaped {} rows ({} empty rows dropped)",
        collection.len(),
        dropped
    );
    Ok(Some(collection))
}

/// Shapes a single object into field records.
///
/// Returns `Ok(None)` when `source` is `None`.
pub fn shape<T: Shapeable>(
    source: Option<&T>,
    fields: Option<&str>,
    options: ShapeOptions,
) -> Result<Option<Vec<FieldRecord>>> {
    shape_object(&T::properties(), source, fields, options, None)
}

/// Same as [`shape`], passing each raw value through `converter`.
pub fn shape_with<T: Shapeable>(
    source: Option<&T>,
    fields: Option<&str>,
    options: ShapeOptions,
    converter: &mut Converter<'_, T>,
) -> Result<Option<Vec<FieldRecord>>> {
    shape_object(&T::properties(), source, fields, options, Some(converter))
}

/// Shapes every element of a collection against one resolved property set.
///
/// Elements whose shaped row ends up empty are left out of the result.
pub fn shape_collection<'a, T, I>(
    source: Option<I>,
    fields: Option<&str>,
    options: ShapeOptions,
) -> Result<Option<ShapedCollection>>
where
    T: Shapeable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    shape_many(&T::properties(), source, fields, options, None)
}

pub fn shape_collection_with<'a, T, I>(
    source: Option<I>,
    fields: Option<&str>,
    options: ShapeOptions,
    converter: &mut Converter<'_, T>,
) -> Result<Option<ShapedCollection>>
where
    T: Shapeable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    shape_many(&T::properties(), source, fields, options, Some(converter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ShapeError;
    use serde_json::{json, Value};

    struct Product {
        sku: String,
        price: f64,
        stock: Option<u32>,
    }

    impl Shapeable for Product {
        fn properties() -> Vec<Property<Self>> {
            vec![
                Property::new("Sku", |p: &Product| Ok(json!(p.sku))),
                Property::new("Price", |p: &Product| Ok(json!(p.price))),
                Property::new("Stock", |p: &Product| Ok(json!(p.stock))),
            ]
        }
    }

    fn products() -> Vec<Product> {
        vec![
            Product {
                sku: "A-1".to_string(),
                price: 9.5,
                stock: Some(3),
            },
            Product {
                sku: "B-2".to_string(),
                price: 20.0,
                stock: None,
            },
        ]
    }

    #[test]
    fn test_shape_none_source() {
        let result = shape::<Product>(None, Some("sku"), ShapeOptions::default()).unwrap();
        assert!(result.is_none());

        let result =
            shape_collection::<Product, &Vec<Product>>(None, Some("sku"), ShapeOptions::default())
                .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_shape_keys_use_declared_case() {
        let items = products();
        let records = shape(Some(&items[0]), Some("price , SKU"), ShapeOptions::default())
            .unwrap()
            .unwrap();

        assert_eq!(
            records,
            vec![
                FieldRecord::new("Price", json!(9.5)),
                FieldRecord::new("Sku", json!("A-1")),
            ]
        );
    }

    #[test]
    fn test_shape_null_property_value() {
        let items = products();
        let records = shape(Some(&items[1]), Some("stock"), ShapeOptions::default())
            .unwrap()
            .unwrap();

        assert_eq!(records, vec![FieldRecord::new("Stock", Value::Null)]);
    }

    #[test]
    fn test_shape_case_sensitive_misses() {
        let items = products();
        let records = shape(Some(&items[0]), Some("sku,Price"), ShapeOptions::case_sensitive())
            .unwrap()
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key.as_deref(), Some("Price"));
    }

    #[test]
    fn test_shape_duplicate_field_fails() {
        let items = products();
        let err = shape(Some(&items[0]), Some("sku,Sku"), ShapeOptions::default()).unwrap_err();

        assert!(matches!(err, ShapeError::DuplicateKey { .. }));
    }

    #[test]
    fn test_collection_rows_follow_source_order() {
        let items = products();
        let collection = shape_collection(Some(&items), Some("sku"), ShapeOptions::default())
            .unwrap()
            .unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.rows()[0][0].value, json!("A-1"));
        assert_eq!(collection.rows()[1][0].value, json!("B-2"));
    }

    #[test]
    fn test_collection_with_no_matching_fields_is_empty() {
        let items = products();
        let collection = shape_collection(Some(&items), Some("bogus"), ShapeOptions::default())
            .unwrap()
            .unwrap();

        assert!(collection.is_empty());
    }

    #[test]
    fn test_collection_converter_called_per_field_per_row() {
        let items = products();
        let mut calls = 0;
        let mut converter = |_: &Product, _: &str, raw: Value| -> Result<Value> {
            calls += 1;
            Ok(raw)
        };

        let collection = shape_collection_with(
            Some(&items),
            Some("sku,price"),
            ShapeOptions::default(),
            &mut converter,
        )
        .unwrap()
        .unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_converter_error_propagates() {
        let items = products();
        let mut converter = |_: &Product, name: &str, _: Value| -> Result<Value> {
            Err(ShapeError::Conversion {
                property: name.to_string(),
                message: "rejected".to_string(),
            })
        };

        let err = shape_with(Some(&items[0]), None, ShapeOptions::default(), &mut converter)
            .unwrap_err();
        assert!(matches!(err, ShapeError::Conversion { property, .. } if property == "Sku"));
    }
}
