use crate::core::shaper::{shape_many, shape_object, ShapeOptions};
use crate::core::{Converter, DynamicMap, FieldRecord, Property, Shapeable, ShapedCollection};
use crate::utils::error::Result;
use serde_json::Value;

/// Runtime registry of a type's readable properties.
///
/// Used where the property list is only known at run time, e.g. JSON
/// documents read by the CLI.
#[derive(Debug)]
pub struct TypeDescriptor<T> {
    type_name: String,
    properties: Vec<Property<T>>,
}

impl<T> TypeDescriptor<T> {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            properties: Vec::new(),
        }
    }

    pub fn with_property<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&T) -> Result<Value> + 'static,
    {
        self.properties.push(Property::new(name, getter));
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn properties(&self) -> &[Property<T>] {
        &self.properties
    }

    pub fn shape(
        &self,
        source: Option<&T>,
        fields: Option<&str>,
        options: ShapeOptions,
        converter: Option<&mut Converter<'_, T>>,
    ) -> Result<Option<Vec<FieldRecord>>> {
        shape_object(&self.properties, source, fields, options, converter)
    }

    pub fn shape_collection<'a, I>(
        &self,
        source: Option<I>,
        fields: Option<&str>,
        options: ShapeOptions,
        converter: Option<&mut Converter<'_, T>>,
    ) -> Result<Option<ShapedCollection>>
    where
        T: 'a,
        I: IntoIterator<Item = &'a T>,
    {
        tracing::debug!("Shaping collection of {}", self.type_name);
        shape_many(&self.properties, source, fields, options, converter)
    }
}

impl<T: Shapeable> TypeDescriptor<T> {
    pub fn of() -> Self {
        Self {
            type_name: std::any::type_name::<T>().to_string(),
            properties: T::properties(),
        }
    }
}

impl TypeDescriptor<DynamicMap> {
    /// 由 JSON 物件推導屬性，依鍵第一次出現的順序排列
    ///
    /// A key missing from a given object reads as `null`.
    pub fn for_json_objects(objects: &[DynamicMap]) -> Self {
        let mut descriptor = Self::new("object");
        for object in objects {
            for key in object.keys() {
                if descriptor.properties.iter().any(|p| p.name() == key.as_str()) {
                    continue;
                }
                let lookup = key.clone();
                descriptor = descriptor.with_property(key.clone(), move |obj: &DynamicMap| {
                    Ok(obj.get(&lookup).cloned().unwrap_or(Value::Null))
                });
            }
        }
        descriptor
    }
}

/// Implements [`Shapeable`](crate::Shapeable) for a struct by listing the
/// fields to expose. Each field is read through `serde_json::to_value`.
///
/// ```
/// use field_shaper::shapeable;
///
/// #[derive(serde::Serialize)]
/// struct User {
///     id: u64,
///     name: String,
/// }
///
/// shapeable!(User { id, name });
/// ```
#[macro_export]
macro_rules! shapeable {
    ($ty:ty { $($field:ident),+ $(,)? }) => {
        impl $crate::Shapeable for $ty {
            fn properties() -> ::std::vec::Vec<$crate::Property<Self>> {
                ::std::vec![
                    $(
                        $crate::Property::new(stringify!($field), |source: &$ty| {
                            $crate::__serde_json::to_value(&source.$field).map_err(|e| {
                                $crate::ShapeError::PropertyAccess {
                                    property: stringify!($field).to_string(),
                                    message: e.to_string(),
                                }
                            })
                        }),
                    )+
                ]
            }
        }
    };
}
