use crate::config::{OutputFormat, OutputLayout};
use crate::domain::model::DynamicMap;
use crate::utils::error::Result;
use serde_json::Value;
use std::fmt;

type Getter<T> = Box<dyn Fn(&T) -> Result<Value>>;

/// A named, readable property of `T`.
pub struct Property<T> {
    name: String,
    getter: Getter<T>,
}

impl<T> Property<T> {
    pub fn new<F>(name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&T) -> Result<Value> + 'static,
    {
        Self {
            name: name.into(),
            getter: Box::new(getter),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn read(&self, source: &T) -> Result<Value> {
        (self.getter)(source)
    }
}

impl<T> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property").field("name", &self.name).finish()
    }
}

/// Types that can enumerate their readable properties.
///
/// The order of the returned list is the order used when a caller asks for
/// all fields; it is whatever the implementation lists, nothing stronger.
pub trait Shapeable: Sized {
    fn properties() -> Vec<Property<Self>>;
}

/// Caller-supplied value transformation: `(source, property_name, raw_value)`.
pub type Converter<'a, T> = dyn FnMut(&T, &str, Value) -> Result<Value> + 'a;

pub type BoxedConverter<'a, T> = Box<Converter<'a, T>>;

/// Conversion of shaped output into a single loosely-typed map.
pub trait IntoDynamicMap {
    fn to_dynamic_map(&self) -> DynamicMap;
}

pub trait ConfigProvider {
    fn fields(&self) -> Option<&str>;
    fn ignore_case(&self) -> bool;
    fn redact_fields(&self) -> &[String];
    fn redact_placeholder(&self) -> &str;
    fn stringify(&self) -> bool;
    fn datetime_fields(&self) -> &[String];
    fn datetime_format(&self) -> Option<&str>;
    fn output_format(&self) -> OutputFormat;
    fn layout(&self) -> OutputLayout;
    fn pretty(&self) -> bool;
}
