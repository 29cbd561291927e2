pub mod converters;
pub mod descriptor;
pub mod dynamic;
pub mod engine;
pub mod extractor;
pub mod resolver;
pub mod shaper;

pub use crate::domain::model::{DynamicMap, FieldRecord, ShapedCollection};
pub use crate::domain::ports::{
    BoxedConverter, ConfigProvider, Converter, IntoDynamicMap, Property, Shapeable,
};
pub use crate::utils::error::Result;
