pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::ShaperConfig;
pub use crate::core::descriptor::TypeDescriptor;
pub use crate::core::dynamic::{collection_to_dynamic_map, records_to_dynamic_map};
pub use crate::core::engine::ShapeEngine;
pub use crate::core::shaper::{
    shape, shape_collection, shape_collection_with, shape_with, ShapeOptions,
};
pub use crate::core::{
    BoxedConverter, Converter, DynamicMap, FieldRecord, IntoDynamicMap, Property, Shapeable,
    ShapedCollection,
};
pub use utils::error::{Result, ShapeError};

#[doc(hidden)]
pub use serde_json as __serde_json;
