use crate::config::{OutputFormat, OutputLayout};
use crate::core::converters;
use crate::core::descriptor::TypeDescriptor;
use crate::core::dynamic::{collection_to_dynamic_map, records_to_dynamic_map};
use crate::core::shaper::ShapeOptions;
use crate::core::{BoxedConverter, ConfigProvider, DynamicMap, FieldRecord, ShapedCollection};
use crate::utils::error::{Result, ShapeError};
use serde::Serialize;
use serde_json::Value;

/// Parsed input document.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Single(DynamicMap),
    Many(Vec<DynamicMap>),
}

impl Document {
    pub fn parse(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(object) => Ok(Document::Single(object)),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(object) => Ok(object),
                    other => Err(ShapeError::InvalidInput {
                        message: format!("element {} is not an object: {}", index, other),
                    }),
                })
                .collect::<Result<Vec<_>>>()
                .map(Document::Many),
            other => Err(ShapeError::InvalidInput {
                message: format!("expected an object or an array, found {}", other),
            }),
        }
    }

    fn objects(&self) -> &[DynamicMap] {
        match self {
            Document::Single(object) => std::slice::from_ref(object),
            Document::Many(objects) => objects,
        }
    }
}

/// Shaped form of a [`Document`].
#[derive(Debug, Clone, PartialEq)]
pub enum Shaped {
    Single(Vec<FieldRecord>),
    Many(ShapedCollection),
}

/// Drives the CLI: parse, shape, render.
pub struct ShapeEngine<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> ShapeEngine<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn options(&self) -> ShapeOptions {
        ShapeOptions {
            ignore_case: self.config.ignore_case(),
        }
    }

    /// 依設定組合轉換器：遮罩 -> 日期格式 -> 字串化
    fn build_converter(&self) -> Option<BoxedConverter<'static, DynamicMap>> {
        let mut stages: Vec<BoxedConverter<'static, DynamicMap>> = Vec::new();

        if !self.config.redact_fields().is_empty() {
            stages.push(converters::redact(
                self.config.redact_fields().to_vec(),
                self.config.redact_placeholder(),
            ));
        }
        if let Some(format) = self.config.datetime_format() {
            if !self.config.datetime_fields().is_empty() {
                stages.push(converters::reformat_datetime(
                    self.config.datetime_fields().to_vec(),
                    format,
                ));
            }
        }
        if self.config.stringify() {
            stages.push(converters::stringify());
        }

        stages.into_iter().reduce(converters::chain)
    }

    pub fn shape(&self, document: &Document) -> Result<Shaped> {
        let descriptor = TypeDescriptor::for_json_objects(document.objects());
        let mut converter = self.build_converter();
        tracing::debug!(
            "🔧 {} properties discovered, converter {}",
            descriptor.properties().len(),
            if converter.is_some() { "enabled" } else { "disabled" }
        );

        match document {
            Document::Single(object) => {
                let records = descriptor
                    .shape(
                        Some(object),
                        self.config.fields(),
                        self.options(),
                        converter.as_deref_mut(),
                    )?
                    .unwrap_or_default();
                Ok(Shaped::Single(records))
            }
            Document::Many(objects) => {
                let collection = descriptor
                    .shape_collection(
                        Some(objects),
                        self.config.fields(),
                        self.options(),
                        converter.as_deref_mut(),
                    )?
                    .unwrap_or_default();
                Ok(Shaped::Many(collection))
            }
        }
    }

    pub fn render(&self, shaped: &Shaped) -> Result<String> {
        match self.config.output_format() {
            OutputFormat::Json => match shaped {
                Shaped::Single(records) => {
                    let map = records_to_dynamic_map(Some(records.as_slice())).unwrap_or_default();
                    self.to_json(&map)
                }
                Shaped::Many(collection) => match self.config.layout() {
                    OutputLayout::Rows => self.to_json(&collection.to_row_maps()),
                    OutputLayout::Collapsed => self
                        .to_json(&collection_to_dynamic_map(Some(collection)).unwrap_or_default()),
                },
            },
            OutputFormat::Csv => match shaped {
                Shaped::Single(records) => to_csv(std::slice::from_ref(records)),
                Shaped::Many(collection) => to_csv(collection.rows()),
            },
        }
    }

    pub fn run(&self, input: &str) -> Result<String> {
        let document = Document::parse(input)?;
        tracing::info!("📥 Loaded {} record(s)", document.objects().len());

        let shaped = self.shape(&document)?;
        if let Shaped::Many(collection) = &shaped {
            tracing::info!("🔄 Shaped {} row(s)", collection.len());
        }

        let output = self.render(&shaped)?;
        tracing::info!(
            "📤 Rendered {} output ({} bytes)",
            self.config.output_format(),
            output.len()
        );
        Ok(output)
    }

    fn to_json<T: Serialize>(&self, value: &T) -> Result<String> {
        let text = if self.config.pretty() {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(text)
    }
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 表頭取所有列的欄位聯集，依第一次出現的順序
fn to_csv(rows: &[Vec<FieldRecord>]) -> Result<String> {
    let mut header: Vec<&str> = Vec::new();
    for record in rows.iter().flatten() {
        if let Some(key) = record.key.as_deref() {
            if !header.contains(&key) {
                header.push(key);
            }
        }
    }

    if header.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&header)?;

    for row in rows {
        let cells: Vec<String> = header
            .iter()
            .map(|column| {
                row.iter()
                    .rev()
                    .find(|r| r.key.as_deref() == Some(*column))
                    .map(|r| csv_cell(&r.value))
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&cells)?;
    }

    let bytes = writer.into_inner().map_err(|e| {
        ShapeError::IoError(std::io::Error::new(e.error().kind(), e.to_string()))
    })?;
    String::from_utf8(bytes).map_err(|e| ShapeError::InvalidInput {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}
