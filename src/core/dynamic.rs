use crate::core::{DynamicMap, FieldRecord, IntoDynamicMap, ShapedCollection};

fn write_records(map: &mut DynamicMap, records: &[FieldRecord]) {
    for record in records {
        if let Some(key) = &record.key {
            map.insert(key.clone(), record.value.clone());
        }
    }
}

/// Folds field records into one map. Later records overwrite earlier ones
/// with the same key; records without a key are skipped.
pub fn records_to_dynamic_map(records: Option<&[FieldRecord]>) -> Option<DynamicMap> {
    let records = records?;
    let mut map = DynamicMap::new();
    write_records(&mut map, records);
    Some(map)
}

/// Flattens every row of `collection` into a single map.
///
/// Rows are written in order into the same map, so a field present in
/// several rows ends up with the value of the last one. Use
/// [`ShapedCollection::to_row_maps`] for one map per row.
pub fn collection_to_dynamic_map(collection: Option<&ShapedCollection>) -> Option<DynamicMap> {
    let collection = collection?;
    let mut map = DynamicMap::new();
    for row in collection {
        write_records(&mut map, row);
    }
    Some(map)
}

impl ShapedCollection {
    pub fn to_row_maps(&self) -> Vec<DynamicMap> {
        self.iter()
            .map(|row| {
                let mut map = DynamicMap::new();
                write_records(&mut map, row);
                map
            })
            .collect()
    }
}

impl IntoDynamicMap for [FieldRecord] {
    fn to_dynamic_map(&self) -> DynamicMap {
        let mut map = DynamicMap::new();
        write_records(&mut map, self);
        map
    }
}

impl IntoDynamicMap for Vec<FieldRecord> {
    fn to_dynamic_map(&self) -> DynamicMap {
        self.as_slice().to_dynamic_map()
    }
}

impl IntoDynamicMap for ShapedCollection {
    fn to_dynamic_map(&self) -> DynamicMap {
        let mut map = DynamicMap::new();
        for row in self {
            write_records(&mut map, row);
        }
        map
    }
}
