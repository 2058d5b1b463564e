//! Image records indexed by their numeric `index`.

use std::collections::HashMap;

use super::types::ImageRecord;

/// Image records in file order with an index → position lookup.
#[derive(Debug, Clone, Default)]
pub struct ImageIndex {
    records: Vec<ImageRecord>,
    by_index: HashMap<i64, usize>,
}

impl ImageIndex {
    pub fn from_records(records: Vec<ImageRecord>) -> Self {
        let mut by_index = HashMap::with_capacity(records.len());
        for (pos, rec) in records.iter().enumerate() {
            if by_index.contains_key(&rec.index) {
                tracing::warn!(
                    "duplicate image index {} ({}); keeping the first record",
                    rec.index,
                    rec.image_url
                );
                continue;
            }
            by_index.insert(rec.index, pos);
        }
        Self { records, by_index }
    }

    /// Exact lookup by numeric image index.
    pub fn get(&self, index: i64) -> Option<&ImageRecord> {
        self.by_index.get(&index).map(|&pos| &self.records[pos])
    }

    /// Resolve a table cell reference such as `"7"`.
    ///
    /// Unparsable references resolve to `None`, the same as dangling ones.
    pub fn resolve(&self, reference: &str) -> Option<&ImageRecord> {
        let index = reference.trim().parse::<i64>().ok()?;
        self.get(index)
    }

    /// Records in file order.
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
