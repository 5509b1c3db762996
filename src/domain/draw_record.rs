use serde::{ser::SerializeMap, Serialize, Serializer};
use serde_json::{Map, Value};

/// One extracted draw result. The field layout belongs to the extractor that
/// produced it, so the record is kept as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DrawRecord(Map<String, Value>);

impl DrawRecord {
    pub fn new() -> Self {
        DrawRecord(Map::new())
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Site identifier to extracted records, in registry order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultAggregate {
    entries: Vec<(String, Vec<DrawRecord>)>,
}

impl ResultAggregate {
    pub fn new() -> Self {
        ResultAggregate::default()
    }

    /// Sets the records for `site_id`. A site seen twice keeps its first
    /// position and takes the latest records.
    pub fn insert(&mut self, site_id: impl Into<String>, records: Vec<DrawRecord>) {
        let site_id = site_id.into();
        match self.entries.iter_mut().find(|(id, _)| *id == site_id) {
            Some((_, existing)) => *existing = records,
            None => self.entries.push((site_id, records)),
        }
    }

    pub fn get(&self, site_id: &str) -> Option<&[DrawRecord]> {
        self.entries
            .iter()
            .find(|(id, _)| id == site_id)
            .map(|(_, records)| records.as_slice())
    }

    pub fn site_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    pub fn total_records(&self) -> usize {
        self.entries.iter().map(|(_, records)| records.len()).sum()
    }
}

impl Serialize for ResultAggregate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (site_id, records) in self.entries.iter() {
            map.serialize_entry(site_id, records)?;
        }
        map.end()
    }
}
