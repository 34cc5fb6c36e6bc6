use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Group a variable belongs to in the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    MetaData,
    ObsValue,
    ObsError,
    #[serde(rename = "PreQC")]
    PreQc,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::MetaData => "MetaData",
            Category::ObsValue => "ObsValue",
            Category::ObsError => "ObsError",
            Category::PreQc => "PreQC",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "MetaData" => Some(Category::MetaData),
            "ObsValue" => Some(Category::ObsValue),
            "ObsError" => Some(Category::ObsError),
            "PreQC" => Some(Category::PreQc),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (variable name, category) pair identifying one output array
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VariableKey {
    pub category: Category,
    pub name: String,
}

impl VariableKey {
    pub fn new(name: &str, category: Category) -> Self {
        Self {
            category,
            name: name.to_string(),
        }
    }

    pub fn metadata(name: &str) -> Self {
        Self::new(name, Category::MetaData)
    }

    /// Column path used in the output file, e.g. `MetaData/latitude`
    pub fn column_name(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }

    pub fn from_column_name(column: &str) -> Option<Self> {
        let (category, name) = column.split_once('/')?;
        Some(Self::new(name, Category::parse(category)?))
    }
}

/// A typed output array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
    Float32(Vec<f32>),
    Int32(Vec<i32>),
    Utf8(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Float32(values) => values.len(),
            ColumnData::Int32(values) => values.len(),
            ColumnData::Utf8(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_f32(&self) -> Option<&[f32]> {
        match self {
            ColumnData::Float32(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<&[i32]> {
        match self {
            ColumnData::Int32(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            ColumnData::Utf8(values) => Some(values),
            _ => None,
        }
    }
}

pub type Attributes = BTreeMap<String, String>;

/// Everything the writer needs: arrays, per-variable attributes,
/// dimension sizes and global attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputBundle {
    pub variables: BTreeMap<VariableKey, ColumnData>,
    pub attributes: BTreeMap<VariableKey, Attributes>,
    pub dimensions: BTreeMap<String, usize>,
    pub variable_dimensions: BTreeMap<String, Vec<String>>,
    pub global_attributes: Attributes,
}

impl OutputBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: VariableKey, data: ColumnData) {
        self.variables.insert(key, data);
    }

    pub fn set_attribute(&mut self, key: &VariableKey, name: &str, value: &str) {
        self.attributes
            .entry(key.clone())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, key: &VariableKey) -> Option<&ColumnData> {
        self.variables.get(key)
    }

    /// Row count shared by every array (0 for an empty bundle)
    pub fn num_rows(&self) -> usize {
        self.variables.values().next().map_or(0, ColumnData::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_name() {
        let key = VariableKey::new("totalSnowDepth", Category::PreQc);
        assert_eq!(key.column_name(), "PreQC/totalSnowDepth");
        assert_eq!(VariableKey::metadata("latitude").column_name(), "MetaData/latitude");
        assert_eq!(VariableKey::from_column_name("PreQC/totalSnowDepth"), Some(key));
        assert_eq!(VariableKey::from_column_name("latitude"), None);
        assert_eq!(VariableKey::from_column_name("Unknown/latitude"), None);
    }

    #[test]
    fn test_keys_order_metadata_first() {
        let mut bundle = OutputBundle::new();
        bundle.insert(VariableKey::new("totalSnowDepth", Category::ObsValue), ColumnData::Float32(vec![]));
        bundle.insert(VariableKey::metadata("latitude"), ColumnData::Float32(vec![]));

        let first = bundle.variables.keys().next().unwrap();
        assert_eq!(first.category, Category::MetaData);
    }

    #[test]
    fn test_set_attribute_accumulates() {
        let mut bundle = OutputBundle::new();
        let key = VariableKey::new("totalSnowDepth", Category::ObsValue);
        bundle.set_attribute(&key, "units", "m");
        bundle.set_attribute(&key, "coordinates", "longitude latitude");

        assert_eq!(bundle.attributes[&key].len(), 2);
        assert_eq!(bundle.attributes[&key]["units"], "m");
    }
}
