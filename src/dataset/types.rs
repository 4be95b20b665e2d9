// src/dataset/types.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One data line: normalized column name → cell value.
pub type Row = BTreeMap<String, String>;

/// The eight columns of the page-metrics export, in file order.
pub const EXPECTED_COLUMNS: [&str; 8] = [
    "date",
    "page_views",
    "daily_paid_likes",
    "paid_post_impressions",
    "organic_post_impressions",
    "total_page_likes",
    "daily_organic_likes",
    "amount_spent",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    String,
    Numeric,
    Logical,
    Date,
    NumericMeasure,
}

/// What the remote service should do with a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataRole {
    None,
    Timestamp,
    Target,
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMetadata {
    pub data_type: DataType,
    pub role: DataRole,
}

/// Column name → metadata, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Columns(BTreeMap<String, ColumnMetadata>);

impl Columns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a repeated name replaces the earlier entry.
    pub fn with(mut self, name: &str, data_type: DataType, role: DataRole) -> Self {
        self.set(name, data_type, role);
        self
    }

    pub fn set(&mut self, name: &str, data_type: DataType, role: DataRole) {
        self.0
            .insert(name.to_string(), ColumnMetadata { data_type, role });
    }

    pub fn get(&self, name: &str) -> Option<&ColumnMetadata> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnMetadata)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Names of every column carrying `role`, in name order.
    pub fn with_role(&self, role: DataRole) -> Vec<&str> {
        self.iter()
            .filter(|(_, meta)| meta.role == role)
            .map(|(name, _)| name)
            .collect()
    }

    /// Metadata sent alongside the uploaded rows: the date column is the
    /// timestamp, every measure is numeric with no analytical role yet.
    pub fn upload_schema() -> Self {
        EXPECTED_COLUMNS
            .iter()
            .fold(Self::new(), |cols, &name| match name {
                "date" => cols.with(name, DataType::Date, DataRole::Timestamp),
                _ => cols.with(name, DataType::Numeric, DataRole::None),
            })
    }

    /// Metadata sent with the impact request: likes are the outcome,
    /// page views and spend are predictors.
    pub fn impact_schema() -> Self {
        EXPECTED_COLUMNS
            .iter()
            .fold(Self::new(), |cols, &name| match name {
                "date" => cols.with(name, DataType::Date, DataRole::Timestamp),
                "total_page_likes" => cols.with(name, DataType::Numeric, DataRole::Target),
                "page_views" | "amount_spent" => {
                    cols.with(name, DataType::Numeric, DataRole::Feature)
                }
                _ => cols.with(name, DataType::Numeric, DataRole::None),
            })
    }
}

/// An in-memory table ready for upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSetData {
    pub columns: Columns,
    pub data: Vec<Row>,
}
