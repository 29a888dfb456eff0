use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The three independent lookup dimensions
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DimensionKind {
    Source,
    Medium,
    Campaign,
}

impl DimensionKind {
    /// Human-readable label, e.g. for "Source added"
    pub fn label(&self) -> &'static str {
        match self {
            Self::Source => "Source",
            Self::Medium => "Medium",
            Self::Campaign => "Campaign",
        }
    }
}

/// A single persisted dimension value
///
/// `is_default` is only ever true for campaigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionValue {
    pub id: i32,
    pub kind: DimensionKind,
    pub name: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// All three dimensions, read at approximately the same time
///
/// No cross-dimension consistency is implied beyond that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSnapshot {
    pub sources: Vec<DimensionValue>,
    pub mediums: Vec<DimensionValue>,
    pub campaigns: Vec<DimensionValue>,
}

impl DimensionSnapshot {
    pub fn values(&self, kind: DimensionKind) -> &[DimensionValue] {
        match kind {
            DimensionKind::Source => &self.sources,
            DimensionKind::Medium => &self.mediums,
            DimensionKind::Campaign => &self.campaigns,
        }
    }

    /// Exact, case-sensitive lookup by name
    pub fn find(&self, kind: DimensionKind, name: &str) -> Option<&DimensionValue> {
        self.values(kind).iter().find(|v| v.name == name)
    }

    pub fn contains(&self, kind: DimensionKind, name: &str) -> bool {
        self.find(kind, name).is_some()
    }

    pub fn names(&self, kind: DimensionKind) -> Vec<&str> {
        self.values(kind).iter().map(|v| v.name.as_str()).collect()
    }

    pub fn default_campaign(&self) -> Option<&DimensionValue> {
        self.campaigns.iter().find(|c| c.is_default)
    }
}

/// A persisted generated URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub id: i32,
    pub base_url: String,
    pub source_id: i32,
    pub medium_id: Option<i32>,
    pub campaign_id: Option<i32>,
    pub content: Option<String>,
    pub generated_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a new URL record; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub base_url: String,
    pub source_id: i32,
    pub medium_id: Option<i32>,
    pub campaign_id: Option<i32>,
    pub content: Option<String>,
    pub generated_url: String,
}

/// Outcome of a seed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub sources_added: usize,
    pub mediums_added: usize,
    pub campaign_added: bool,
}
