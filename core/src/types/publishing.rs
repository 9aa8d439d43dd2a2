//! Publishers, imprints, universes, and series.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::common::{BaseResource, GenericItem};
use super::null_as_default;

pub type BasePublisher = BaseResource;
pub type BaseUniverse = BaseResource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    pub id: u64,
    pub name: String,
    pub founded: Option<i32>,
    pub desc: Option<String>,
    pub image: Option<String>,
    pub cv_id: Option<u64>,
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

/// A publisher's imprint; carries its parent publisher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imprint {
    pub id: u64,
    pub name: String,
    pub founded: Option<i32>,
    pub desc: Option<String>,
    pub image: Option<String>,
    pub cv_id: Option<u64>,
    pub gcd_id: Option<u64>,
    pub publisher: GenericItem,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub id: u64,
    pub name: String,
    pub publisher: GenericItem,
    pub designation: Option<String>,
    pub desc: Option<String>,
    pub image: Option<String>,
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

/// A series linked from another series (e.g. an annual).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociatedSeries {
    pub id: u64,
    #[serde(alias = "series")]
    pub name: String,
}

/// List-view series. The service sends the display name as `series`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseSeries {
    pub id: u64,
    #[serde(rename = "series")]
    pub display_name: String,
    pub year_began: i32,
    pub issue_count: u32,
    #[serde(default)]
    pub volume: Option<u32>,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: u64,
    pub name: String,
    pub sort_name: String,
    pub volume: u32,
    pub series_type: GenericItem,
    #[serde(default)]
    pub status: Option<String>,
    pub publisher: GenericItem,
    #[serde(default)]
    pub imprint: Option<GenericItem>,
    pub year_began: i32,
    pub year_end: Option<i32>,
    pub issue_count: u32,
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<GenericItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub associated: Vec<AssociatedSeries>,
    pub cv_id: Option<u64>,
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublisherPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founded: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcd_id: Option<u64>,
}

/// Universe create/update payload; `publisher` is a publisher id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UniversePost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcd_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniversePostResponse {
    pub id: u64,
    pub publisher: u64,
    pub name: String,
    pub designation: Option<String>,
    pub desc: Option<String>,
    pub image: Option<String>,
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

/// Series create/update payload. Related objects are referenced by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_type: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imprint: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_began: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_end: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub associated: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcd_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPostResponse {
    pub id: u64,
    pub name: String,
    pub sort_name: String,
    pub volume: u32,
    pub series_type: u64,
    #[serde(default)]
    pub status: Option<String>,
    pub publisher: u64,
    #[serde(default)]
    pub imprint: Option<u64>,
    pub year_began: i32,
    pub year_end: Option<i32>,
    pub desc: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub associated: Vec<u64>,
    pub cv_id: Option<u64>,
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}
