//! Issues and the records hanging off them: credits, variants, reprints.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::common::{BaseResource, GenericItem};
use super::null_as_default;
use super::people::{BaseCharacter, BaseStoryArc, BaseTeam};
use super::publishing::BaseUniverse;

/// A creator's credit on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credit {
    pub id: u64,
    pub creator: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Vec<GenericItem>,
}

/// Minimal series reference used by list views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicSeries {
    pub name: String,
    pub volume: u32,
    pub year_began: i32,
}

/// Series reference embedded in a full issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSeries {
    pub id: u64,
    pub name: String,
    pub sort_name: String,
    pub volume: u32,
    pub series_type: GenericItem,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<GenericItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reprint {
    pub id: u64,
    pub issue: String,
}

/// A variant cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub upc: Option<String>,
    pub image: String,
}

/// List-view issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseIssue {
    pub id: u64,
    pub series: BasicSeries,
    pub number: String,
    #[serde(rename = "issue")]
    pub issue_name: String,
    pub cover_date: NaiveDate,
    #[serde(default)]
    pub store_date: Option<NaiveDate>,
    pub image: Option<String>,
    pub cover_hash: Option<String>,
    pub modified: DateTime<FixedOffset>,
}

/// Full issue record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub publisher: GenericItem,
    #[serde(default)]
    pub imprint: Option<GenericItem>,
    pub series: IssueSeries,
    pub number: String,
    #[serde(default)]
    pub alt_number: Option<String>,
    #[serde(rename = "title", default, deserialize_with = "null_as_default")]
    pub collection_title: String,
    #[serde(rename = "name", default, deserialize_with = "null_as_default")]
    pub story_titles: Vec<String>,
    pub cover_date: NaiveDate,
    pub store_date: Option<NaiveDate>,
    #[serde(default)]
    pub foc_date: Option<NaiveDate>,
    pub price: Option<String>,
    pub rating: GenericItem,
    pub sku: Option<String>,
    pub isbn: Option<String>,
    pub upc: Option<String>,
    #[serde(rename = "page")]
    pub page_count: Option<u32>,
    pub desc: Option<String>,
    pub image: Option<String>,
    pub cover_hash: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arcs: Vec<BaseStoryArc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credits: Vec<Credit>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub characters: Vec<BaseCharacter>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<BaseTeam>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub universes: Vec<BaseUniverse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reprints: Vec<Reprint>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variants: Vec<Variant>,
    pub cv_id: Option<u64>,
    #[serde(default)]
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

impl Issue {
    /// Characters and teams appearing in the issue, by name.
    pub fn appearances(&self) -> impl Iterator<Item = &BaseResource> {
        self.characters.iter().chain(self.teams.iter())
    }
}

/// Issue create/update payload. Related objects are referenced by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssuePost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_number: Option<String>,
    #[serde(rename = "title", skip_serializing_if = "Option::is_none")]
    pub collection_title: Option<String>,
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub story_titles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foc_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(rename = "page", skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arcs: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub characters: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub universes: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprints: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcd_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuePostResponse {
    pub id: u64,
    pub series: u64,
    pub number: String,
    #[serde(rename = "title", default, deserialize_with = "null_as_default")]
    pub collection_title: String,
    #[serde(rename = "name", default, deserialize_with = "null_as_default")]
    pub story_titles: Vec<String>,
    pub cover_date: NaiveDate,
    #[serde(default)]
    pub store_date: Option<NaiveDate>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub rating: Option<u64>,
    #[serde(rename = "page", default)]
    pub page_count: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub arcs: Vec<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub characters: Vec<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub universes: Vec<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reprints: Vec<u64>,
    #[serde(default)]
    pub cv_id: Option<u64>,
    #[serde(default)]
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

/// Credit payload; `credits_post` sends a list of these in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPost {
    pub issue: u64,
    pub creator: u64,
    pub role: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditPostResponse {
    pub id: u64,
    pub issue: u64,
    pub creator: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: Vec<u64>,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPost {
    pub issue: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPostResponse {
    pub id: u64,
    pub issue: u64,
    pub name: Option<String>,
    pub sku: Option<String>,
    pub upc: Option<String>,
    pub image: String,
}
