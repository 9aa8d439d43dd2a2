//! A user's collection: owned issues, gaps, and totals.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::common::User;
use super::issue::BasicSeries;
use super::null_as_default;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookFormat {
    Print,
    Digital,
    Both,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GradingCompany {
    Cgc,
    Cbcs,
    Pgx,
}

/// Ungraded items carry an empty company string.
fn grading_company<'de, D>(deserializer: D) -> Result<Option<GradingCompany>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(other) => GradingCompany::deserialize(serde::de::value::StrDeserializer::<
            D::Error,
        >::new(other))
        .map(Some),
    }
}

/// Issue as embedded in a collection item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionIssue {
    pub id: u64,
    pub series: BasicSeries,
    pub number: String,
    pub cover_date: NaiveDate,
    #[serde(default)]
    pub store_date: Option<NaiveDate>,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionList {
    pub id: u64,
    pub user: User,
    pub issue: CollectionIssue,
    pub quantity: u16,
    pub book_format: BookFormat,
    /// CGC scale, 0.5 to 10.0.
    #[serde(default)]
    pub grade: Option<f64>,
    #[serde(default, deserialize_with = "grading_company")]
    pub grading_company: Option<GradingCompany>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    pub is_read: bool,
    /// Star rating, 1 to 5.
    #[serde(default)]
    pub rating: Option<u8>,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRead {
    pub id: u64,
    pub user: User,
    pub issue: CollectionIssue,
    pub quantity: u16,
    pub book_format: BookFormat,
    #[serde(default)]
    pub grade: Option<f64>,
    #[serde(default, deserialize_with = "grading_company")]
    pub grading_company: Option<GradingCompany>,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    /// Decimal string, e.g. `"3.99"`.
    #[serde(default)]
    pub purchase_price: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchase_store: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub storage_location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    pub is_read: bool,
    #[serde(default)]
    pub date_read: Option<NaiveDate>,
    #[serde(default)]
    pub rating: Option<u8>,
    pub resource_url: String,
    pub created_on: DateTime<FixedOffset>,
    pub modified: DateTime<FixedOffset>,
}

/// An issue of a collected series that the user does not own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingIssue {
    pub id: u64,
    pub series: BasicSeries,
    pub number: String,
    pub cover_date: NaiveDate,
    #[serde(default)]
    pub store_date: Option<NaiveDate>,
}

/// A series the user owns some, but not all, issues of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingSeries {
    pub id: u64,
    pub name: String,
    pub sort_name: String,
    pub year_began: i32,
    #[serde(default)]
    pub year_end: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionFormatStat {
    pub book_format: BookFormat,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_items: u64,
    pub total_quantity: u64,
    pub total_value: String,
    pub read_count: u64,
    pub unread_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub by_format: Vec<CollectionFormatStat>,
}
