//! Reading lists and their items.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::common::User;
use super::issue::BasicSeries;

/// Where a reading list's order was sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttributionSource {
    /// Comic Book Reading Orders
    Cbro,
    /// Complete Marvel Reading Orders
    Cmro,
    /// Comic Book Herald
    Cbh,
    /// Comic Book Treasury
    Cbt,
    /// Marvel Guides
    Mg,
    /// How To Love Comics
    Htlc,
    /// League of Comic Geeks
    Locg,
    Other,
}

/// The service sends `""` for "no attribution".
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<AttributionSource>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("") => Ok(None),
        Some(other) => AttributionSource::deserialize(serde::de::value::StrDeserializer::<
            D::Error,
        >::new(other))
        .map(Some),
    }
}

/// Issue as embedded in a reading list item; has no image or cover hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingListIssue {
    pub id: u64,
    pub series: BasicSeries,
    pub number: String,
    pub cover_date: NaiveDate,
    #[serde(default)]
    pub store_date: Option<NaiveDate>,
    #[serde(default)]
    pub cv_id: Option<u64>,
    #[serde(default)]
    pub gcd_id: Option<u64>,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingListItem {
    pub id: u64,
    pub issue: ReadingListIssue,
    /// Position in the list, when the list is ordered.
    #[serde(default)]
    pub order: Option<u32>,
    pub issue_type: String,
}

/// Reading list as it appears in list views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingListList {
    pub id: u64,
    pub name: String,
    pub slug: String,
    pub user: User,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub attribution_source: Option<AttributionSource>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    pub rating_count: u32,
    pub modified: DateTime<FixedOffset>,
}

/// Reading list detail. Items are fetched separately from `items_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingListRead {
    pub id: u64,
    pub user: User,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub is_private: bool,
    pub attribution_source: String,
    #[serde(default)]
    pub attribution_url: Option<String>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    pub rating_count: u32,
    pub items_url: String,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn list_json(source: serde_json::Value) -> serde_json::Value {
        json!({
            "id": 1,
            "name": "Civil War",
            "slug": "civil-war",
            "user": {"id": 2, "username": "bpepple"},
            "attribution_source": source,
            "rating_count": 0,
            "modified": "2024-03-01T10:00:00Z"
        })
    }

    #[test]
    fn empty_attribution_source_is_none() {
        let list: ReadingListList = serde_json::from_value(list_json(json!(""))).unwrap();
        assert_eq!(list.attribution_source, None);
        assert!(!list.is_private);
    }

    #[test]
    fn attribution_source_parses_known_values() {
        let list: ReadingListList = serde_json::from_value(list_json(json!("CMRO"))).unwrap();
        assert_eq!(list.attribution_source, Some(AttributionSource::Cmro));
    }

    #[test]
    fn unknown_attribution_source_is_rejected() {
        let result = serde_json::from_value::<ReadingListList>(list_json(json!("XYZ")));
        assert!(result.is_err());
    }

    #[test]
    fn item_order_is_optional() {
        let item: ReadingListItem = serde_json::from_value(json!({
            "id": 10,
            "issue": {
                "id": 5,
                "series": {"name": "Civil War", "volume": 1, "year_began": 2006},
                "number": "1",
                "cover_date": "2006-07-01",
                "modified": "2024-03-01T10:00:00Z"
            },
            "issue_type": "Core Issue"
        }))
        .unwrap();
        assert_eq!(item.order, None);
        assert_eq!(item.issue.series.name, "Civil War");
    }
}
