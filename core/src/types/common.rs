use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Id and name, used for roles, series types, genres, ratings, and nested
/// references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericItem {
    pub id: u64,
    pub name: String,
}

/// The list-view shape shared by most resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseResource {
    pub id: u64,
    pub name: String,
    pub modified: DateTime<FixedOffset>,
}

/// Owner of a reading list or collection item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
}
