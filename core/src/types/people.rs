//! Creators, characters, teams, and story arcs.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use super::common::BaseResource;
use super::null_as_default;
use super::publishing::BaseUniverse;

pub type BaseCreator = BaseResource;
pub type BaseCharacter = BaseResource;
pub type BaseTeam = BaseResource;
pub type BaseStoryArc = BaseResource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub birth: Option<NaiveDate>,
    #[serde(default)]
    pub death: Option<NaiveDate>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub alias: Option<Vec<String>>,
    #[serde(default)]
    pub cv_id: Option<u64>,
    #[serde(default)]
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub alias: Option<Vec<String>>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creators: Vec<BaseCreator>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<BaseTeam>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub universes: Vec<BaseUniverse>,
    #[serde(default)]
    pub cv_id: Option<u64>,
    #[serde(default)]
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creators: Vec<BaseCreator>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub universes: Vec<BaseUniverse>,
    #[serde(default)]
    pub cv_id: Option<u64>,
    #[serde(default)]
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

/// A story arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryArc {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cv_id: Option<u64>,
    #[serde(default)]
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatorPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub death: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcd_id: Option<u64>,
}

/// Characters reference creators, teams, and universes by id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creators: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub universes: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcd_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterPostResponse {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub alias: Option<Vec<String>>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creators: Vec<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teams: Vec<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub universes: Vec<u64>,
    #[serde(default)]
    pub cv_id: Option<u64>,
    #[serde(default)]
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creators: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub universes: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcd_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPostResponse {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub creators: Vec<u64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub universes: Vec<u64>,
    #[serde(default)]
    pub cv_id: Option<u64>,
    #[serde(default)]
    pub gcd_id: Option<u64>,
    pub resource_url: String,
    pub modified: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryArcPost {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gcd_id: Option<u64>,
}
