//! Typed Metron resources.
//!
//! # Design
//! Each struct mirrors what one endpoint returns. Unknown fields are ignored
//! so additions on the service side do not break deserialization; optional
//! and list fields default when absent or null. Post models serialize only
//! the fields that are set, which also makes them usable for PATCH.
//!
//! URLs are kept as strings and money as the decimal string the service
//! sends.

mod collection;
mod common;
mod issue;
mod people;
mod publishing;
mod reading_list;

pub use collection::{
    BookFormat, CollectionFormatStat, CollectionIssue, CollectionList, CollectionRead,
    CollectionStats, GradingCompany, MissingIssue, MissingSeries,
};
pub use common::{BaseResource, GenericItem, User};
pub use issue::{
    BaseIssue, BasicSeries, Credit, CreditPost, CreditPostResponse, Issue, IssuePost,
    IssuePostResponse, IssueSeries, Reprint, Variant, VariantPost, VariantPostResponse,
};
pub use people::{
    BaseCharacter, BaseCreator, BaseStoryArc, BaseTeam, Character, CharacterPost,
    CharacterPostResponse, Creator, CreatorPost, StoryArc, StoryArcPost, Team, TeamPost,
    TeamPostResponse,
};
pub use publishing::{
    AssociatedSeries, BasePublisher, BaseSeries, BaseUniverse, Imprint, Publisher, PublisherPost,
    Series, SeriesPost, SeriesPostResponse, Universe, UniversePost, UniversePostResponse,
};
pub use reading_list::{
    AttributionSource, ReadingListIssue, ReadingListItem, ReadingListList, ReadingListRead,
};

use serde::{Deserialize, Deserializer};

/// Treat a JSON `null` like a missing field for fields with a default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
