//! Typed accessors over the request pipeline.
//!
//! # Design
//! `MetronClient` owns a [`RequestPipeline`] and adds only typing: each
//! accessor names an endpoint, picks single or paginated fetch, and
//! deserializes the JSON into the matching struct. A payload that does not
//! match its schema becomes [`ApiError::Validation`] naming the resource.
//!
//! The default transport is ureq wrapped in the service's rate limits
//! (30 calls per minute, 10,000 per day). Tests and embedders can swap in
//! any [`Transport`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStore;
use crate::config::ClientConfig;
use crate::endpoint::{Endpoint, QueryParams};
use crate::error::{ApiError, Result};
use crate::http::HttpMethod;
use crate::pipeline::RequestPipeline;
use crate::transport::{RateLimited, Transport, UreqTransport, METRON_RATE_LIMITS};
use crate::types::{
    BaseCharacter, BaseCreator, BaseIssue, BasePublisher, BaseResource, BaseSeries, BaseStoryArc,
    BaseTeam, BaseUniverse, Character, CharacterPost, CharacterPostResponse, CollectionList,
    CollectionRead, CollectionStats, Creator, CreatorPost, CreditPost, CreditPostResponse,
    GenericItem, Imprint, Issue, IssuePost, IssuePostResponse, MissingIssue, MissingSeries,
    Publisher, PublisherPost, ReadingListItem, ReadingListList, ReadingListRead, Series,
    SeriesPost, SeriesPostResponse, StoryArc, StoryArcPost, Team, TeamPost, TeamPostResponse,
    Universe, UniversePost, UniversePostResponse, VariantPost, VariantPostResponse,
};

/// Client for the Metron comic metadata API.
pub struct MetronClient {
    pipeline: RequestPipeline,
}

impl MetronClient {
    /// Client with the rate-limited ureq transport and no cache.
    pub fn new(config: ClientConfig) -> Self {
        let transport = RateLimited::new(UreqTransport::new(config.timeout()), &METRON_RATE_LIMITS);
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            pipeline: RequestPipeline::new(Arc::new(config), Box::new(transport)),
        }
    }

    pub fn with_cache(self, cache: impl CacheStore + 'static) -> Self {
        Self {
            pipeline: self.pipeline.with_cache(Box::new(cache)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.pipeline.config()
    }

    pub fn pipeline(&self) -> &RequestPipeline {
        &self.pipeline
    }

    // Creators

    pub fn creator(&self, id: u64) -> Result<Creator> {
        self.get_one("creator", id)
    }

    pub fn creators_list(&self, params: &QueryParams) -> Result<Vec<BaseCreator>> {
        self.get_list(&Endpoint::new("creator"), params, "creator")
    }

    pub fn creator_post(&self, data: &CreatorPost) -> Result<Creator> {
        self.create("creator", data)
    }

    pub fn creator_patch(&self, id: u64, data: &CreatorPost) -> Result<Creator> {
        self.update("creator", id, data)
    }

    // Characters

    pub fn character(&self, id: u64) -> Result<Character> {
        self.get_one("character", id)
    }

    pub fn characters_list(&self, params: &QueryParams) -> Result<Vec<BaseCharacter>> {
        self.get_list(&Endpoint::new("character"), params, "character")
    }

    /// Issues a character appears in.
    pub fn character_issues_list(&self, id: u64) -> Result<Vec<BaseIssue>> {
        self.issue_list("character", id)
    }

    pub fn character_post(&self, data: &CharacterPost) -> Result<CharacterPostResponse> {
        self.create("character", data)
    }

    pub fn character_patch(&self, id: u64, data: &CharacterPost) -> Result<CharacterPostResponse> {
        self.update("character", id, data)
    }

    // Publishers and imprints

    pub fn publisher(&self, id: u64) -> Result<Publisher> {
        self.get_one("publisher", id)
    }

    pub fn publishers_list(&self, params: &QueryParams) -> Result<Vec<BasePublisher>> {
        self.get_list(&Endpoint::new("publisher"), params, "publisher")
    }

    pub fn publisher_post(&self, data: &PublisherPost) -> Result<Publisher> {
        self.create("publisher", data)
    }

    pub fn publisher_patch(&self, id: u64, data: &PublisherPost) -> Result<Publisher> {
        self.update("publisher", id, data)
    }

    pub fn imprint(&self, id: u64) -> Result<Imprint> {
        self.get_one("imprint", id)
    }

    pub fn imprints_list(&self, params: &QueryParams) -> Result<Vec<BaseResource>> {
        self.get_list(&Endpoint::new("imprint"), params, "imprint")
    }

    // Teams

    pub fn team(&self, id: u64) -> Result<Team> {
        self.get_one("team", id)
    }

    pub fn teams_list(&self, params: &QueryParams) -> Result<Vec<BaseTeam>> {
        self.get_list(&Endpoint::new("team"), params, "team")
    }

    pub fn team_issues_list(&self, id: u64) -> Result<Vec<BaseIssue>> {
        self.issue_list("team", id)
    }

    pub fn team_post(&self, data: &TeamPost) -> Result<TeamPostResponse> {
        self.create("team", data)
    }

    pub fn team_patch(&self, id: u64, data: &TeamPost) -> Result<TeamPostResponse> {
        self.update("team", id, data)
    }

    // Story arcs

    pub fn arc(&self, id: u64) -> Result<StoryArc> {
        self.get_one("arc", id)
    }

    pub fn arcs_list(&self, params: &QueryParams) -> Result<Vec<BaseStoryArc>> {
        self.get_list(&Endpoint::new("arc"), params, "arc")
    }

    pub fn arc_issues_list(&self, id: u64) -> Result<Vec<BaseIssue>> {
        self.issue_list("arc", id)
    }

    pub fn arc_post(&self, data: &StoryArcPost) -> Result<StoryArc> {
        self.create("arc", data)
    }

    pub fn arc_patch(&self, id: u64, data: &StoryArcPost) -> Result<StoryArc> {
        self.update("arc", id, data)
    }

    // Series

    pub fn series(&self, id: u64) -> Result<Series> {
        self.get_one("series", id)
    }

    pub fn series_list(&self, params: &QueryParams) -> Result<Vec<BaseSeries>> {
        self.get_list(&Endpoint::new("series"), params, "series")
    }

    pub fn series_type_list(&self, params: &QueryParams) -> Result<Vec<GenericItem>> {
        self.get_list(&Endpoint::new("series_type"), params, "series_type")
    }

    pub fn series_post(&self, data: &SeriesPost) -> Result<SeriesPostResponse> {
        self.create("series", data)
    }

    pub fn series_patch(&self, id: u64, data: &SeriesPost) -> Result<SeriesPostResponse> {
        self.update("series", id, data)
    }

    // Issues

    pub fn issue(&self, id: u64) -> Result<Issue> {
        self.get_one("issue", id)
    }

    pub fn issues_list(&self, params: &QueryParams) -> Result<Vec<BaseIssue>> {
        self.get_list(&Endpoint::new("issue"), params, "issue")
    }

    pub fn issue_post(&self, data: &IssuePost) -> Result<IssuePostResponse> {
        self.create("issue", data)
    }

    pub fn issue_patch(&self, id: u64, data: &IssuePost) -> Result<IssuePostResponse> {
        self.update("issue", id, data)
    }

    /// Adds several credits in one request.
    pub fn credits_post(&self, data: &[CreditPost]) -> Result<Vec<CreditPostResponse>> {
        self.create("credit", data)
    }

    pub fn variant_post(&self, data: &VariantPost) -> Result<VariantPostResponse> {
        self.create("variant", data)
    }

    pub fn role_list(&self, params: &QueryParams) -> Result<Vec<GenericItem>> {
        self.get_list(&Endpoint::new("role"), params, "role")
    }

    // Universes

    pub fn universe(&self, id: u64) -> Result<Universe> {
        self.get_one("universe", id)
    }

    pub fn universes_list(&self, params: &QueryParams) -> Result<Vec<BaseUniverse>> {
        self.get_list(&Endpoint::new("universe"), params, "universe")
    }

    pub fn universe_post(&self, data: &UniversePost) -> Result<UniversePostResponse> {
        self.create("universe", data)
    }

    pub fn universe_patch(&self, id: u64, data: &UniversePost) -> Result<UniversePostResponse> {
        self.update("universe", id, data)
    }

    // Reading lists

    pub fn reading_list(&self, id: u64) -> Result<ReadingListRead> {
        self.get_one("reading_list", id)
    }

    pub fn reading_lists_list(&self, params: &QueryParams) -> Result<Vec<ReadingListList>> {
        self.get_list(&Endpoint::new("reading_list"), params, "reading_list")
    }

    /// Every item of a reading list, across all pages.
    pub fn reading_list_items(&self, id: u64) -> Result<Vec<ReadingListItem>> {
        let endpoint = Endpoint::new("reading_list").id(id).then("items");
        self.get_list(&endpoint, &QueryParams::new(), "reading_list_item")
    }

    // Collection (scoped to the authenticated user)

    pub fn collection(&self, id: u64) -> Result<CollectionRead> {
        self.get_one("collection", id)
    }

    pub fn collections_list(&self, params: &QueryParams) -> Result<Vec<CollectionList>> {
        self.get_list(&Endpoint::new("collection"), params, "collection")
    }

    /// Issues of `series_id` that are not in the collection.
    pub fn collection_missing_issues(&self, series_id: u64) -> Result<Vec<MissingIssue>> {
        let endpoint = Endpoint::new("collection")
            .then("missing_issues")
            .id(series_id);
        self.get_list(&endpoint, &QueryParams::new(), "missing_issue")
    }

    pub fn collection_missing_series(&self, params: &QueryParams) -> Result<Vec<MissingSeries>> {
        let endpoint = Endpoint::new("collection").then("missing_series");
        self.get_list(&endpoint, params, "missing_series")
    }

    pub fn collection_stats(&self) -> Result<CollectionStats> {
        let endpoint = Endpoint::new("collection").then("stats");
        let data = self.pipeline.fetch_single(&endpoint, &QueryParams::new())?;
        validate("collection_stats", data)
    }

    fn get_one<T: DeserializeOwned>(&self, resource: &'static str, id: u64) -> Result<T> {
        let data = self
            .pipeline
            .fetch_single(&Endpoint::new(resource).id(id), &QueryParams::new())?;
        validate(resource, data)
    }

    fn get_list<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &QueryParams,
        resource: &'static str,
    ) -> Result<Vec<T>> {
        let mut data = self.pipeline.fetch_paginated(endpoint, params)?;
        let results = data
            .get_mut("results")
            .map(Value::take)
            .unwrap_or_else(|| Value::Array(Vec::new()));
        validate(resource, results)
    }

    fn issue_list(&self, resource: &'static str, id: u64) -> Result<Vec<BaseIssue>> {
        let endpoint = Endpoint::new(resource).id(id).then("issue_list");
        self.get_list(&endpoint, &QueryParams::new(), "issue")
    }

    fn create<B, T>(&self, resource: &'static str, data: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .pipeline
            .send(HttpMethod::Post, &Endpoint::new(resource), data)?;
        validate(resource, response)
    }

    fn update<B, T>(&self, resource: &'static str, id: u64, data: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .pipeline
            .send(HttpMethod::Patch, &Endpoint::new(resource).id(id), data)?;
        validate(resource, response)
    }
}

fn validate<T: DeserializeOwned>(resource: &'static str, data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|source| ApiError::Validation { resource, source }.into())
}
