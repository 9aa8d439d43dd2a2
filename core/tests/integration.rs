//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port with a small page size,
//! then drives `MetronClient` over real HTTP through `UreqTransport`. This
//! checks the pieces the unit tests script away: URL layout, basic auth,
//! following absolute `next` links, and the SQLite cache on disk.

use std::time::Duration;

use metron_core::{
    ApiError, ClientConfig, Endpoint, Error, HttpRequest, HttpResponse, MetronClient,
    QueryParams, SqliteCache, Transport, TransportError, UreqTransport,
};
use metron_core::types::CreatorPost;
use mock_server::MockConfig;

/// Start the mock server on a random port and return its base URL.
fn spawn_server(page_size: usize) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let config = MockConfig {
        page_size,
        ..MockConfig::default()
    };
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, config).await
        })
    });

    format!("http://{addr}")
}

fn config(base_url: &str, password: &str) -> ClientConfig {
    ClientConfig::new(Some("metron"), Some(password))
        .unwrap()
        .with_base_url(base_url)
        .with_user_agent("integration-tests/1.0")
}

fn client(base_url: &str) -> MetronClient {
    MetronClient::with_transport(
        config(base_url, "metron"),
        UreqTransport::new(Duration::from_secs(5)),
    )
}

/// Transport that never reaches the network.
struct Offline;

impl Transport for Offline {
    fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::Connection("offline".into()))
    }
}

#[test]
fn issues_list_follows_every_page() {
    let base = spawn_server(2);
    let issues = client(&base).issues_list(&QueryParams::new()).unwrap();

    let numbers: Vec<&str> = issues.iter().map(|i| i.number.as_str()).collect();
    assert_eq!(numbers, vec!["1", "2", "3"]);
    assert_eq!(issues[0].issue_name, "Fantastic Four (1961) #1");
}

#[test]
fn list_filters_are_sent_as_query() {
    let base = spawn_server(2);
    let params = QueryParams::new().with("name", "kirby");
    let creators = client(&base).creators_list(&params).unwrap();

    assert_eq!(creators.len(), 1);
    assert_eq!(creators[0].name, "Jack Kirby");
}

#[test]
fn default_client_uses_rate_limited_transport() {
    let base = spawn_server(100);
    let roles = MetronClient::new(config(&base, "metron"))
        .role_list(&QueryParams::new())
        .unwrap();

    assert_eq!(roles.len(), 3);
}

#[test]
fn detail_resources_deserialize() {
    let base = spawn_server(100);
    let c = client(&base);

    let issue = c.issue(1).unwrap();
    assert_eq!(issue.story_titles, vec!["The Fantastic Four!".to_string()]);
    assert_eq!(issue.collection_title, "");
    assert_eq!(issue.credits.len(), 2);

    let series = c.series(1).unwrap();
    assert_eq!(series.year_end, Some(1996));

    let reading_list = c.reading_list(1).unwrap();
    assert_eq!(reading_list.user.username, "metron");
    let items = c.reading_list_items(1).unwrap();
    assert_eq!(items[0].order, Some(1));

    let character = c.character(2).unwrap();
    assert!(character.creators.is_empty());
    let appearances = c.character_issues_list(1).unwrap();
    assert_eq!(appearances.len(), 1);

    let stats = c.collection_stats().unwrap();
    assert_eq!(stats.total_value, "0.00");
}

#[test]
fn missing_resource_is_detail_error() {
    let base = spawn_server(100);
    let err = client(&base).creator(999).unwrap_err();

    match err {
        Error::Api(ApiError::Detail { status, detail }) => {
            assert_eq!(status, 404);
            assert_eq!(detail, "Not found.");
        }
        other => panic!("expected detail error, got {other:?}"),
    }
}

#[test]
fn detail_with_ok_status_is_still_an_error() {
    let base = spawn_server(100);
    let err = client(&base)
        .pipeline()
        .fetch_single(&Endpoint::new("maintenance"), &QueryParams::new())
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Api(ApiError::Detail { status: 200, .. })
    ));
}

#[test]
fn wrong_password_is_rejected() {
    let base = spawn_server(100);
    let c = MetronClient::with_transport(
        config(&base, "wrong"),
        UreqTransport::new(Duration::from_secs(5)),
    );
    let err = c.publisher(1).unwrap_err();

    assert!(matches!(
        err,
        Error::Api(ApiError::Detail { status: 401, .. })
    ));
}

#[test]
fn create_and_patch_round_trip() {
    let base = spawn_server(100);
    let c = client(&base);

    let created = c
        .creator_post(&CreatorPost {
            name: Some("Jim Steranko".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(created.id, 4);

    let patched = c
        .creator_patch(
            created.id,
            &CreatorPost {
                desc: Some("Nick Fury, Agent of S.H.I.E.L.D.".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(patched.name, "Jim Steranko");
    assert_eq!(patched.desc.as_deref(), Some("Nick Fury, Agent of S.H.I.E.L.D."));
}

#[test]
fn field_errors_are_http_errors() {
    let base = spawn_server(100);
    let err = client(&base)
        .creator_post(&CreatorPost::default())
        .unwrap_err();

    match err {
        Error::Api(ApiError::Http { status, body }) => {
            assert_eq!(status, 400);
            assert!(body.contains("name"));
        }
        other => panic!("expected http error, got {other:?}"),
    }
}

#[test]
fn unreachable_server_is_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .creator(1)
        .unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Connection { .. })));
}

#[test]
fn body_over_limit_is_connection_error() {
    let base = spawn_server(100);
    let c = MetronClient::with_transport(
        config(&base, "metron"),
        UreqTransport::new(Duration::from_secs(5)).with_body_limit(16),
    );
    let err = c.series(1).unwrap_err();

    match err {
        Error::Api(ApiError::Connection { source, .. }) => {
            assert!(matches!(source, TransportError::Body(_)), "got: {source:?}");
        }
        other => panic!("expected connection error, got {other:?}"),
    }
}

#[test]
fn sqlite_cache_serves_later_clients_offline() {
    let base = spawn_server(2);
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("metron_cache.db");

    let online = client(&base).with_cache(SqliteCache::open(&db, Some(7)).unwrap());
    let first = online.issues_list(&QueryParams::new()).unwrap();
    let publisher = online.publisher(1).unwrap();
    drop(online);

    let offline = MetronClient::with_transport(config(&base, "metron"), Offline)
        .with_cache(SqliteCache::open(&db, Some(7)).unwrap());
    let second = offline.issues_list(&QueryParams::new()).unwrap();
    assert_eq!(first, second);
    assert_eq!(offline.publisher(1).unwrap(), publisher);

    // Never fetched, so the offline client has to hit the transport.
    let err = offline.creator(1).unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Connection { .. })));
}
