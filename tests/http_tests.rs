//! HTTP 传输层测试

use httpmock::Method::GET;
use httpmock::MockServer;
use pokedex::infrastructure::config::Config;
use pokedex::infrastructure::network::http::{HttpFetcher, ACCEPT_HEADER};
use pokedex::{Fetcher, PokedexClient, PokedexError};
use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn config_for(server: &MockServer) -> Config {
    Config {
        base_url: server.url("/api/v2"),
        user_agent: "pokedex-test/1.0".to_string(),
        timeout_secs: 5,
        ..Config::default()
    }
}

#[tokio::test]
async fn test_fetch_sends_fixed_headers() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(GET)
            .path("/api/v2/pokemon/1/")
            .header("user-agent", "pokedex-test/1.0")
            .header("accept", ACCEPT_HEADER);
        then.status(200).body("{\"id\": 1}");
    }).await;

    let fetcher = HttpFetcher::from_config(&config_for(&server)).unwrap();
    let body = fetcher
        .fetch(&server.url("/api/v2/pokemon/1/"))
        .await
        .unwrap();

    assert_eq!(&body[..], b"{\"id\": 1}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_is_remote_status_error() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(GET).path("/api/v2/pokemon/999/");
        then.status(404).body("Not Found");
    }).await;

    let fetcher = HttpFetcher::from_config(&config_for(&server)).unwrap();
    let url = server.url("/api/v2/pokemon/999/");
    let err = fetcher.fetch(&url).await.unwrap_err();

    match err {
        PokedexError::RemoteStatus { code, url: failed } => {
            assert_eq!(code, 404);
            assert_eq!(failed, url);
        }
        other => panic!("expected status error, got {:?}", other),
    }
    // No retries.
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_connection_failure_is_remote_unavailable() {
    if !can_bind_localhost() {
        return;
    }
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let fetcher = HttpFetcher::from_config(&Config::default()).unwrap();
    let err = fetcher
        .fetch(&format!("http://127.0.0.1:{}/api/v2/pokedex/kanto/", port))
        .await
        .unwrap_err();

    assert!(matches!(err, PokedexError::RemoteUnavailable { .. }));
}

#[tokio::test]
async fn test_slow_response_times_out_as_remote_unavailable() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(GET).path("/api/v2/pokemon/1/");
        then.status(200)
            .delay(Duration::from_secs(3))
            .body("{\"id\": 1}");
    }).await;

    let config = Config {
        timeout_secs: 1,
        ..config_for(&server)
    };
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let started = Instant::now();
    let err = fetcher
        .fetch(&server.url("/api/v2/pokemon/1/"))
        .await
        .unwrap_err();

    match err {
        PokedexError::RemoteUnavailable { reason } => assert!(reason.contains("timed out")),
        other => panic!("expected timeout, got {:?}", other),
    }
    assert!(started.elapsed() < Duration::from_secs(3));
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_client_end_to_end_over_http() {
    if !can_bind_localhost() {
        return;
    }
    let server = MockServer::start_async().await;
    let listing = server.mock_async(|when, then| {
        when.method(GET).path("/api/v2/pokedex/kanto/");
        then.status(200).json_body(json!({
            "pokemon_entries": [
                {"entry_number": 2, "pokemon_species": {"name": "ivysaur"}},
                {"entry_number": 1, "pokemon_species": {"name": "bulbasaur"}}
            ]
        }));
    }).await;
    let entity = server.mock_async(|when, then| {
        when.method(GET).path("/api/v2/pokemon/1/");
        then.status(200).json_body(json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "types": [{"type": {"name": "grass"}}],
            "abilities": [],
            "stats": [],
            "sprites": {"front_default": null},
            "cries": {}
        }));
    }).await;
    let species = server.mock_async(|when, then| {
        when.method(GET).path("/api/v2/pokemon-species/1/");
        then.status(200).json_body(json!({
            "genera": [],
            "flavor_text_entries": [
                {"flavor_text": "X", "language": {"name": "fr"}, "version": {"name": "red"}}
            ]
        }));
    }).await;

    let config = config_for(&server);
    let fetcher = HttpFetcher::from_config(&config).unwrap();
    let client = PokedexClient::new(Arc::new(fetcher), &config);

    let roster = client.get_roster().await.unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].name, "Bulbasaur");

    let detail = client.get_detail(1).await.unwrap();
    assert_eq!(detail.flavor_text, "No Pokédex entry found.");
    assert_eq!(detail.genus, "Unknown Pokémon");
    assert_eq!(detail.image_url, None);
    assert_eq!(detail.cry_url, None);

    client.get_roster().await.unwrap();
    client.get_detail(1).await.unwrap();

    listing.assert_hits_async(1).await;
    entity.assert_hits_async(1).await;
    species.assert_hits_async(1).await;
}
