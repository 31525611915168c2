//! Shared fixtures: a counting in-memory transport and PokéAPI-shaped bodies.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use image::{ImageFormat, Rgba, RgbaImage};
use pokedex::infrastructure::config::Config;
use pokedex::{Fetcher, PokedexClient, PokedexError};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BASE: &str = "http://pokeapi.test/api/v2";

pub enum Route {
    Body(Bytes),
    Status(u16),
}

/// In-memory transport that records every request.
#[derive(Default)]
pub struct FakeFetcher {
    routes: Mutex<HashMap<String, Route>>,
    calls: AtomicUsize,
    per_url: Mutex<HashMap<String, usize>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(&self, url: impl Into<String>, body: Value) {
        self.raw(url, body.to_string());
    }

    pub fn raw(&self, url: impl Into<String>, body: impl Into<Bytes>) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.into(), Route::Body(body.into()));
    }

    pub fn status(&self, url: impl Into<String>, code: u16) {
        self.routes
            .lock()
            .unwrap()
            .insert(url.into(), Route::Status(code));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.per_url.lock().unwrap().get(url).copied().unwrap_or(0)
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, PokedexError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .per_url
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        match self.routes.lock().unwrap().get(url) {
            Some(Route::Body(body)) => Ok(body.clone()),
            Some(Route::Status(code)) => Err(PokedexError::RemoteStatus {
                code: *code,
                url: url.to_string(),
            }),
            None => Err(PokedexError::RemoteUnavailable {
                reason: format!("no route for {}", url),
            }),
        }
    }
}

pub fn test_config() -> Config {
    Config {
        base_url: BASE.to_string(),
        ..Config::default()
    }
}

pub fn client_with(fetcher: Arc<FakeFetcher>) -> PokedexClient {
    PokedexClient::new(fetcher, &test_config())
}

pub fn entity_url(id: u32) -> String {
    format!("{}/pokemon/{}/", BASE, id)
}

pub fn species_url(id: u32) -> String {
    format!("{}/pokemon-species/{}/", BASE, id)
}

pub fn listing_url() -> String {
    format!("{}/pokedex/kanto/", BASE)
}

pub fn sprite_url(id: u32) -> String {
    format!("http://sprites.test/red-blue/{}.png", id)
}

pub fn entity_body(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "types": [
            {"slot": 1, "type": {"name": "grass"}},
            {"slot": 2, "type": {"name": "poison"}}
        ],
        "abilities": [
            {"ability": {"name": "overgrow"}, "is_hidden": false, "slot": 1},
            {"ability": {"name": "chlorophyll"}, "is_hidden": true, "slot": 3}
        ],
        "stats": [
            {"base_stat": 45, "stat": {"name": "hp"}},
            {"base_stat": 49, "stat": {"name": "attack"}},
            {"base_stat": 49, "stat": {"name": "defense"}},
            {"base_stat": 65, "stat": {"name": "special-attack"}},
            {"base_stat": 65, "stat": {"name": "special-defense"}},
            {"base_stat": 45, "stat": {"name": "speed"}}
        ],
        "sprites": {
            "front_default": format!("http://sprites.test/default/{}.png", id),
            "versions": {
                "generation-i": {
                    "red-blue": {"front_default": sprite_url(id)}
                }
            }
        },
        "cries": {
            "latest": format!("http://cries.test/latest/{}.ogg", id),
            "legacy": format!("http://cries.test/legacy/{}.ogg", id)
        }
    })
}

pub fn species_body() -> Value {
    json!({
        "genera": [
            {"genus": "Pokémon Graine", "language": {"name": "fr"}},
            {"genus": "Seed Pokémon", "language": {"name": "en"}}
        ],
        "flavor_text_entries": [
            {"flavor_text": "C", "language": {"name": "en"}, "version": {"name": "blue"}},
            {"flavor_text": "A\nstrange\u{c}seed", "language": {"name": "en"}, "version": {"name": "red"}}
        ]
    })
}

/// Register entity, species and sprite routes for `id`.
pub fn register_entry(fetcher: &FakeFetcher, id: u32, name: &str) {
    fetcher.json(entity_url(id), entity_body(id, name));
    fetcher.json(species_url(id), species_body());
    fetcher.raw(sprite_url(id), sprite_png(56, 56));
}

pub fn listing_body(names: &[(u32, &str)]) -> Value {
    let rows: Vec<Value> = names
        .iter()
        .map(|(n, name)| {
            json!({
                "entry_number": n,
                "pokemon_species": {"name": name, "url": format!("{}/pokemon-species/{}/", BASE, n)}
            })
        })
        .collect();
    json!({"pokemon_entries": rows})
}

/// A real encoded PNG filled with one opaque color.
pub fn sprite_png(width: u32, height: u32) -> Vec<u8> {
    let pixels = RgbaImage::from_pixel(width, height, Rgba([120, 200, 80, 255]));
    let mut buf = Vec::new();
    pixels
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}
