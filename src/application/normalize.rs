//! Wire shapes for the three PokéAPI resources and their normalization into
//! [`RosterEntry`] and [`RecordDetail`].
//!
//! Every field the service may omit is optional here; absence resolves to a
//! documented fallback instead of an error.

use crate::domain::model::{
    RecordDetail, RosterEntry, FIRST_ENTRY, LAST_ENTRY, NO_FLAVOR_TEXT, UNKNOWN_GENUS,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

const PREFERRED_VERSIONS: [&str; 2] = ["red", "blue"];
const ENGLISH: &str = "en";

#[derive(Deserialize, Debug, Default)]
pub struct NamedRef {
    #[serde(default)]
    pub name: String,
}

// GET /pokedex/kanto/
#[derive(Deserialize, Debug, Default)]
pub struct RegionalListing {
    #[serde(default)]
    pub pokemon_entries: Vec<ListingRow>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ListingRow {
    #[serde(default)]
    pub entry_number: Value,
    #[serde(default)]
    pub pokemon_species: Option<NamedRef>,
}

// GET /pokemon/{id}/
#[derive(Deserialize, Debug, Default)]
pub struct EntityResource {
    pub id: Option<u32>,
    #[serde(default)]
    pub name: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub stats: Vec<StatRow>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub cries: Cries,
}

#[derive(Deserialize, Debug, Default)]
pub struct TypeSlot {
    #[serde(rename = "type", default)]
    pub kind: NamedRef,
}

#[derive(Deserialize, Debug, Default)]
pub struct AbilitySlot {
    #[serde(default)]
    pub ability: NamedRef,
}

#[derive(Deserialize, Debug, Default)]
pub struct StatRow {
    #[serde(default)]
    pub base_stat: i64,
    #[serde(default)]
    pub stat: NamedRef,
}

#[derive(Deserialize, Debug, Default)]
pub struct Sprites {
    pub front_default: Option<String>,
    #[serde(default)]
    pub versions: Value,
}

#[derive(Deserialize, Debug, Default)]
pub struct Cries {
    pub legacy: Option<String>,
    pub latest: Option<String>,
}

// GET /pokemon-species/{id}/
#[derive(Deserialize, Debug, Default)]
pub struct SpeciesResource {
    #[serde(default)]
    pub genera: Vec<Genus>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Genus {
    #[serde(default)]
    pub genus: String,
    #[serde(default)]
    pub language: NamedRef,
}

#[derive(Deserialize, Debug, Default)]
pub struct FlavorTextEntry {
    pub flavor_text: Option<String>,
    #[serde(default)]
    pub language: NamedRef,
    #[serde(default)]
    pub version: NamedRef,
}

/// Capitalize the first letter of each whitespace-separated word and
/// lowercase the rest.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"mr-mime"` -> `"Mr Mime"`
pub fn display_name(api_name: &str) -> String {
    title_case(&api_name.replace('-', " "))
}

/// Collapse newlines, form feeds and whitespace runs into single spaces.
pub fn clean_flavor_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// English red, then English blue, then any English entry, then the fallback.
pub fn pick_flavor_text(entries: &[FlavorTextEntry]) -> String {
    let english = || entries.iter().filter(|e| e.language.name == ENGLISH);

    let chosen = PREFERRED_VERSIONS
        .iter()
        .find_map(|version| english().find(|e| e.version.name == *version))
        .or_else(|| english().next());

    match chosen {
        Some(entry) => entry
            .flavor_text
            .as_deref()
            .map(clean_flavor_text)
            .unwrap_or_else(|| NO_FLAVOR_TEXT.to_string()),
        None => NO_FLAVOR_TEXT.to_string(),
    }
}

pub fn pick_genus(genera: &[Genus]) -> String {
    genera
        .iter()
        .find(|g| g.language.name == ENGLISH)
        .map(|g| g.genus.clone())
        .unwrap_or_else(|| UNKNOWN_GENUS.to_string())
}

fn non_empty(url: Option<&str>) -> Option<String> {
    url.filter(|u| !u.is_empty()).map(str::to_string)
}

/// Generation I red/blue front sprite, else the default front sprite.
pub fn pick_sprite_url(sprites: &Sprites) -> Option<String> {
    let red_blue = sprites
        .versions
        .pointer("/generation-i/red-blue/front_default")
        .and_then(Value::as_str);

    non_empty(red_blue).or_else(|| non_empty(sprites.front_default.as_deref()))
}

pub fn pick_cry_url(cries: &Cries) -> Option<String> {
    non_empty(cries.legacy.as_deref()).or_else(|| non_empty(cries.latest.as_deref()))
}

/// Keep rows numbered 1..=151, sorted ascending, first occurrence of each id.
pub fn build_roster(listing: RegionalListing) -> Vec<RosterEntry> {
    let mut roster: Vec<RosterEntry> = listing
        .pokemon_entries
        .into_iter()
        .filter_map(|row| {
            let number = row.entry_number.as_u64()?;
            let id = u32::try_from(number).ok()?;
            if !(FIRST_ENTRY..=LAST_ENTRY).contains(&id) {
                return None;
            }
            let api_name = row
                .pokemon_species
                .map(|s| s.name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "unknown".to_string());
            Some(RosterEntry {
                id,
                name: display_name(&api_name),
                api_name,
            })
        })
        .collect();

    roster.sort_by_key(|entry| entry.id);
    roster.dedup_by_key(|entry| entry.id);
    roster
}

/// Merge the entity and species resources for `requested_id`.
pub fn build_detail(
    requested_id: u32,
    entity: EntityResource,
    species: SpeciesResource,
) -> RecordDetail {
    let types = entity
        .types
        .iter()
        .map(|slot| display_name(&slot.kind.name))
        .collect();
    let abilities = entity
        .abilities
        .iter()
        .map(|slot| display_name(&slot.ability.name))
        .collect();
    let stats: HashMap<String, i64> = entity
        .stats
        .iter()
        .map(|row| (display_name(&row.stat.name), row.base_stat))
        .collect();

    RecordDetail {
        id: entity.id.unwrap_or(requested_id),
        name: display_name(&entity.name),
        height_m: entity.height.unwrap_or(0.0) / 10.0,
        weight_kg: entity.weight.unwrap_or(0.0) / 10.0,
        types,
        abilities,
        stats,
        genus: pick_genus(&species.genera),
        flavor_text: pick_flavor_text(&species.flavor_text_entries),
        image_url: pick_sprite_url(&entity.sprites),
        cry_url: pick_cry_url(&entity.cries),
    }
}
