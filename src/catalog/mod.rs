//! Catalog model and JSON codec.
//!
//! The document is a bare array of game records. Loading checks every record
//! against the declared schema (see [schema]) and then decodes it into typed
//! structs; saving writes the same shape back through a temporary file.

mod asset;
mod codec;
mod game;
mod presence;
pub mod schema;
mod tags;

use serde::Serialize;

pub use asset::{
    AltColors, AltSound, Asset, AssetKind, B2s, GameRef, MediaPack, Pov, PupPack, Resource, Rom,
    Rules, Table, Topper, Tutorial, WheelArt,
};
pub use codec::{
    from_reader, load, parse, save, temp_path_for, to_string, write_atomically, write_document,
    LoadError, OutputFormat, PersistenceError,
};
pub use game::Game;
pub use presence::Presence;
pub use schema::{SchemaViolation, Violation};
pub use tags::TagSet;

pub const DEFAULT_DATABASE_PATH: &str = "db/vpsdb.json";

/// Every game of the document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    pub games: Vec<Game>,
}

impl Catalog {
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }

    pub fn asset_count(&self) -> usize {
        self.games.iter().map(|game| game.assets().len()).sum()
    }

    pub fn find_game(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|game| game.id == id)
    }
}
