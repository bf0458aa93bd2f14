use serde::{Deserialize, Serialize};

use super::asset::{
    AltColors, AltSound, Asset, B2s, GameRef, MediaPack, Pov, PupPack, Rom, Rules, Table,
    Topper, Tutorial, WheelArt,
};
use super::presence::Presence;
use super::tags::TagSet;

/// Top-level catalog record for one pinball machine. Owns every asset
/// collection; assets only point back through a copied [`GameRef`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Game {
    pub id: String,
    pub updated_at: i64,
    pub manufacturer: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub broken: Presence<bool>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub image_url: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub category: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub img_url: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub mpu: Presence<String>,
    #[serde(rename = "MPU", default, skip_serializing_if = "Presence::is_absent")]
    pub mpu_legacy: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub year: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub theme: Presence<TagSet>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub designers: Presence<TagSet>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub features: Presence<TagSet>,
    #[serde(rename = "type", default, skip_serializing_if = "Presence::is_absent")]
    pub machine_type: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub players: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub ipdb_url: Presence<String>,
    pub last_created_at: i64,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub table_files: Presence<Vec<Table>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub b2s_files: Presence<Vec<B2s>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub topper_files: Presence<Vec<Topper>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub tutorial_files: Presence<Vec<Tutorial>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub rule_files: Presence<Vec<Rules>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub rom_files: Presence<Vec<Rom>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub wheel_art_files: Presence<Vec<WheelArt>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub pov_files: Presence<Vec<Pov>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub media_pack_files: Presence<Vec<MediaPack>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub alt_color_files: Presence<Vec<AltColors>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub pup_pack_files: Presence<Vec<PupPack>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub alt_sound_files: Presence<Vec<AltSound>>,
    /// Deprecated duplicate of `altSoundFiles`.
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub sound_files: Presence<Vec<AltSound>>,
}

impl Game {
    /// Minimal record with every optional field absent.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            updated_at: 0,
            manufacturer: manufacturer.into(),
            name: name.into(),
            broken: Presence::Absent,
            image_url: Presence::Absent,
            category: Presence::Absent,
            img_url: Presence::Absent,
            mpu: Presence::Absent,
            mpu_legacy: Presence::Absent,
            year: Presence::Absent,
            theme: Presence::Absent,
            designers: Presence::Absent,
            features: Presence::Absent,
            machine_type: Presence::Absent,
            players: Presence::Absent,
            ipdb_url: Presence::Absent,
            last_created_at: 0,
            table_files: Presence::Absent,
            b2s_files: Presence::Absent,
            topper_files: Presence::Absent,
            tutorial_files: Presence::Absent,
            rule_files: Presence::Absent,
            rom_files: Presence::Absent,
            wheel_art_files: Presence::Absent,
            pov_files: Presence::Absent,
            media_pack_files: Presence::Absent,
            alt_color_files: Presence::Absent,
            pup_pack_files: Presence::Absent,
            alt_sound_files: Presence::Absent,
            sound_files: Presence::Absent,
        }
    }

    pub fn game_ref(&self) -> GameRef {
        GameRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }

    pub fn tables(&self) -> &[Table] {
        self.table_files.items()
    }

    pub fn tables_mut(&mut self) -> &mut [Table] {
        self.table_files.items_mut()
    }

    pub fn backglasses(&self) -> &[B2s] {
        self.b2s_files.items()
    }

    pub fn pup_packs(&self) -> &[PupPack] {
        self.pup_pack_files.items()
    }

    /// Every asset of every collection, in collection order.
    pub fn assets(&self) -> Vec<&dyn Asset> {
        fn push<'a, A: Asset>(out: &mut Vec<&'a dyn Asset>, items: &'a [A]) {
            out.extend(items.iter().map(|item| item as &dyn Asset));
        }

        let mut out = Vec::new();
        push(&mut out, self.table_files.items());
        push(&mut out, self.b2s_files.items());
        push(&mut out, self.topper_files.items());
        push(&mut out, self.tutorial_files.items());
        push(&mut out, self.rule_files.items());
        push(&mut out, self.rom_files.items());
        push(&mut out, self.wheel_art_files.items());
        push(&mut out, self.pov_files.items());
        push(&mut out, self.media_pack_files.items());
        push(&mut out, self.alt_color_files.items());
        push(&mut out, self.pup_pack_files.items());
        push(&mut out, self.alt_sound_files.items());
        push(&mut out, self.sound_files.items());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::asset::AssetKind;

    #[test]
    fn missing_collections_read_as_empty_slices() {
        let game = Game::new("g1", "Medieval Madness", "Williams");
        assert!(game.tables().is_empty());
        assert!(game.pup_packs().is_empty());
        assert!(game.assets().is_empty());
        assert!(game.table_files.is_absent());
    }

    #[test]
    fn assets_walk_every_collection() {
        let mut game = Game::new("g1", "Medieval Madness", "Williams");
        game.pup_pack_files = Presence::Present(vec![PupPack::default()]);
        game.sound_files = Presence::Present(vec![AltSound::default()]);
        let kinds: Vec<AssetKind> = game.assets().iter().map(|asset| asset.kind()).collect();
        assert_eq!(kinds, vec![AssetKind::PupPack, AssetKind::AltSound]);
    }
}
