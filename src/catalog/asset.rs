//! Asset records owned by a game: table files, backglasses, toppers and the rest.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::presence::Presence;
use super::tags::TagSet;

/// Download link attached to an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resource {
    pub url: String,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub broken: Presence<bool>,
}

impl Resource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            broken: Presence::Absent,
        }
    }

    /// `broken` reads as false unless the document says otherwise.
    pub fn is_broken(&self) -> bool {
        self.broken.as_option().copied().unwrap_or(false)
    }
}

/// Lookup key of the owning game copied into an asset. Carries no ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Table,
    Backglass,
    Topper,
    Tutorial,
    Rules,
    Rom,
    WheelArt,
    Pov,
    MediaPack,
    AltColors,
    PupPack,
    AltSound,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Backglass => "backglass",
            Self::Topper => "topper",
            Self::Tutorial => "tutorial",
            Self::Rules => "rules",
            Self::Rom => "rom",
            Self::WheelArt => "wheel art",
            Self::Pov => "pov",
            Self::MediaPack => "media pack",
            Self::AltColors => "alt colors",
            Self::PupPack => "pup-pack",
            Self::AltSound => "alt sound",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Capabilities shared by every asset kind. Kinds without a given field
/// report it as missing.
pub trait Asset {
    fn kind(&self) -> AssetKind;
    fn id(&self) -> Option<&str>;
    fn created_at(&self) -> Option<i64>;
    fn updated_at(&self) -> Option<i64>;
    fn authors(&self) -> Option<&[String]>;
    fn urls(&self) -> Option<&[Resource]>;
    fn comment(&self) -> Option<&str>;
    fn version(&self) -> Option<&str>;
    fn game(&self) -> Option<&GameRef>;

    fn has_author(&self, name: &str) -> bool {
        self.authors()
            .is_some_and(|authors| authors.iter().any(|author| author == name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Table {
    pub id: String,
    pub created_at: i64,
    pub updated_at: i64,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub urls: Presence<Vec<Resource>>,
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub features: Presence<TagSet>,
    /// Belongs on the game; kept so the document round-trips.
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub theme: Presence<TagSet>,
    pub table_format: String,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub version: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub edition: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub comment: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub img_url: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub game: Presence<GameRef>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub game_file_name: Presence<String>,
}

impl Asset for Table {
    fn kind(&self) -> AssetKind {
        AssetKind::Table
    }
    fn id(&self) -> Option<&str> {
        Some(&self.id)
    }
    fn created_at(&self) -> Option<i64> {
        Some(self.created_at)
    }
    fn updated_at(&self) -> Option<i64> {
        Some(self.updated_at)
    }
    fn authors(&self) -> Option<&[String]> {
        Some(&self.authors)
    }
    fn urls(&self) -> Option<&[Resource]> {
        self.urls.as_deref()
    }
    fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
    fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
    fn game(&self) -> Option<&GameRef> {
        self.game.as_option()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Tutorial {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub id: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub created_at: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub updated_at: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub authors: Presence<Vec<String>>,
    pub youtube_id: String,
    pub title: String,
    /// Misspelled `title` that exists in older records.
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub ttile: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub game: Presence<GameRef>,
}

impl Asset for Tutorial {
    fn kind(&self) -> AssetKind {
        AssetKind::Tutorial
    }
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
    fn created_at(&self) -> Option<i64> {
        self.created_at.as_option().copied()
    }
    fn updated_at(&self) -> Option<i64> {
        self.updated_at.as_option().copied()
    }
    fn authors(&self) -> Option<&[String]> {
        self.authors.as_deref()
    }
    fn urls(&self) -> Option<&[Resource]> {
        None
    }
    fn comment(&self) -> Option<&str> {
        None
    }
    fn version(&self) -> Option<&str> {
        None
    }
    fn game(&self) -> Option<&GameRef> {
        self.game.as_option()
    }
}

/// Kinds whose common fields are all optional share one accessor impl.
macro_rules! optional_asset {
    ($ty:ty, $kind:expr) => {
        impl Asset for $ty {
            fn kind(&self) -> AssetKind {
                $kind
            }
            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }
            fn created_at(&self) -> Option<i64> {
                self.created_at.as_option().copied()
            }
            fn updated_at(&self) -> Option<i64> {
                self.updated_at.as_option().copied()
            }
            fn authors(&self) -> Option<&[String]> {
                self.authors.as_deref()
            }
            fn urls(&self) -> Option<&[Resource]> {
                self.urls.as_deref()
            }
            fn comment(&self) -> Option<&str> {
                self.comment.as_deref()
            }
            fn version(&self) -> Option<&str> {
                self.version.as_deref()
            }
            fn game(&self) -> Option<&GameRef> {
                self.game.as_option()
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct B2s {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub id: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub created_at: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub updated_at: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub urls: Presence<Vec<Resource>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub authors: Presence<Vec<String>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub features: Presence<TagSet>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub version: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub comment: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub img_url: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub game: Presence<GameRef>,
}

optional_asset!(B2s, AssetKind::Backglass);

/// Shape shared by topper, ROM, wheel art, media pack, pup-pack and alt sound
/// records: the common fields plus a legacy `name`.
macro_rules! named_asset {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", deny_unknown_fields)]
        pub struct $name {
            #[serde(default, skip_serializing_if = "Presence::is_absent")]
            pub id: Presence<String>,
            #[serde(default, skip_serializing_if = "Presence::is_absent")]
            pub name: Presence<String>,
            #[serde(default, skip_serializing_if = "Presence::is_absent")]
            pub created_at: Presence<i64>,
            #[serde(default, skip_serializing_if = "Presence::is_absent")]
            pub updated_at: Presence<i64>,
            #[serde(default, skip_serializing_if = "Presence::is_absent")]
            pub urls: Presence<Vec<Resource>>,
            #[serde(default, skip_serializing_if = "Presence::is_absent")]
            pub authors: Presence<Vec<String>>,
            #[serde(default, skip_serializing_if = "Presence::is_absent")]
            pub comment: Presence<String>,
            #[serde(default, skip_serializing_if = "Presence::is_absent")]
            pub version: Presence<String>,
            #[serde(default, skip_serializing_if = "Presence::is_absent")]
            pub game: Presence<GameRef>,
        }

        optional_asset!($name, $kind);
    };
}

named_asset!(Topper, AssetKind::Topper);
named_asset!(Rom, AssetKind::Rom);
named_asset!(WheelArt, AssetKind::WheelArt);
named_asset!(MediaPack, AssetKind::MediaPack);
named_asset!(
    /// PinUP Popper pack.
    PupPack,
    AssetKind::PupPack
);
named_asset!(AltSound, AssetKind::AltSound);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Rules {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub id: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub created_at: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub updated_at: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub urls: Presence<Vec<Resource>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub authors: Presence<Vec<String>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub version: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub comment: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub game: Presence<GameRef>,
}

optional_asset!(Rules, AssetKind::Rules);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Pov {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub id: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub created_at: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub updated_at: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub urls: Presence<Vec<Resource>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub authors: Presence<Vec<String>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub comment: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub version: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub game: Presence<GameRef>,
}

optional_asset!(Pov, AssetKind::Pov);

/// Alternate DMD color set (PAL/VNI/Serum).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AltColors {
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub id: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub name: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub created_at: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub updated_at: Presence<i64>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub urls: Presence<Vec<Resource>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub authors: Presence<Vec<String>>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub version: Presence<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Presence::is_absent")]
    pub color_type: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub folder: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub file_name: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub comment: Presence<String>,
    #[serde(default, skip_serializing_if = "Presence::is_absent")]
    pub game: Presence<GameRef>,
}

optional_asset!(AltColors, AssetKind::AltColors);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_broken_defaults_to_false_and_stays_absent() {
        let resource: Resource =
            serde_json::from_str(r#"{"url":"https://vpuniverse.com/x"}"#).expect("parse");
        assert!(!resource.is_broken());
        assert_eq!(
            serde_json::to_string(&resource).expect("serialize"),
            r#"{"url":"https://vpuniverse.com/x"}"#
        );

        let broken: Resource =
            serde_json::from_str(r#"{"url":"https://x","broken":true}"#).expect("parse");
        assert!(broken.is_broken());
    }

    #[test]
    fn tutorial_reports_no_version_or_urls() {
        let tutorial: Tutorial =
            serde_json::from_str(r#"{"youtubeId":"abc","title":"Rules walkthrough"}"#)
                .expect("parse");
        assert_eq!(tutorial.kind(), AssetKind::Tutorial);
        assert!(tutorial.version().is_none());
        assert!(tutorial.urls().is_none());
        assert!(tutorial.id().is_none());
    }

    #[test]
    fn has_author_checks_optional_author_list() {
        let mut b2s = B2s::default();
        assert!(!b2s.has_author("Zen Studios"));
        b2s.authors = Presence::Present(vec!["Zen Studios".to_string()]);
        assert!(b2s.has_author("Zen Studios"));
    }

    #[test]
    fn unknown_field_is_rejected_by_the_typed_layer() {
        let err = serde_json::from_str::<PupPack>(r#"{"id":"p1","colour":"red"}"#)
            .expect_err("unknown field");
        assert!(err.to_string().contains("colour"));
    }
}
