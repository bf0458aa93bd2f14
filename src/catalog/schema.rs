//! Declared fields of every record kind in the catalog document.
//!
//! Records are checked against these tables before typed decoding so that a
//! stray key is reported with its kind and document path instead of a bare
//! serde message.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug)]
pub struct RecordSchema {
    pub kind: &'static str,
    pub fields: &'static [FieldSpec],
}

#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub shape: Shape,
}

#[derive(Debug)]
pub enum Shape {
    Value,
    Record(&'static RecordSchema),
    Records(&'static RecordSchema),
}

const fn required(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        required: true,
        shape: Shape::Value,
    }
}

const fn optional(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
        shape: Shape::Value,
    }
}

const fn optional_record(name: &'static str, schema: &'static RecordSchema) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
        shape: Shape::Record(schema),
    }
}

const fn optional_records(name: &'static str, schema: &'static RecordSchema) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
        shape: Shape::Records(schema),
    }
}

impl RecordSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

pub static RESOURCE: RecordSchema = RecordSchema {
    kind: "Resource",
    fields: &[required("url"), optional("broken")],
};

pub static GAME_REF: RecordSchema = RecordSchema {
    kind: "GameRef",
    fields: &[required("id"), required("name")],
};

pub static TABLE: RecordSchema = RecordSchema {
    kind: "Table",
    fields: &[
        required("id"),
        required("createdAt"),
        required("updatedAt"),
        optional_records("urls", &RESOURCE),
        required("authors"),
        optional("features"),
        optional("theme"),
        required("tableFormat"),
        optional("version"),
        optional("edition"),
        optional("comment"),
        optional("imgUrl"),
        optional_record("game", &GAME_REF),
        optional("gameFileName"),
    ],
};

pub static B2S: RecordSchema = RecordSchema {
    kind: "B2S",
    fields: &[
        optional("id"),
        optional("createdAt"),
        optional("updatedAt"),
        optional_records("urls", &RESOURCE),
        optional("authors"),
        optional("features"),
        optional("version"),
        optional("comment"),
        optional("imgUrl"),
        optional_record("game", &GAME_REF),
    ],
};

pub static TUTORIAL: RecordSchema = RecordSchema {
    kind: "Tutorial",
    fields: &[
        optional("id"),
        optional("createdAt"),
        optional("updatedAt"),
        optional("authors"),
        required("youtubeId"),
        required("title"),
        optional("ttile"),
        optional_record("game", &GAME_REF),
    ],
};

pub static RULES: RecordSchema = RecordSchema {
    kind: "Rules",
    fields: &[
        optional("id"),
        optional("createdAt"),
        optional("updatedAt"),
        optional_records("urls", &RESOURCE),
        optional("authors"),
        optional("version"),
        optional("comment"),
        optional_record("game", &GAME_REF),
    ],
};

pub static POV: RecordSchema = RecordSchema {
    kind: "POV",
    fields: &[
        optional("id"),
        optional("createdAt"),
        optional("updatedAt"),
        optional_records("urls", &RESOURCE),
        optional("authors"),
        optional("comment"),
        optional("version"),
        optional_record("game", &GAME_REF),
    ],
};

static NAMED_ASSET_FIELDS: [FieldSpec; 9] = [
    optional("id"),
    optional("name"),
    optional("createdAt"),
    optional("updatedAt"),
    optional_records("urls", &RESOURCE),
    optional("authors"),
    optional("comment"),
    optional("version"),
    optional_record("game", &GAME_REF),
];

pub static TOPPER: RecordSchema = RecordSchema {
    kind: "Topper",
    fields: &NAMED_ASSET_FIELDS,
};

pub static ROM: RecordSchema = RecordSchema {
    kind: "ROM",
    fields: &NAMED_ASSET_FIELDS,
};

pub static WHEEL_ART: RecordSchema = RecordSchema {
    kind: "WheelArt",
    fields: &NAMED_ASSET_FIELDS,
};

pub static MEDIA_PACK: RecordSchema = RecordSchema {
    kind: "MediaPack",
    fields: &NAMED_ASSET_FIELDS,
};

pub static PUP_PACK: RecordSchema = RecordSchema {
    kind: "PupPack",
    fields: &NAMED_ASSET_FIELDS,
};

pub static ALT_SOUND: RecordSchema = RecordSchema {
    kind: "AltSound",
    fields: &NAMED_ASSET_FIELDS,
};

pub static ALT_COLORS: RecordSchema = RecordSchema {
    kind: "AltColors",
    fields: &[
        optional("id"),
        optional("name"),
        optional("createdAt"),
        optional("updatedAt"),
        optional_records("urls", &RESOURCE),
        optional("authors"),
        optional("version"),
        optional("type"),
        optional("folder"),
        optional("fileName"),
        optional("comment"),
        optional_record("game", &GAME_REF),
    ],
};

pub static GAME: RecordSchema = RecordSchema {
    kind: "Game",
    fields: &[
        required("id"),
        required("updatedAt"),
        required("manufacturer"),
        required("name"),
        optional("broken"),
        optional("imageUrl"),
        optional("category"),
        optional("imgUrl"),
        optional("mpu"),
        optional("MPU"),
        optional("year"),
        optional("theme"),
        optional("designers"),
        optional("features"),
        optional("type"),
        optional("players"),
        optional("ipdbUrl"),
        required("lastCreatedAt"),
        optional_records("tableFiles", &TABLE),
        optional_records("b2sFiles", &B2S),
        optional_records("topperFiles", &TOPPER),
        optional_records("tutorialFiles", &TUTORIAL),
        optional_records("ruleFiles", &RULES),
        optional_records("romFiles", &ROM),
        optional_records("wheelArtFiles", &WHEEL_ART),
        optional_records("povFiles", &POV),
        optional_records("mediaPackFiles", &MEDIA_PACK),
        optional_records("altColorFiles", &ALT_COLORS),
        optional_records("pupPackFiles", &PUP_PACK),
        optional_records("altSoundFiles", &ALT_SOUND),
        optional_records("soundFiles", &ALT_SOUND),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("expected an object")]
    NotAnObject,
    #[error("expected an array")]
    NotAnArray,
    #[error("{0}")]
    InvalidValue(String),
}

/// A record that does not match its declared schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {path}: {problem}")]
pub struct SchemaViolation {
    pub kind: &'static str,
    pub path: String,
    pub problem: Violation,
}

impl SchemaViolation {
    pub fn new(kind: &'static str, path: impl Into<String>, problem: Violation) -> Self {
        Self {
            kind,
            path: path.into(),
            problem,
        }
    }
}

/// Check `value` and its nested records against `schema`. Stops at the first
/// violation.
pub fn check_record(
    value: &Value,
    schema: &RecordSchema,
    path: &str,
) -> Result<(), SchemaViolation> {
    let Some(object) = value.as_object() else {
        return Err(SchemaViolation::new(schema.kind, path, Violation::NotAnObject));
    };

    if let Some(unknown) = object.keys().find(|key| schema.field(key).is_none()) {
        return Err(SchemaViolation::new(
            schema.kind,
            path,
            Violation::UnknownField(unknown.clone()),
        ));
    }

    for field in schema.fields {
        let nested = match object.get(field.name) {
            None if field.required => {
                return Err(SchemaViolation::new(
                    schema.kind,
                    path,
                    Violation::MissingField(field.name),
                ))
            }
            None | Some(Value::Null) => continue,
            Some(nested) => nested,
        };

        match field.shape {
            Shape::Value => {}
            Shape::Record(inner) => {
                check_record(nested, inner, &format!("{path}.{}", field.name))?;
            }
            Shape::Records(inner) => {
                let list_path = format!("{path}.{}", field.name);
                let Some(items) = nested.as_array() else {
                    return Err(SchemaViolation::new(inner.kind, list_path, Violation::NotAnArray));
                };
                for (index, item) in items.iter().enumerate() {
                    check_record(item, inner, &format!("{list_path}[{index}]"))?;
                }
            }
        }
    }

    Ok(())
}
