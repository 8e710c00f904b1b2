//! IC (`MS`) dialect schema table.
//!
//! The `MS` command carries no version tag. Each historical client generation
//! encodes it with a different argument list, so the decoder identifies the
//! dialect by argument count first and field shape second. The table is
//! ordered most-fields-first and every dialect has a distinct length.

use serde::Deserialize;

/// One historical encoding of the IC message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// KFO fork: 2.8 fields plus third pair and video.
    Kfo,
    /// AO Golden: 2.8 fields plus third pair.
    AoGolden,
    /// AO 2.8 generation.
    V28,
    /// AO 2.6 generation.
    V26,
    /// DRO fork.
    Dro,
    /// Anything before 2.6.
    Pre26,
}

impl Dialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Kfo => "kfo",
            Dialect::AoGolden => "ao_golden",
            Dialect::V28 => "v28",
            Dialect::V26 => "v26",
            Dialect::Dro => "dro",
            Dialect::Pre26 => "pre26",
        }
    }

    pub fn schema(self) -> &'static Schema {
        match self {
            Dialect::Kfo => &SCHEMAS[0],
            Dialect::AoGolden => &SCHEMAS[1],
            Dialect::V28 => &SCHEMAS[2],
            Dialect::V26 => &SCHEMAS[3],
            Dialect::Dro => &SCHEMAS[4],
            Dialect::Pre26 => &SCHEMAS[5],
        }
    }
}

/// Validation rule for one positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty text.
    Str,
    /// Any text, including empty.
    StrOrEmpty,
    /// Must parse as an integer.
    Int,
    /// Integer on the wire for every dialect we accept; a failed parse still
    /// rejects the schema.
    IntOrStr,
}

/// Every field name any dialect can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MsgType,
    Pre,
    Folder,
    Anim,
    Text,
    Pos,
    Sfx,
    EmoteMod,
    Cid,
    SfxDelay,
    Button,
    Evidence,
    Flip,
    Ding,
    Color,
    Showname,
    CharidPair,
    OffsetPair,
    NonintPre,
    SfxLooping,
    Screenshake,
    FramesShake,
    FramesRealization,
    FramesSfx,
    Additive,
    Effect,
    ThirdCharid,
    Video,
    HideCharacter,
}

impl Field {
    /// Number of variants; `field as usize` is always below it.
    pub const COUNT: usize = 29;

    pub fn name(self) -> &'static str {
        match self {
            Field::MsgType => "msg_type",
            Field::Pre => "pre",
            Field::Folder => "folder",
            Field::Anim => "anim",
            Field::Text => "text",
            Field::Pos => "pos",
            Field::Sfx => "sfx",
            Field::EmoteMod => "emote_mod",
            Field::Cid => "cid",
            Field::SfxDelay => "sfx_delay",
            Field::Button => "button",
            Field::Evidence => "evidence",
            Field::Flip => "flip",
            Field::Ding => "ding",
            Field::Color => "color",
            Field::Showname => "showname",
            Field::CharidPair => "charid_pair",
            Field::OffsetPair => "offset_pair",
            Field::NonintPre => "nonint_pre",
            Field::SfxLooping => "sfx_looping",
            Field::Screenshake => "screenshake",
            Field::FramesShake => "frames_shake",
            Field::FramesRealization => "frames_realization",
            Field::FramesSfx => "frames_sfx",
            Field::Additive => "additive",
            Field::Effect => "effect",
            Field::ThirdCharid => "third_charid",
            Field::Video => "video",
            Field::HideCharacter => "hide_character",
        }
    }
}

/// Ordered field list of one dialect plus its post-processing flags.
#[derive(Debug)]
pub struct Schema {
    pub dialect: Dialect,
    pub fields: &'static [(Field, FieldKind)],
    /// `charid_pair` arrives as `"<id>^<order>"`.
    pub pair_parsing: bool,
    /// `ding` is forced into {0, 1}.
    pub clamp_ding: bool,
}

impl Schema {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The 15 fields every dialect starts with, followed by a dialect suffix.
macro_rules! ms_fields {
    ($($field:ident: $kind:ident),* $(,)?) => {
        &[
            (Field::MsgType, FieldKind::Str),
            (Field::Pre, FieldKind::StrOrEmpty),
            (Field::Folder, FieldKind::Str),
            (Field::Anim, FieldKind::Str),
            (Field::Text, FieldKind::StrOrEmpty),
            (Field::Pos, FieldKind::Str),
            (Field::Sfx, FieldKind::Str),
            (Field::EmoteMod, FieldKind::Int),
            (Field::Cid, FieldKind::Int),
            (Field::SfxDelay, FieldKind::Int),
            (Field::Button, FieldKind::IntOrStr),
            (Field::Evidence, FieldKind::Int),
            (Field::Flip, FieldKind::Int),
            (Field::Ding, FieldKind::Int),
            (Field::Color, FieldKind::Int),
            $((Field::$field, FieldKind::$kind),)*
        ]
    };
}

/// Dialect table, most fields first.
pub static SCHEMAS: [Schema; 6] = [
    Schema {
        dialect: Dialect::Kfo,
        fields: ms_fields!(
            Showname: StrOrEmpty,
            CharidPair: Str,
            OffsetPair: StrOrEmpty,
            NonintPre: Int,
            SfxLooping: StrOrEmpty,
            Screenshake: Int,
            FramesShake: StrOrEmpty,
            FramesRealization: StrOrEmpty,
            FramesSfx: StrOrEmpty,
            Additive: Int,
            Effect: StrOrEmpty,
            ThirdCharid: Int,
            Video: StrOrEmpty,
        ),
        pair_parsing: true,
        clamp_ding: false,
    },
    Schema {
        dialect: Dialect::AoGolden,
        fields: ms_fields!(
            Showname: StrOrEmpty,
            CharidPair: Str,
            OffsetPair: StrOrEmpty,
            NonintPre: Int,
            SfxLooping: StrOrEmpty,
            Screenshake: Int,
            FramesShake: StrOrEmpty,
            FramesRealization: StrOrEmpty,
            FramesSfx: StrOrEmpty,
            Additive: Int,
            Effect: StrOrEmpty,
            ThirdCharid: Int,
        ),
        pair_parsing: true,
        clamp_ding: false,
    },
    Schema {
        dialect: Dialect::V28,
        fields: ms_fields!(
            Showname: StrOrEmpty,
            CharidPair: Str,
            OffsetPair: StrOrEmpty,
            NonintPre: Int,
            SfxLooping: StrOrEmpty,
            Screenshake: Int,
            FramesShake: StrOrEmpty,
            FramesRealization: StrOrEmpty,
            FramesSfx: StrOrEmpty,
            Additive: Int,
            Effect: StrOrEmpty,
        ),
        pair_parsing: true,
        clamp_ding: false,
    },
    Schema {
        dialect: Dialect::V26,
        fields: ms_fields!(
            Showname: StrOrEmpty,
            CharidPair: Int,
            OffsetPair: Int,
            NonintPre: Int,
        ),
        pair_parsing: false,
        clamp_ding: false,
    },
    Schema {
        dialect: Dialect::Dro,
        fields: ms_fields!(
            Showname: StrOrEmpty,
            Video: StrOrEmpty,
            HideCharacter: Int,
        ),
        pair_parsing: false,
        clamp_ding: true,
    },
    Schema {
        dialect: Dialect::Pre26,
        fields: ms_fields!(),
        pair_parsing: false,
        clamp_ding: false,
    },
];

/// The table in resolution order.
pub fn schemas() -> &'static [Schema] {
    &SCHEMAS
}
