//! IC message (`MS`) decoding.
//!
//! [`decode_ic`] walks the dialect table in order. A schema is skipped when the
//! argument count differs, and rejected when any argument fails its kind
//! check; the first schema that accepts every argument wins. The result is an
//! [`IcMessage`] that carries every field of every dialect, with defaults for
//! the fields the matched dialect does not send.

use crate::error::DecodeError;
use crate::protocol::schema::{schemas, Dialect, Field, FieldKind, Schema};

/// Emote modifiers that change what the character shows on screen.
const COMMITTING_EMOTE_MODS: [i64; 5] = [0, 1, 2, 5, 6];

/// Normalized IC message. The field set is identical for every dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcMessage {
    /// Dialect the message was decoded with.
    pub dialect: Dialect,

    pub msg_type: String,
    pub pre: String,
    pub folder: String,
    pub anim: String,
    pub text: String,
    pub pos: String,
    pub sfx: String,
    pub emote_mod: i64,
    pub cid: i64,
    pub sfx_delay: i64,
    pub button: i64,
    pub evidence: i64,
    pub flip: i64,
    pub ding: i64,
    pub color: i64,

    pub showname: String,
    /// Declared partner character id, `-1` for none.
    pub charid_pair: i64,
    /// Suffix of a compound `"<id>^<order>"` pair field, when one was sent.
    pub pair_order: Option<String>,
    /// `"0"` unless sent; 2.8 clients may send `"<x>&<y>"`.
    pub offset_pair: String,
    pub nonint_pre: i64,
    pub sfx_looping: String,
    pub screenshake: i64,
    pub frames_shake: String,
    pub frames_realization: String,
    pub frames_sfx: String,
    pub additive: i64,
    pub effect: String,
    /// Declared second partner character id, `-1` for none.
    pub third_charid: i64,
    pub video: String,
    pub hide_character: i64,
}

impl IcMessage {
    /// A message with every field at its default.
    pub fn empty(dialect: Dialect) -> Self {
        Self {
            dialect,
            msg_type: String::new(),
            pre: String::new(),
            folder: String::new(),
            anim: String::new(),
            text: String::new(),
            pos: String::new(),
            sfx: String::new(),
            emote_mod: 0,
            cid: 0,
            sfx_delay: 0,
            button: 0,
            evidence: 0,
            flip: 0,
            ding: 0,
            color: 0,
            showname: String::new(),
            charid_pair: -1,
            pair_order: None,
            offset_pair: "0".to_string(),
            nonint_pre: 0,
            sfx_looping: "0".to_string(),
            screenshake: 0,
            frames_shake: String::new(),
            frames_realization: String::new(),
            frames_sfx: String::new(),
            additive: 0,
            effect: String::new(),
            third_charid: -1,
            video: String::new(),
            hide_character: 0,
        }
    }

    /// Pair order as sent on the wire, `"0"` when absent.
    pub fn pair_order(&self) -> &str {
        self.pair_order.as_deref().unwrap_or("0")
    }

    /// Whether this message replaces the sender's displayed pose.
    pub fn commits_pose(&self) -> bool {
        COMMITTING_EMOTE_MODS.contains(&self.emote_mod)
    }
}

/// Decode the arguments of an `MS` packet.
///
/// Never panics. [`DecodeError::NoDialect`] is routine for foreign clients;
/// callers drop the message without replying.
pub fn decode_ic<S: AsRef<str>>(args: &[S]) -> Result<IcMessage, DecodeError> {
    for schema in schemas() {
        if schema.len() != args.len() {
            continue;
        }
        if let Some(msg) = decode_with(schema, args)? {
            return Ok(msg);
        }
    }
    Err(DecodeError::NoDialect { argc: args.len() })
}

/// Arguments that passed their kind check, indexed by [`Field`].
#[derive(Default)]
struct Validated<'a> {
    values: [Option<(&'a str, FieldKind)>; Field::COUNT],
}

impl<'a> Validated<'a> {
    fn set(&mut self, field: Field, raw: &'a str, kind: FieldKind) {
        if let Some(slot) = self.values.get_mut(field as usize) {
            *slot = Some((raw, kind));
        }
    }

    fn raw(&self, field: Field) -> Option<&'a str> {
        self.entry(field).map(|(raw, _)| raw)
    }

    fn entry(&self, field: Field) -> Option<(&'a str, FieldKind)> {
        self.values.get(field as usize).copied().flatten()
    }

    fn text(&self, field: Field, slot: &mut String) {
        if let Some(raw) = self.raw(field) {
            *slot = raw.to_string();
        }
    }

    fn int(&self, field: Field, slot: &mut i64) {
        if let Some(n) = self.raw(field).and_then(parse_int) {
            *slot = n;
        }
    }
}

/// `Ok(None)` means this schema does not fit; the caller tries the next one.
fn decode_with<S: AsRef<str>>(
    schema: &Schema,
    args: &[S],
) -> Result<Option<IcMessage>, DecodeError> {
    let mut v = Validated::default();
    for (&(field, kind), raw) in schema.fields.iter().zip(args) {
        let raw = raw.as_ref();
        let fits = match kind {
            FieldKind::Str => !raw.is_empty(),
            FieldKind::StrOrEmpty => true,
            FieldKind::Int | FieldKind::IntOrStr => parse_int(raw).is_some(),
        };
        if !fits {
            return Ok(None);
        }
        v.set(field, raw, kind);
    }

    let mut msg = IcMessage::empty(schema.dialect);
    v.text(Field::MsgType, &mut msg.msg_type);
    v.text(Field::Pre, &mut msg.pre);
    v.text(Field::Folder, &mut msg.folder);
    v.text(Field::Anim, &mut msg.anim);
    v.text(Field::Text, &mut msg.text);
    v.text(Field::Pos, &mut msg.pos);
    v.text(Field::Sfx, &mut msg.sfx);
    v.int(Field::EmoteMod, &mut msg.emote_mod);
    v.int(Field::Cid, &mut msg.cid);
    v.int(Field::SfxDelay, &mut msg.sfx_delay);
    v.int(Field::Button, &mut msg.button);
    v.int(Field::Evidence, &mut msg.evidence);
    v.int(Field::Flip, &mut msg.flip);
    v.int(Field::Ding, &mut msg.ding);
    v.int(Field::Color, &mut msg.color);
    v.text(Field::Showname, &mut msg.showname);
    v.int(Field::NonintPre, &mut msg.nonint_pre);
    v.text(Field::SfxLooping, &mut msg.sfx_looping);
    v.int(Field::Screenshake, &mut msg.screenshake);
    v.text(Field::FramesShake, &mut msg.frames_shake);
    v.text(Field::FramesRealization, &mut msg.frames_realization);
    v.text(Field::FramesSfx, &mut msg.frames_sfx);
    v.int(Field::Additive, &mut msg.additive);
    v.text(Field::Effect, &mut msg.effect);
    v.int(Field::ThirdCharid, &mut msg.third_charid);
    v.text(Field::Video, &mut msg.video);
    v.int(Field::HideCharacter, &mut msg.hide_character);

    // integer offsets (2.6) are normalized, 2.8 `x&y` pairs kept verbatim
    match v.entry(Field::OffsetPair) {
        Some((raw, FieldKind::Int | FieldKind::IntOrStr)) => {
            if let Some(n) = parse_int(raw) {
                msg.offset_pair = n.to_string();
            }
        }
        Some((raw, _)) => msg.offset_pair = raw.to_string(),
        None => {}
    }

    if schema.pair_parsing {
        if let Some(raw) = v.raw(Field::CharidPair) {
            let (id, order) = split_pair(raw);
            msg.charid_pair = parse_int(id).ok_or_else(|| DecodeError::BadPairId {
                raw: raw.to_string(),
            })?;
            msg.pair_order = order.map(str::to_string);
        }
    } else {
        v.int(Field::CharidPair, &mut msg.charid_pair);
    }

    if schema.clamp_ding {
        msg.ding = i64::from(msg.ding == 1);
    }

    Ok(Some(msg))
}

/// Split `"<id>^<order>"`. Only the segment right after the first `^` is the
/// order; anything after a second `^` is ignored, and an empty order is none.
fn split_pair(raw: &str) -> (&str, Option<&str>) {
    let mut parts = raw.split('^');
    let id = parts.next().unwrap_or_default();
    let order = parts.next().filter(|o| !o.is_empty());
    (id, order)
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
