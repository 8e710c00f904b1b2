//! Wire packets: `<command>#<arg0>#...#<argN>#%`.
//!
//! Arguments are held in wire form. Free text coming from the server side
//! (area names, OOC names, track names) goes through [`escape`] before it is
//! pushed; inbound free text is passed through [`unescape`] by the handler
//! that consumes it.

/// Field separator.
pub const SEPARATOR: char = '#';

/// Escaped sentinels, in wire order.
const ESCAPES: [(char, &str); 4] = [
    ('#', "<num>"),
    ('%', "<percent>"),
    ('$', "<dollar>"),
    ('&', "<and>"),
];

/// One decoded (or to-be-encoded) AO message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub command: String,
    pub args: Vec<String>,
}

impl Packet {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    /// Push an argument that is already in wire form.
    pub fn arg(mut self, value: impl ToString) -> Self {
        self.args.push(value.to_string());
        self
    }

    /// Push free text, escaping the reserved characters.
    pub fn text(mut self, value: &str) -> Self {
        self.args.push(escape(value));
        self
    }

    /// Push a `&`-joined tuple; each member is escaped individually.
    pub fn tuple(mut self, members: &[&str]) -> Self {
        let joined = members
            .iter()
            .map(|m| escape(m))
            .collect::<Vec<_>>()
            .join("&");
        self.args.push(joined);
        self
    }

    /// Split one framed message (terminator already removed).
    ///
    /// Returns `None` when there is no command. A leading empty segment, sent
    /// by some legacy clients, is skipped.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split(SEPARATOR);
        let mut command = parts.next()?;
        if command.is_empty() {
            command = parts.next()?;
        }
        let command = command.trim();
        if command.is_empty() {
            return None;
        }
        Some(Self {
            command: command.to_string(),
            args: parts.map(str::to_string).collect(),
        })
    }

    /// Serialize including the `#%` terminator.
    pub fn to_wire(&self) -> String {
        let len = self.command.len() + self.args.iter().map(|a| a.len() + 1).sum::<usize>() + 2;
        let mut out = String::with_capacity(len);
        out.push_str(&self.command);
        for a in &self.args {
            out.push(SEPARATOR);
            out.push_str(a);
        }
        out.push_str("#%");
        out
    }
}

/// Replace `#`, `%`, `$`, `&` with their sentinel tokens.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match ESCAPES.iter().find(|(raw, _)| *raw == c) {
            Some((_, token)) => out.push_str(token),
            None => out.push(c),
        }
    }
    out
}

/// Reverse of [`escape`].
pub fn unescape(s: &str) -> String {
    let mut out = s.to_string();
    for (raw, token) in ESCAPES {
        if out.contains(token) {
            out = out.replace(token, raw.encode_utf8(&mut [0; 4]));
        }
    }
    out
}
