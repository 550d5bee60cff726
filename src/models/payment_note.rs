use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static LABELED_NOTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)m[eé]todo\s*pago\s*:\s*([^-\n\r]+)?(?:\s*-\s*observaciones\s*:\s*(.+))?")
        .expect("valid labeled note regex")
});

const SEGMENT_SEPARATOR: &str = " - ";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ParsedNote {
    pub method: String,
    pub observations: String,
}

impl ParsedNote {
    fn passthrough(note: &str) -> Self {
        Self {
            method: String::new(),
            observations: note.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoteField {
    Method,
    Observations,
}

/// Key fragments recognized by the segment grammar, checked in order.
const SEGMENT_KEYS: &[(&str, NoteField)] = &[
    ("método", NoteField::Method),
    ("metodo", NoteField::Method),
    ("observac", NoteField::Observations),
];

type Grammar = fn(&str) -> Option<ParsedNote>;

const GRAMMARS: &[Grammar] = &[labeled_grammar, segment_grammar];

/// Splits a delivery note such as
/// `"Método pago: Daviplata - Observaciones: Test"` into payment method and
/// observations. Text no grammar understands is kept as observations.
pub fn parse_payment_note(note: &str) -> ParsedNote {
    if note.is_empty() {
        return ParsedNote::default();
    }

    GRAMMARS
        .iter()
        .find_map(|grammar| grammar(note))
        .unwrap_or_else(|| ParsedNote::passthrough(note))
}

/// `método pago: <method>[ - observaciones: <observations>]`, anywhere in
/// the note.
fn labeled_grammar(note: &str) -> Option<ParsedNote> {
    let caps = LABELED_NOTE_RE.captures(note)?;
    let method = caps.get(1).map_or("", |m| m.as_str().trim());
    // A present observations marker wins even when its value is empty.
    let observations = match caps.get(2) {
        Some(obs) => obs.as_str().trim().to_string(),
        None if method.is_empty() => note.to_string(),
        None => String::new(),
    };

    Some(ParsedNote {
        method: method.to_string(),
        observations,
    })
}

/// `key: value` segments joined by `" - "`. Declines when no segment yields
/// a method or observations value.
fn segment_grammar(note: &str) -> Option<ParsedNote> {
    if !note.contains(SEGMENT_SEPARATOR) && !note.contains(':') {
        return None;
    }

    let mut method: Option<&str> = None;
    let mut observations: Option<&str> = None;

    for segment in note.split(SEGMENT_SEPARATOR) {
        let (key, value) = segment.split_once(':').unwrap_or((segment, ""));
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        let slot = match classify_key(key) {
            Some(NoteField::Method) => &mut method,
            Some(NoteField::Observations) => &mut observations,
            None => continue,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    if method.is_none() && observations.is_none() {
        return None;
    }

    Some(ParsedNote {
        method: method.unwrap_or_default().to_string(),
        observations: observations.unwrap_or_default().to_string(),
    })
}

fn classify_key(key: &str) -> Option<NoteField> {
    let key = key.trim().to_lowercase();
    SEGMENT_KEYS
        .iter()
        .find(|(fragment, _)| key.contains(fragment))
        .map(|(_, field)| *field)
}
