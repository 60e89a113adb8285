//! Hotkey bindings: chord strings mapped to layout commands.
//!
//! Chords are written as `+`-separated tokens, modifiers first, e.g.
//! `cmd+shift+left`. Registering chords with the OS is the job of the host
//! application; this module only owns the table and its validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    layout::{Generic, Half, LayoutCommand, Third, TwoThirds},
};

/// Modifier tokens in canonical order, with accepted aliases.
const MODIFIERS: [(&str, &[&str]); 4] = [
    ("cmd", &["cmd", "command", "super"]),
    ("ctrl", &["ctrl", "control"]),
    ("opt", &["opt", "option", "alt"]),
    ("shift", &["shift"]),
];

/// A single chord → command binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    /// Chord, e.g. `"cmd+ctrl+left"`.
    pub chord: String,
    /// Command dispatched when the chord fires.
    pub command: LayoutCommand,
}

impl Binding {
    /// Construct a binding.
    pub fn new(chord: impl Into<String>, command: LayoutCommand) -> Self {
        Self {
            chord: chord.into(),
            command,
        }
    }
}

/// The built-in shortcut table.
pub fn default_bindings() -> Vec<Binding> {
    use LayoutCommand as L;
    vec![
        Binding::new("cmd+opt+shift+left", L::TwoThirds(TwoThirds::Left)),
        Binding::new("cmd+opt+shift+right", L::TwoThirds(TwoThirds::Right)),
        Binding::new("cmd+shift+left", L::Third(Third::Left)),
        Binding::new("cmd+shift+down", L::Third(Third::Center)),
        Binding::new("cmd+shift+right", L::Third(Third::Right)),
        Binding::new("cmd+ctrl+left", L::Half(Half::Left)),
        Binding::new("cmd+ctrl+right", L::Half(Half::Right)),
        Binding::new("cmd+ctrl+return", L::Generic(Generic::FullScreen)),
        Binding::new("cmd+ctrl+space", L::Generic(Generic::Center)),
    ]
}

/// Normalize a chord: lowercase, aliases folded, modifiers in canonical
/// order, key last.
///
/// Returns a validation error if the chord has no key, more than one
/// non-modifier token, or an empty token.
pub fn normalize_chord(chord: &str) -> Result<String, Error> {
    let mut mods = [false; MODIFIERS.len()];
    let mut key: Option<String> = None;
    for raw in chord.split('+') {
        let tok = raw.trim().to_ascii_lowercase();
        if tok.is_empty() {
            return Err(Error::validation(format!("empty token in chord '{}'", chord)));
        }
        if let Some(i) = MODIFIERS
            .iter()
            .position(|(_, aliases)| aliases.contains(&tok.as_str()))
        {
            mods[i] = true;
            continue;
        }
        if key.replace(tok).is_some() {
            return Err(Error::validation(format!(
                "chord '{}' has more than one key",
                chord
            )));
        }
    }
    let Some(key) = key else {
        return Err(Error::validation(format!("chord '{}' has no key", chord)));
    };
    let mut parts: Vec<&str> = MODIFIERS
        .iter()
        .zip(mods)
        .filter(|(_, on)| *on)
        .map(|((name, _), _)| *name)
        .collect();
    parts.push(&key);
    Ok(parts.join("+"))
}

/// Validate a binding table: every chord must normalize and be unique.
pub fn validate_bindings(bindings: &[Binding]) -> Result<(), Error> {
    let mut seen = HashSet::new();
    for b in bindings {
        let norm = normalize_chord(&b.chord)?;
        if !seen.insert(norm.clone()) {
            return Err(Error::validation(format!(
                "chord '{}' is bound more than once",
                norm
            )));
        }
    }
    Ok(())
}
