// SPDX-License-Identifier: MIT
//
// Key sequences and the chord expression language.
//
// An expression is plain text in which every character is a key, except
// for `<...>` groups:
//
// - `<ESC>`, `<CR>`, `<TAB>` and `<LT>` name a single key (`<LT>` is a
//   literal `<`);
// - `<MODS-keys>` holds the modifiers named by the letters `S`, `C` and
//   `O` while typing `keys`, so `<S-ab>` expands to `ModifierDown(SHIFT)`,
//   `a`, `b`, `ModifierUp(SHIFT)`. Inside the group every character up to
//   `>` is taken literally.
//
// Errors carry the byte offset in the expression where the problem starts.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use thiserror::Error;
use tracing::trace;

use crate::key::{Key, Modifiers};

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Why a chord expression failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    /// A `<` with no matching `>`.
    #[error("unterminated `<` group starting at offset {offset}")]
    Unterminated { offset: usize },

    /// A modifier letter other than `S`, `C` or `O`.
    #[error("unknown modifier `{letter}` at offset {offset}")]
    UnknownModifier { letter: char, offset: usize },

    /// A `<NAME>` group naming no known key.
    #[error("unknown key name `<{name}>` at offset {offset}")]
    UnknownKeyName { name: String, offset: usize },

    /// `<>`, or a modifier group without modifiers or without keys.
    #[error("empty `<>` group at offset {offset}")]
    EmptyGroup { offset: usize },
}

impl KeyParseError {
    /// Byte offset in the expression where the error was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Unterminated { offset }
            | Self::UnknownModifier { offset, .. }
            | Self::UnknownKeyName { offset, .. }
            | Self::EmptyGroup { offset } => *offset,
        }
    }
}

// ─── KeySequence ────────────────────────────────────────────────────────────

/// An ordered list of key events.
///
/// The sequence remembers which modifiers are held (opened by a
/// `ModifierDown` and not yet released), so a partially typed chord can be
/// closed with [`with_modifiers_closed`](Self::with_modifiers_closed).
#[derive(Debug, Clone, Default)]
pub struct KeySequence {
    keys: Vec<Key>,
    held: Modifiers,
}

impl KeySequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a chord expression.
    ///
    /// # Errors
    ///
    /// See [`KeyParseError`].
    pub fn parse(expression: &str) -> Result<Self, KeyParseError> {
        let mut sequence = Self::new();
        let mut chars = expression.char_indices();

        while let Some((offset, c)) = chars.next() {
            if c != '<' {
                sequence.push(Key::from(c));
                continue;
            }

            // Group head: a key name up to `>`, or modifier letters up to `-`.
            let mut head = String::new();
            let opens_chord = loop {
                match chars.next() {
                    None => return Err(KeyParseError::Unterminated { offset }),
                    Some((_, '>')) => break false,
                    Some((_, '-')) => break true,
                    Some((_, c)) => head.push(c),
                }
            };

            if !opens_chord {
                sequence.push(named_key(&head, offset)?);
                continue;
            }

            let mut modifiers = Modifiers::empty();
            for (index, letter) in head.char_indices() {
                let flag = Modifiers::from_letter(letter).ok_or(
                    KeyParseError::UnknownModifier {
                        letter,
                        offset: offset + 1 + index,
                    },
                )?;
                modifiers |= flag;
            }

            let mut held = Vec::new();
            loop {
                match chars.next() {
                    None => return Err(KeyParseError::Unterminated { offset }),
                    Some((_, '>')) => break,
                    Some((_, c)) => held.push(Key::from(c)),
                }
            }
            if modifiers.is_empty() || held.is_empty() {
                return Err(KeyParseError::EmptyGroup { offset });
            }

            sequence.push(Key::ModifierDown(modifiers));
            for key in held {
                sequence.push(key);
            }
            sequence.push(Key::ModifierUp(modifiers));
        }

        trace!(expression, keys = sequence.len(), "parsed key sequence");
        Ok(sequence)
    }

    /// Append a key, tracking held modifiers.
    pub fn push(&mut self, key: Key) {
        match key {
            Key::ModifierDown(modifiers) => self.held.insert(modifiers),
            Key::ModifierUp(modifiers) => self.held.remove(modifiers),
            _ => {}
        }
        self.keys.push(key);
    }

    /// Forget every key.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.held = Modifiers::empty();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.keys.iter()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Key] {
        &self.keys
    }

    /// Modifiers opened and not yet released.
    #[inline]
    #[must_use]
    pub const fn held_modifiers(&self) -> Modifiers {
        self.held
    }

    /// True if `prefix` is a (not necessarily strict) prefix of this sequence.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.keys.starts_with(&prefix.keys)
    }

    /// A copy with one `ModifierUp` appended for whatever is still held.
    #[must_use]
    pub fn with_modifiers_closed(&self) -> Self {
        let mut closed = self.clone();
        if !self.held.is_empty() {
            closed.push(Key::ModifierUp(self.held));
        }
        closed
    }
}

/// Resolve a `<NAME>` group.
fn named_key(name: &str, offset: usize) -> Result<Key, KeyParseError> {
    match name {
        "" => Err(KeyParseError::EmptyGroup { offset }),
        "ESC" => Ok(Key::Escape),
        "CR" => Ok(Key::Enter),
        "TAB" => Ok(Key::Tab),
        "LT" => Ok(Key::Char('<')),
        _ => Err(KeyParseError::UnknownKeyName {
            name: name.to_owned(),
            offset,
        }),
    }
}

// Held modifiers are derived from the keys, so equality looks at keys only.
impl PartialEq for KeySequence {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl Eq for KeySequence {}

impl Hash for KeySequence {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.keys.hash(state);
    }
}

impl FromStr for KeySequence {
    type Err = KeyParseError;

    fn from_str(expression: &str) -> Result<Self, Self::Err> {
        Self::parse(expression)
    }
}

impl From<Key> for KeySequence {
    fn from(key: Key) -> Self {
        let mut sequence = Self::new();
        sequence.push(key);
        sequence
    }
}

impl FromIterator<Key> for KeySequence {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut sequence = Self::new();
        for key in iter {
            sequence.push(key);
        }
        sequence
    }
}

impl<'a> IntoIterator for &'a KeySequence {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl fmt::Display for KeySequence {
    /// Back to chord-expression syntax. Keys inside a chord are written as
    /// the raw characters the parser reads there, so `<CR>` becomes `\n`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut in_chord = false;
        for key in &self.keys {
            match key {
                Key::ModifierDown(_) => in_chord = true,
                Key::ModifierUp(_) => in_chord = false,
                _ => {}
            }
            match key {
                Key::Char(c) if in_chord => write!(f, "{c}")?,
                Key::Enter if in_chord => f.write_str("\n")?,
                Key::Tab if in_chord => f.write_str("\t")?,
                Key::Escape if in_chord => f.write_str("\x1b")?,
                key => write!(f, "{key}")?,
            }
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
