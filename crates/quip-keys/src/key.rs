// SPDX-License-Identifier: MIT
//
// Key events.
//
// A `Key` is one discrete input event. Modifier chords are not attached to
// individual keys; they are bracketed instead, so `Ctrl+a` arrives as
// `ModifierDown(CONTROL)`, `Char('a')`, `ModifierUp(CONTROL)`. That keeps a
// key sequence a flat list that can be compared and prefix-matched directly.

use std::fmt;

use bitflags::bitflags;

// ─── Modifiers ──────────────────────────────────────────────────────────────

bitflags! {
    /// Modifier keys that can open a chord group.
    ///
    /// In chord expressions each flag has a one-letter name: `S`, `C`, `O`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT   = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const OPTION  = 0b0000_0100;
    }
}

/// Letter names in the order they are written out.
const LETTERS: [(char, Modifiers); 3] = [
    ('S', Modifiers::SHIFT),
    ('C', Modifiers::CONTROL),
    ('O', Modifiers::OPTION),
];

impl Modifiers {
    /// The modifier a chord-expression letter stands for.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        LETTERS
            .iter()
            .find(|(name, _)| *name == letter)
            .map(|(_, flag)| *flag)
    }
}

impl fmt::Display for Modifiers {
    /// Letters in `S`, `C`, `O` order, e.g. `SC`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (letter, flag) in LETTERS {
            if self.contains(flag) {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

// ─── Key ────────────────────────────────────────────────────────────────────

/// One key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key.
    Char(char),
    Escape,
    Enter,
    Tab,
    /// Opens a chord: the modifiers are held from here on.
    ModifierDown(Modifiers),
    /// Closes a chord.
    ModifierUp(Modifiers),
}

impl Key {
    /// True for the chord bracketing events.
    #[inline]
    #[must_use]
    pub const fn is_modifier(self) -> bool {
        matches!(self, Self::ModifierDown(_) | Self::ModifierUp(_))
    }

    /// The text this key types, if it types any.
    #[must_use]
    pub const fn text(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            Self::Enter => Some('\n'),
            Self::Tab => Some('\t'),
            Self::Escape | Self::ModifierDown(_) | Self::ModifierUp(_) => None,
        }
    }
}

impl From<char> for Key {
    /// Control characters with a named key map to it.
    fn from(c: char) -> Self {
        match c {
            '\n' | '\r' => Self::Enter,
            '\t' => Self::Tab,
            '\x1b' => Self::Escape,
            c => Self::Char(c),
        }
    }
}

impl fmt::Display for Key {
    /// Chord-expression form. A modifier event renders as the half of the
    /// bracket it stands for.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char('<') => f.write_str("<LT>"),
            Self::Char(c) => write!(f, "{c}"),
            Self::Escape => f.write_str("<ESC>"),
            Self::Enter => f.write_str("<CR>"),
            Self::Tab => f.write_str("<TAB>"),
            Self::ModifierDown(modifiers) => write!(f, "<{modifiers}-"),
            Self::ModifierUp(_) => f.write_str(">"),
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
