// SPDX-License-Identifier: MIT
//
// Key maps.
//
// A `Keymap` binds key sequences to commands of any type. Lookup is
// prefix-aware: a sequence that is the start of some longer binding is
// reported as `Pending` so the caller keeps collecting keys instead of
// giving up.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::sequence::KeySequence;

/// Result of looking up a key sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLookup<T> {
    /// The sequence is bound.
    Matched(T),
    /// Not bound itself, but a strict prefix of a binding.
    Pending,
    /// Neither bound nor a prefix of anything bound.
    Unbound,
}

/// Key sequences mapped to commands.
#[derive(Clone)]
pub struct Keymap<C> {
    bindings: HashMap<KeySequence, C>,
}

impl<C> Keymap<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `sequence` to `command`, returning the command it replaces.
    pub fn bind(&mut self, sequence: KeySequence, command: C) -> Option<C> {
        self.bindings.insert(sequence, command)
    }

    /// Remove a binding.
    pub fn unbind(&mut self, sequence: &KeySequence) -> Option<C> {
        self.bindings.remove(sequence)
    }

    /// Resolve `sequence`. An exact binding wins over longer ones sharing
    /// its prefix.
    pub fn lookup(&self, sequence: &KeySequence) -> KeyLookup<&C> {
        let result = if let Some(command) = self.bindings.get(sequence) {
            KeyLookup::Matched(command)
        } else if self
            .bindings
            .keys()
            .any(|bound| bound.len() > sequence.len() && bound.starts_with(sequence))
        {
            KeyLookup::Pending
        } else {
            KeyLookup::Unbound
        };
        trace!(%sequence, matched = matches!(result, KeyLookup::Matched(_)), "key lookup");
        result
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<C> Default for Keymap<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for Keymap<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keymap")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(expression: &str) -> KeySequence {
        KeySequence::parse(expression).unwrap()
    }

    fn sample() -> Keymap<&'static str> {
        let mut map = Keymap::new();
        map.bind(seq("w"), "next-word");
        map.bind(seq("gg"), "top");
        map.bind(seq("ge"), "bottom");
        map.bind(seq("<C-x>"), "cut");
        map
    }

    #[test]
    fn exact_match() {
        let map = sample();
        assert_eq!(map.lookup(&seq("w")), KeyLookup::Matched(&"next-word"));
        assert_eq!(map.lookup(&seq("ge")), KeyLookup::Matched(&"bottom"));
    }

    #[test]
    fn prefix_is_pending() {
        let map = sample();
        assert_eq!(map.lookup(&seq("g")), KeyLookup::Pending);
    }

    #[test]
    fn unbound_sequences() {
        let map = sample();
        assert_eq!(map.lookup(&seq("q")), KeyLookup::Unbound);
        assert_eq!(map.lookup(&seq("ggg")), KeyLookup::Unbound);
        assert_eq!(map.lookup(&seq("wg")), KeyLookup::Unbound);
    }

    #[test]
    fn open_chord_is_pending_until_closed() {
        let map = sample();
        let mut typed = KeySequence::new();
        for key in seq("<C-x>").iter().take(2) {
            typed.push(*key);
        }
        assert_eq!(map.lookup(&typed), KeyLookup::Pending);
        let closed = typed.with_modifiers_closed();
        assert_eq!(map.lookup(&closed), KeyLookup::Matched(&"cut"));
    }

    #[test]
    fn empty_sequence() {
        assert_eq!(sample().lookup(&KeySequence::new()), KeyLookup::Pending);
        let empty: Keymap<()> = Keymap::default();
        assert_eq!(empty.lookup(&KeySequence::new()), KeyLookup::Unbound);
    }

    #[test]
    fn exact_binding_beats_longer_prefix() {
        let mut map = sample();
        map.bind(seq("g"), "goto");
        assert_eq!(map.lookup(&seq("g")), KeyLookup::Matched(&"goto"));
    }

    #[test]
    fn rebinding_and_unbinding() {
        let mut map = sample();
        assert_eq!(map.bind(seq("w"), "word"), Some("next-word"));
        assert_eq!(map.len(), 4);
        assert_eq!(map.unbind(&seq("w")), Some("word"));
        assert_eq!(map.lookup(&seq("w")), KeyLookup::Unbound);
        assert!(!map.is_empty());
    }
}
