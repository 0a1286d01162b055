// SPDX-License-Identifier: MIT
//
// quip-keys: key input for quip.
//
// Discrete key events, the `<MOD-...>` chord expression language that
// turns text like `w<S-ab><ESC>` into an ordered event list, and a key map
// that resolves sequences to commands with prefix awareness. Nothing here
// knows about documents or selections; the binary glues the two together.

pub mod key;
pub mod keymap;
pub mod sequence;

pub use key::{Key, Modifiers};
pub use keymap::{KeyLookup, Keymap};
pub use sequence::{KeyParseError, KeySequence};
