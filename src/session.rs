// SPDX-License-Identifier: MIT
//
// Editing session: a document, its selections, and key dispatch.
//
// Keys flow through the session one at a time:
//
//   Normal mode: key → pending sequence → keymap lookup → command
//   Insert mode: key → typed text → insert at every selection
//   Append mode: first typed key goes after every extent, then insert mode
//
// Selector commands map every selection independently; a selection whose
// selector finds nothing stays where it is.

use quip_core::{Document, Result, Selection, SelectionSet, selector};
use quip_keys::{Key, KeyLookup, KeySequence, Keymap};
use tracing::{debug, trace};

// ─── Mode ───────────────────────────────────────────────────────────────────

/// What typed keys mean right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keys are looked up in the keymap.
    #[default]
    Normal,
    /// Keys type text before every selection.
    Insert,
    /// The next typed key goes after every selection.
    Append,
}

// ─── Command ────────────────────────────────────────────────────────────────

/// Commands a key sequence can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    SelectThisWord,
    SelectNextWord,
    SelectPriorWord,
    SelectRemainingWord,
    SelectThisLine,
    SelectNextLine,
    SelectPriorLine,
    Erase,
    EnterInsert,
    EnterAppend,
    /// Drop any half-typed sequence. Bound to `<ESC>`.
    Cancel,
}

type Selector = fn(&Document, &Selection) -> Result<Option<Selection>>;

impl Command {
    const fn selector(self) -> Option<Selector> {
        match self {
            Self::SelectThisWord => Some(selector::select_this_word),
            Self::SelectNextWord => Some(selector::select_next_word),
            Self::SelectPriorWord => Some(selector::select_prior_word),
            Self::SelectRemainingWord => Some(selector::select_remaining_word),
            Self::SelectThisLine => Some(selector::select_this_line),
            Self::SelectNextLine => Some(selector::select_next_line),
            Self::SelectPriorLine => Some(selector::select_prior_line),
            Self::Erase | Self::EnterInsert | Self::EnterAppend | Self::Cancel => None,
        }
    }
}

/// The built-in normal-mode bindings.
#[must_use]
pub fn default_keymap() -> Keymap<Command> {
    let mut keymap = Keymap::new();
    for (c, command) in [
        ('s', Command::SelectThisWord),
        ('w', Command::SelectNextWord),
        ('b', Command::SelectPriorWord),
        ('e', Command::SelectRemainingWord),
        ('x', Command::SelectThisLine),
        ('j', Command::SelectNextLine),
        ('k', Command::SelectPriorLine),
        ('d', Command::Erase),
        ('i', Command::EnterInsert),
        ('a', Command::EnterAppend),
    ] {
        keymap.bind(KeySequence::from(Key::Char(c)), command);
    }
    keymap.bind(KeySequence::from(Key::Escape), Command::Cancel);
    keymap
}

// ─── Session ────────────────────────────────────────────────────────────────

/// A document being edited through key input.
#[derive(Debug)]
pub struct Session {
    document: Document,
    selections: SelectionSet,
    mode: Mode,
    keymap: Keymap<Command>,
    pending: KeySequence,
}

impl Session {
    /// A session with the default bindings and one cursor at the start.
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self::with_keymap(document, default_keymap())
    }

    #[must_use]
    pub fn with_keymap(document: Document, keymap: Keymap<Command>) -> Self {
        let selections = SelectionSet::from(Selection::point(document.begin().location()));
        Self {
            document,
            selections,
            mode: Mode::Normal,
            keymap,
            pending: KeySequence::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[inline]
    #[must_use]
    pub const fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Replace the selections, e.g. with search results.
    pub fn set_selections(&mut self, selections: impl Into<SelectionSet>) {
        self.selections = selections.into();
    }

    /// Press every key of `keys` in order.
    ///
    /// # Errors
    ///
    /// The first document error; keys after it are not processed.
    pub fn feed(&mut self, keys: &KeySequence) -> Result<()> {
        for key in keys {
            self.press(*key)?;
        }
        Ok(())
    }

    /// Press one key.
    ///
    /// # Errors
    ///
    /// Any error from the command or edit the key triggers.
    pub fn press(&mut self, key: Key) -> Result<()> {
        trace!(%key, mode = ?self.mode, "press");
        match self.mode {
            Mode::Normal => self.dispatch(key),
            Mode::Insert | Mode::Append => self.type_key(key),
        }
    }

    fn dispatch(&mut self, key: Key) -> Result<()> {
        self.pending.push(key);
        match self.keymap.lookup(&self.pending) {
            KeyLookup::Matched(&command) => {
                self.pending.clear();
                self.run(command)
            }
            KeyLookup::Pending => Ok(()),
            KeyLookup::Unbound => {
                debug!(sequence = %self.pending, "unbound key sequence");
                self.pending.clear();
                Ok(())
            }
        }
    }

    fn type_key(&mut self, key: Key) -> Result<()> {
        if key == Key::Escape {
            self.mode = Mode::Normal;
            return Ok(());
        }
        let Some(c) = key.text() else {
            return Ok(());
        };
        let mut buf = [0; 4];
        let text = c.encode_utf8(&mut buf);
        self.selections = if self.mode == Mode::Append {
            self.mode = Mode::Insert;
            self.document.append(&self.selections, text)?
        } else {
            self.document.insert(&self.selections, text)?
        };
        Ok(())
    }

    /// Run a command against every selection.
    ///
    /// # Errors
    ///
    /// Any error from the selector or edit.
    pub fn run(&mut self, command: Command) -> Result<()> {
        debug!(?command, selections = self.selections.len(), "run");
        if let Some(select) = command.selector() {
            let document = &self.document;
            self.selections = self.selections.map_or_keep(|s| select(document, s))?;
            return Ok(());
        }
        match command {
            Command::Erase => self.selections = self.document.erase(&self.selections)?,
            Command::EnterInsert => self.mode = Mode::Insert,
            Command::EnterAppend => self.mode = Mode::Append,
            _ => {}
        }
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
