/// The history text meaning "re-evaluate the previous entry on resume", stored in place of a
/// computed result.
pub const MARKER_EVALUATE_ON_RESUME: &str = "?";

/// The number of entries [`MemoryHistory`] keeps by default, including the current entry.
pub const DEFAULT_CAPACITY: usize = 25;

/// The input history of the calculator: an ordered list of entries with a cursor.
pub trait History {
    /// Returns the text of the entry under the cursor.
    fn text(&self) -> &str;

    /// Replaces the text of the entry under the cursor, without committing it.
    fn update(&mut self, text: &str);

    /// Commits `text` as the newest entry and moves the cursor to the current (newest, editable)
    /// entry.
    fn enter(&mut self, text: &str);

    /// Moves the cursor to the previous entry. Returns false if there is none.
    fn move_to_previous(&mut self) -> bool;

    /// Moves the cursor to the next entry. Returns false if there is none.
    fn move_to_next(&mut self) -> bool;
}

/// A history entry: the committed text, and the text it was edited to while browsing.
#[derive(Clone, Debug, Default, PartialEq)]
struct Entry {
    base: String,
    edited: String,
}

impl Entry {
    fn new(base: &str) -> Self {
        Self { base: base.to_string(), edited: base.to_string() }
    }
}

/// An in-memory [`History`].
///
/// The last entry is the current one, which is never committed; it holds whatever is being
/// typed. Browsing and editing older entries only changes their edited text, which is reverted
/// when a new entry is committed.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryHistory {
    entries: Vec<Entry>,
    pos: usize,
    capacity: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl MemoryHistory {
    /// Creates an empty history keeping [`DEFAULT_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty history keeping at most `capacity` entries. The capacity is at least 2.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: vec![Entry::default()],
            pos: 0,
            capacity: capacity.max(2),
        }
    }

    /// Returns the number of entries, including the current one.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was ever committed.
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }

    /// Returns the committed entries, oldest first.
    pub fn committed(&self) -> impl Iterator<Item = &str> {
        self.entries[..self.entries.len() - 1].iter().map(|entry| entry.base.as_str())
    }
}

impl History for MemoryHistory {
    fn text(&self) -> &str {
        &self.entries[self.pos].edited
    }

    fn update(&mut self, text: &str) {
        self.entries[self.pos].edited = text.to_string();
    }

    fn enter(&mut self, text: &str) {
        let current = &mut self.entries[self.pos];
        current.edited = current.base.clone();

        // consecutive duplicates are committed once
        let len = self.entries.len();
        if len < 2 || self.entries[len - 2].base != text {
            if len >= self.capacity {
                self.entries.remove(0);
            }
            let last = self.entries.len() - 1;
            self.entries.insert(last, Entry::new(text));
        }
        self.pos = self.entries.len() - 1;
    }

    fn move_to_previous(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        true
    }

    fn move_to_next(&mut self) -> bool {
        if self.pos + 1 >= self.entries.len() {
            return false;
        }
        self.pos += 1;
        true
    }
}
