// Escape-aware quote scanner shared by the tuple extractor and field splitter.
// Tracks single/double quote state and the length of the current backslash run
// so that escaped quotes (odd run) never toggle state.

/// Per-character quote and escape state for one scanning pass.
#[derive(Debug, Default)]
pub struct QuoteState {
    in_single: bool,
    in_double: bool,
    backslash_run: u32,
}

impl QuoteState {
    pub fn new() -> Self {
        Self::default()
    }

    // Clear all state, e.g. at a tuple boundary.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed one character. Returns true when the character is "live": outside
    /// any quoted literal and eligible to act as a delimiter. Backslashes and
    /// quote characters are always literal content and return false.
    pub fn step(&mut self, c: char) -> bool {
        if c == '\\' {
            // A backslash never toggles quotes itself; it only extends the
            // escape run that decides whether the next quote is escaped.
            self.backslash_run += 1;
            return false;
        }
        if c == '\'' && !self.in_double {
            if self.backslash_run % 2 == 0 {
                self.in_single = !self.in_single;
            }
            self.backslash_run = 0;
            return false;
        }
        if c == '"' && !self.in_single {
            if self.backslash_run % 2 == 0 {
                self.in_double = !self.in_double;
            }
            self.backslash_run = 0;
            return false;
        }
        self.backslash_run = 0;
        !self.in_single && !self.in_double
    }
}
