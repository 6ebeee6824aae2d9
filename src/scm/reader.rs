//! Cursor-based reader over an in-memory string
//!
//! The parsers work line-by-line but sometimes need to consume a line to
//! inspect its prefix and then re-expose it. The reader supports that
//! with a put-back bounded by the most recently returned slice.

/// Reader with bounded lookahead over a borrowed string
///
/// All operations return subslices of the input; nothing is allocated.
/// Offsets are byte positions; `put_back` and `skip` accept lengths of
/// slices previously returned by the reader, so they always land on
/// character boundaries in practice.
#[derive(Debug)]
pub struct StringReader<'a> {
    input: &'a str,
    pos: usize,
    /// Byte length of the most recent read; upper bound for put_back
    last_read: usize,
}

impl<'a> StringReader<'a> {
    /// Create a reader positioned at the start of `input`
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            last_read: 0,
        }
    }

    /// True when the cursor is at the end of the input
    pub fn done(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Consume up to `end` (absolute byte offset) and record the read
    fn take(&mut self, end: usize) -> &'a str {
        let slice = &self.input[self.pos..end];
        self.last_read = slice.len();
        self.pos = end;
        slice
    }

    /// Read characters up to and including the next line feed, or the
    /// remainder at end of input
    pub fn read_line(&mut self) -> &'a str {
        match self.input[self.pos..].find('\n') {
            Some(i) => self.take(self.pos + i + 1),
            None => self.take(self.input.len()),
        }
    }

    /// Read characters up to but not including the first `delimiter`
    ///
    /// When the delimiter is absent the remainder is returned and the
    /// reader is done.
    pub fn read_until(&mut self, delimiter: char) -> &'a str {
        match self.input[self.pos..].find(delimiter) {
            Some(i) => self.take(self.pos + i),
            None => self.take(self.input.len()),
        }
    }

    /// Read characters up to but not including the next whitespace
    pub fn read_until_whitespace(&mut self) -> &'a str {
        match self.input[self.pos..].find(char::is_whitespace) {
            Some(i) => self.take(self.pos + i),
            None => self.take(self.input.len()),
        }
    }

    /// Read and consume the remainder of the input
    pub fn read_to_end(&mut self) -> &'a str {
        self.take(self.input.len())
    }

    /// Advance the cursor by `n` bytes, clamped to the end of input
    ///
    /// `n` must describe a whole number of characters from the current
    /// position (e.g. the length of a known ASCII prefix).
    pub fn skip(&mut self, n: usize) {
        let end = (self.pos + n).min(self.input.len());
        self.take(end);
    }

    /// Advance the cursor past any whitespace
    pub fn skip_whitespace(&mut self) {
        let end = match self.input[self.pos..].find(|c: char| !c.is_whitespace()) {
            Some(i) => self.pos + i,
            None => self.input.len(),
        };
        self.take(end);
    }

    /// Rewind the cursor by `n` bytes
    ///
    /// Bounded by the length of the most recent read; rewinding further
    /// than that is clamped.
    pub fn put_back(&mut self, n: usize) {
        let n = n.min(self.last_read);
        self.pos -= n;
        self.last_read -= n;
    }
}
