use crate::error::{Result, StageError};

// ── Scanner ───────────────────────────────────────────────────────────────

/// Cursor over one property value.
///
/// Whitespace (newlines included) is skipped before every token. Failures
/// carry the line the property started on, not an offset inside the value,
/// so diagnostics point at text the user can edit.
#[derive(Debug, Clone)]
pub struct Scanner<'s> {
    text: &'s str,
    pos:  usize,
    line: usize,
}

impl<'s> Scanner<'s> {
    pub fn new(text: &'s str, line: usize) -> Self {
        Self { text, pos: 0, line }
    }

    #[inline]
    pub fn text(&self) -> &'s str {
        self.text
    }

    /// Line the scanned text started on.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Unconsumed text, leading whitespace included.
    #[inline]
    pub fn remaining(&self) -> &'s str {
        &self.text[self.pos..]
    }

    pub fn is_at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.pos >= self.text.len()
    }

    /// Builds an unrecognized-content error for this value.
    pub fn error(&self, expected: &str) -> StageError {
        StageError::unrecognized(format!("Expected {expected} but saw '{}'", self.text), self.line)
    }

    fn skip_whitespace(&mut self) {
        let rest = self.remaining();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn take_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'s str {
        self.skip_whitespace();
        let rest = self.remaining();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    // ── Primitive tokens ──────────────────────────────────────────────────

    /// Consumes `literal` if it comes next. Case-sensitive.
    pub fn scan_literal(&mut self, literal: &str) -> bool {
        self.skip_whitespace();
        if self.remaining().starts_with(literal) {
            self.pos += literal.len();
            true
        } else {
            false
        }
    }

    /// Consumes a non-empty run of characters accepted by `pred`.
    pub fn scan_chars(&mut self, pred: impl FnMut(char) -> bool) -> Result<&'s str> {
        let run = self.take_while(pred);
        if run.is_empty() {
            return Err(self.error("characters from the expected set"));
        }
        Ok(run)
    }

    /// Consumes text up to (not including) the first character accepted by
    /// `stop`, or to the end. Trailing whitespace is dropped.
    pub fn scan_up_to_chars(&mut self, mut stop: impl FnMut(char) -> bool) -> Result<&'s str> {
        let run = self.take_while(|c| !stop(c));
        if run.is_empty() {
            return Err(self.error("text before the delimiter"));
        }
        Ok(run.trim_end())
    }

    /// Consumes text up to (not including) `delimiter`, or to the end.
    pub fn scan_up_to(&mut self, delimiter: &str) -> Result<&'s str> {
        self.skip_whitespace();
        let rest = self.remaining();
        let len = rest.find(delimiter).unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error(&format!("text before '{delimiter}'")));
        }
        self.pos += len;
        Ok(rest[..len].trim_end())
    }

    /// `[A-Za-z0-9_]+`
    pub fn scan_identifier(&mut self) -> Result<&'s str> {
        let run = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if run.is_empty() {
            return Err(self.error("an identifier"));
        }
        Ok(run)
    }

    /// Everything left, trimmed. Leaves the scanner at the end.
    pub fn scan_remainder(&mut self) -> &'s str {
        let rest = self.remaining().trim();
        self.pos = self.text.len();
        rest
    }

    /// Every line of the whole value, trimmed.
    pub fn lines_trimmed(&self) -> Vec<&'s str> {
        self.text.split('\n').map(str::trim).collect()
    }

    // ── Booleans and numbers ──────────────────────────────────────────────

    /// Next whitespace-delimited word as a boolean.
    ///
    /// Signs and leading zeros are ignored; then `y`, `t`, or a digit
    /// `1`-`9` reads as true and `n`, `f`, or nothing left reads as false.
    pub fn scan_bool(&mut self) -> Result<bool> {
        let word = self.take_while(|c| !c.is_whitespace());
        if word.is_empty() {
            return Err(self.error("Bool"));
        }
        let significant = word.trim_start_matches(['+', '-']).trim_start_matches('0');
        match significant.chars().next() {
            None => Ok(false),
            Some('y' | 'Y' | 't' | 'T' | '1'..='9') => Ok(true),
            Some('n' | 'N' | 'f' | 'F') => Ok(false),
            Some(_) => Err(self.error("Bool")),
        }
    }

    /// `-?(\d*\.\d+|\d+\.?\d*)` as a double.
    pub fn scan_number(&mut self) -> Result<f64> {
        let start = self.pos;
        let run = self.take_while(|c| c.is_ascii_digit() || c == '.' || c == '-');
        if !is_numeric_literal(run) {
            self.pos = start;
            return Err(self.error("number"));
        }
        run.parse::<f64>().map_err(|_| self.error("number"))
    }

    pub fn scan_float(&mut self) -> Result<f32> {
        self.scan_number().map(|n| n as f32)
    }

    /// Optionally signed decimal integer.
    pub fn scan_int(&mut self) -> Result<i64> {
        self.skip_whitespace();
        let start = self.pos;
        let rest = self.remaining();
        let sign = usize::from(rest.starts_with(['-', '+']));
        let digits = rest[sign..].find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len() - sign);
        if digits == 0 {
            return Err(self.error("integer"));
        }
        let literal = &rest[..sign + digits];
        self.pos = start + literal.len();
        literal.parse::<i64>().map_err(|_| self.error("integer"))
    }

    // ── Lists ─────────────────────────────────────────────────────────────

    /// Comma-separated items until the end of input.
    pub fn scan_list<T>(&mut self, mut item: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        let mut out = Vec::new();
        while !self.is_at_end() {
            out.push(item(self)?);
            self.scan_literal(",");
        }
        Ok(out)
    }

    /// Comma-separated items between `open` and `close`.
    ///
    /// An empty delimiter is not required; with an empty `close` the list
    /// runs to the end of input.
    pub fn scan_bracketed_list<T>(
        &mut self,
        open: &str,
        close: &str,
        mut item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        if !open.is_empty() && !self.scan_literal(open) {
            return Err(self.error(&format!("'{open}' to open list")));
        }
        let mut out = Vec::new();
        let mut closed = close.is_empty();
        while !self.is_at_end() {
            if !close.is_empty() && self.scan_literal(close) {
                closed = true;
                break;
            }
            out.push(item(self)?);
            self.scan_literal(",");
        }
        if !closed {
            return Err(self.error(&format!("'{close}' to close list")));
        }
        Ok(out)
    }
}

/// Whole-string match of `-?(\d*\.\d+|\d+\.?\d*)`.
fn is_numeric_literal(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    let (int, frac) = match body.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (body, None),
    };
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    match frac {
        None => !int.is_empty() && digits(int),
        Some(frac) => digits(int) && digits(frac) && !(int.is_empty() && frac.is_empty()),
    }
}
