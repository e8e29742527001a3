use crate::document::Document;
use crate::error::{Annotate, Result, StageError};
use crate::interpret::interpreter_for;
use crate::preprocess::preprocess;

// ── Parser ────────────────────────────────────────────────────────────────

/// Groups preprocessed lines into declarations.
///
/// A line ending in `:` opens one or more comma-separated declaration names;
/// the lines after it, up to the next such line, are the shared body.
pub struct Parser<'a> {
    lines: Vec<&'a str>,
    pos:   usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { lines: preprocess(source), pos: 0 }
    }

    fn peek_line(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Returns the next line and its 1-based number.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = self.peek_line()?;
        self.pos += 1;
        Some((self.pos, line))
    }

    // ── Document ──────────────────────────────────────────────────────────

    pub fn parse_into(&mut self, document: &mut Document) -> Result<()> {
        while let Some((number, line)) = self.next_line() {
            if line.trim().is_empty() {
                continue;
            }
            if !line.ends_with(':') {
                return Err(StageError::unrecognized(
                    format!("Unrecognized plain text '{}'. Add ':' to the end to make a declaration", line.trim()),
                    number,
                ));
            }
            self.parse_declaration(line, number, document)?;
        }
        Ok(())
    }

    // ── Declarations ──────────────────────────────────────────────────────

    fn parse_declaration(&mut self, header: &str, number: usize, document: &mut Document) -> Result<()> {
        let names: Vec<&str> = header[..header.len() - 1].split(',').map(str::trim).collect();
        if names.iter().any(|n| n.is_empty()) {
            return Err(StageError::unrecognized(
                format!("Empty declaration name in '{}'", header.trim()),
                number,
            ));
        }

        let mut body = Vec::new();
        while let Some(next) = self.peek_line() {
            if next.ends_with(':') {
                break;
            }
            self.pos += 1;
            if !next.trim().is_empty() {
                body.push((self.pos, next));
            }
        }

        for name in names {
            apply_body(&body, name, document)
                .with_context(|| format!("while parsing declaration '{name}'"))?;
        }
        Ok(())
    }
}

fn apply_body(body: &[(usize, &str)], name: &str, document: &mut Document) -> Result<()> {
    let Some(&(_, first)) = body.first() else {
        log::debug!("declaration '{name}' has an empty body");
        return Ok(());
    };
    let mut interpreter = interpreter_for(first);
    for &(number, text) in body {
        interpreter.next(text, number)?;
    }
    interpreter.amend(document.declaration_mut(name));
    Ok(())
}

/// Parses `source` into a fresh [`Document`] labelled `identifier`.
pub fn parse_str(source: &str, identifier: &str) -> Result<Document> {
    let mut document = Document::new(identifier);
    Parser::new(source)
        .parse_into(&mut document)
        .with_context(|| format!("while parsing {identifier}"))?;
    log::debug!("parsed {} declaration(s) from {identifier}", document.len());
    Ok(document)
}
