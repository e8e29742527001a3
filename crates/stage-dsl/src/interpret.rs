use crate::declaration::Declaration;
use crate::error::{Result, StageError};
use crate::hierarchy::{NodeId, ViewHierarchy};
use crate::scanner::Scanner;

use std::collections::HashMap;

/// Consumes the body lines of one declaration and writes the result into it.
pub trait DeclarationInterpreter {
    /// Feeds one body line. `line` is the 1-based source line.
    fn next(&mut self, text: &str, line: usize) -> Result<()>;

    /// Commits everything gathered so far into `declaration`.
    fn amend(self: Box<Self>, declaration: &mut Declaration);
}

/// Picks the interpreter for a body from its first non-blank line:
/// a leading `.` means property setters, anything else a view tree.
pub fn interpreter_for(first_line: &str) -> Box<dyn DeclarationInterpreter> {
    if first_line.trim_start().starts_with('.') {
        Box::new(PropertySettersInterpreter::default())
    } else {
        Box::new(ViewHierarchyInterpreter::default())
    }
}

// ── Property setters ──────────────────────────────────────────────────────

/// `.name = value` lines; lines without a leading `.` continue the value.
#[derive(Debug, Default)]
pub struct PropertySettersInterpreter {
    current:   Option<PendingSetter>,
    committed: Vec<PendingSetter>,
}

#[derive(Debug)]
struct PendingSetter {
    name:  String,
    value: String,
    line:  usize,
}

impl PropertySettersInterpreter {
    fn commit_current(&mut self) {
        if let Some(setter) = self.current.take() {
            self.committed.push(setter);
        }
    }
}

fn setter_error(text: &str, line: usize) -> StageError {
    StageError::unrecognized(format!("Expected a property setter statement, saw '{}'", text.trim()), line)
}

impl DeclarationInterpreter for PropertySettersInterpreter {
    fn next(&mut self, text: &str, line: usize) -> Result<()> {
        let trimmed = text.trim_start();
        if !trimmed.starts_with('.') {
            return match self.current.as_mut() {
                Some(setter) => {
                    setter.value.push('\n');
                    setter.value.push_str(trimmed.trim_end());
                    Ok(())
                }
                None => Err(setter_error(text, line)),
            };
        }

        self.commit_current();

        let mut scanner = Scanner::new(trimmed, line);
        scanner.scan_literal(".");
        let name = scanner.scan_chars(char::is_alphanumeric).map_err(|_| setter_error(text, line))?;
        if !scanner.scan_literal("=") {
            return Err(setter_error(text, line));
        }
        self.current = Some(PendingSetter {
            name:  name.to_string(),
            value: scanner.scan_remainder().to_string(),
            line,
        });
        Ok(())
    }

    fn amend(mut self: Box<Self>, declaration: &mut Declaration) {
        self.commit_current();
        for setter in self.committed {
            declaration.set_property(setter.name, setter.value.trim(), setter.line);
        }
    }
}

// ── View hierarchy ────────────────────────────────────────────────────────

/// One view name per line; leading whitespace sets the nesting depth.
#[derive(Debug, Default)]
pub struct ViewHierarchyInterpreter {
    hierarchy: ViewHierarchy,
    stack:     Vec<NodeId>,
    memo:      HashMap<String, NodeId>,
}

impl DeclarationInterpreter for ViewHierarchyInterpreter {
    fn next(&mut self, text: &str, line: usize) -> Result<()> {
        let name = text.trim();
        if name.is_empty() {
            return Ok(());
        }
        if name.contains(char::is_whitespace) {
            return Err(StageError::unrecognized(
                format!("Expected a single view name, saw '{name}'"),
                line,
            ));
        }
        let indent = text.len() - text.trim_start().len();

        if self.memo.contains_key(name) {
            log::warn!("view name '{name}' on line {line} already appears in this hierarchy; clobbering");
        }

        while let Some(&top) = self.stack.last() {
            if self.hierarchy.node(top).indent < indent {
                break;
            }
            self.stack.pop();
        }

        let parent = self.stack.last().copied().unwrap_or(self.hierarchy.root());
        let node = self.hierarchy.add_child(parent, name, indent);
        self.memo.insert(name.to_string(), node);
        self.stack.push(node);
        Ok(())
    }

    fn amend(self: Box<Self>, declaration: &mut Declaration) {
        declaration.set_hierarchy(self.hierarchy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> Result<Declaration> {
        let mut interp = interpreter_for(lines[0]);
        for (i, text) in lines.iter().enumerate() {
            interp.next(text, i + 2)?;
        }
        let mut decl = Declaration::new("Test");
        interp.amend(&mut decl);
        Ok(decl)
    }

    // ── Setters ───────────────────────────────────────────────────────────

    #[test]
    fn setter_value_and_line() {
        let d = run(&["  .alpha = 0.5", "  .text =  hi there "]).unwrap();
        assert_eq!(d.property("alpha").unwrap().value, "0.5");
        assert_eq!(d.property("alpha").unwrap().line, 2);
        assert_eq!(d.property("text").unwrap().value, "hi there");
        assert_eq!(d.property("text").unwrap().line, 3);
    }

    #[test]
    fn continuation_joins_with_newline() {
        let d = run(&[".text = first", "   second  ", "third", ".x = 1"]).unwrap();
        assert_eq!(d.property("text").unwrap().value, "first\nsecond\nthird");
        assert_eq!(d.property("text").unwrap().line, 2);
        assert_eq!(d.property("x").unwrap().line, 5);
    }

    #[test]
    fn spaced_setter_syntax() {
        let d = run(&[". frame = {0, 0, 1, 1}"]).unwrap();
        assert_eq!(d.property("frame").unwrap().value, "{0, 0, 1, 1}");
    }

    #[test]
    fn empty_value_is_allowed() {
        let d = run(&[".text ="]).unwrap();
        assert_eq!(d.property("text").unwrap().value, "");
    }

    #[test]
    fn setter_missing_equals() {
        let err = run(&[".alpha 0.5"]).unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn setter_missing_name() {
        assert!(run(&[". = 3"]).is_err());
    }

    #[test]
    fn last_assignment_wins() {
        let d = run(&[".a = 1", ".a = 2"]).unwrap();
        assert_eq!(d.property("a").unwrap().value, "2");
        assert_eq!(d.properties().len(), 1);
    }

    #[test]
    fn setter_placeholders_indexed() {
        let d = run(&[".text = Hello #{name}", ".tint = red"]).unwrap();
        let props: Vec<_> = d.interpolants()["name"].iter().cloned().collect();
        assert_eq!(props, ["text"]);
    }

    // ── Hierarchy ─────────────────────────────────────────────────────────

    fn names_under(h: &ViewHierarchy, id: NodeId) -> Vec<&str> {
        h.children(id).iter().map(|&c| h.name(c)).collect()
    }

    #[test]
    fn nesting_follows_indent() {
        let d = run(&["  A", "    B", "  C"]).unwrap();
        let h = d.hierarchy().unwrap();
        assert_eq!(names_under(h, h.root()), ["A", "C"]);
        assert_eq!(names_under(h, h.find("A").unwrap()), ["B"]);
    }

    #[test]
    fn dedent_pops_to_strict_ancestor() {
        let d = run(&["A", "    B", "      C", "  D", "E"]).unwrap();
        let h = d.hierarchy().unwrap();
        assert_eq!(names_under(h, h.root()), ["A", "E"]);
        assert_eq!(names_under(h, h.find("A").unwrap()), ["B", "D"]);
        assert_eq!(names_under(h, h.find("B").unwrap()), ["C"]);
    }

    #[test]
    fn duplicate_names_clobber_but_keep_both_nodes() {
        let d = run(&["A", "  X", "B", "  X"]).unwrap();
        let h = d.hierarchy().unwrap();
        assert_eq!(h.breadth_first().len(), 4);
        assert_eq!(h.name(h.parent(h.find("X").unwrap()).unwrap()), "B");
    }

    #[test]
    fn hierarchy_rejects_spaced_names() {
        let err = run(&["A", "  B C"]).unwrap_err();
        assert_eq!(err.line(), Some(3));
    }
}
