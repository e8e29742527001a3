//! Scanner, parser, and declaration model for the **stage definition language**.
//!
//! This crate has no view dependencies so it can be consumed by tooling that
//! only needs to read definitions.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`declaration`] | `Declaration`, `PropertyText`, placeholder extraction |
//! | [`document`] | `Document`, the compiled name → declaration map |
//! | [`error`] | `StageError`, `ErrorKind`, `Annotate` |
//! | [`hierarchy`] | `ViewHierarchy` arena and `NodeId` |
//! | [`interpret`] | property-setter and view-hierarchy interpreters |
//! | [`parser`] | `Parser` and the `parse_str` entry point |
//! | [`preprocess`] | line splitting and `#--` comment stripping |
//! | [`scanner`] | `Scanner`, the value tokenizer used by converters |
//!
//! # Quick start
//!
//! ```rust
//! use stage_dsl::parse_str;
//!
//! let src = "Main:\n  Title\n  Body\n\nTitle:\n  .class = Label\n  .text = Hello #{name}\n";
//!
//! let doc = parse_str(src, "inline").unwrap();
//! let title = doc.get("Title").unwrap();
//! assert_eq!(title.property("text").unwrap().line, 7);
//! assert!(title.interpolants()["name"].contains("text"));
//! ```

pub mod declaration;
pub mod document;
pub mod error;
pub mod hierarchy;
pub mod interpret;
pub mod parser;
pub mod preprocess;
pub mod scanner;

pub use declaration::{Declaration, PropertyText, CLASS_PROPERTY};
pub use document::Document;
pub use error::{Annotate, ErrorKind, Result, StageError};
pub use hierarchy::{HierarchyNode, NodeId, ViewHierarchy, ROOT_NAME};
pub use parser::{parse_str, Parser};
pub use scanner::Scanner;
