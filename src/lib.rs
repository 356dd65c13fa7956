//! Compile a needle into a regular expression that matches its Unicode
//! variants: accented letters, compatibility forms, ligatures and look-alikes.
//!
//! # Example
//!
//! ```rust
//! use regex::RegexBuilder;
//!
//! let pattern = unicode_variants::compile("TM");
//! let regex = RegexBuilder::new(&format!("^(?:{pattern})$"))
//!     .case_insensitive(true)
//!     .build()
//!     .unwrap();
//!
//! assert!(regex.is_match("tm"));
//! assert!(regex.is_match("™"));
//! assert!(regex.is_match("ⓉM"));
//! ```
//!
//! The pattern carries no anchors or flags; apply case-insensitive matching
//! when compiling it.

pub mod compiler;
pub mod config;
pub mod fold;
pub mod pattern;
pub mod split;
pub mod table;

pub use compiler::{compile, compile_with};
pub use config::{CodePointRange, ConfigError, DEFAULT_CODE_POINTS};
pub use fold::fold;
pub use split::{Splits, splits};
pub use table::{VariantTable, initialize};
