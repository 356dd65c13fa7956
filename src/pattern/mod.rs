//! Pattern assembly.
//!
//! | Input                      | Output            |
//! |----------------------------|-------------------|
//! | `["a", "b"]` alternatives  | `[ab]`            |
//! | `["ab", "a"]` alternatives | `(?:ab\|a)`       |
//! | `["a", "a", "b"]` sequence | `a{2}b`           |
//! | `["tm"]` mapped            | `(?:tm\|™)`       |
//!
//! Rendering is pure string work; mapping consults a [`VariantTable`].
//!
//! [`VariantTable`]: crate::table::VariantTable

pub mod assemble;
pub mod render;

pub use assemble::{map_sequence, splits_to_pattern};
pub use render::{array_to_pattern, is_atom, is_single_char, sequence_pattern};
