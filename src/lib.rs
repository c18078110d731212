//! A streaming, character-at-a-time `.ini` config parser with section / key lookups.

mod error;
mod file;
mod options;
mod parser;
mod table;

#[cfg(test)]
mod tests;

pub use {error::*, file::*, options::*, parser::*, table::*};
