//! Terminal front end.
//!
//! Key mapping and drawing live here so they can be tested against
//! `ratatui`'s `TestBackend`. Raw-mode setup and the terminal itself stay in
//! the `sort-tui` binary.

#[cfg(feature = "tui")]
pub mod keys;
#[cfg(feature = "tui")]
pub mod view;

#[cfg(test)]
#[cfg(feature = "tui")]
mod tests;
