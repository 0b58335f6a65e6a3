//! Crate-private helpers.

#[cfg(test)]
#[macro_use]
pub mod test_utils;
pub mod utils;
