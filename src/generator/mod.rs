//! Site-level pages generated from the built posts.

pub mod index;
