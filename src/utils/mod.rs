//! Utility modules for the blog builder.

pub mod date;
pub mod html;
pub mod slug;
