//! Restricted markdown to HTML fragment conversion.
//!
//! The pipeline is a fixed sequence of passes, each producing a new string:
//!
//! ```text
//! raw text
//!     │
//!     ├── directive::strip_leading()   drop `<!-- title/date -->` header lines
//!     ├── inline::render()             popups, emphasis, images, links, code, `> ` lines
//!     ├── block::render()              headings, list runs
//!     └── paragraph::group()           blank-line runs → <p> + spacing classes
//!     │
//!     ▼
//! HTML fragment
//! ```
//!
//! Cross-post references (`[[post:Title]]`) are resolved before this pipeline
//! runs, see [`crate::compiler::links`].
//!
//! Unmatched syntax is never an error: it is left in the output as literal text.

pub mod block;
pub mod directive;
pub mod inline;
pub mod paragraph;

pub use directive::{extract_date, extract_title};

/// Markers that identify math notation (rendered client side by KaTeX).
const MATH_MARKERS: &[&str] = &["$$", r"\(", r"\["];

/// Convert a markdown document into an HTML fragment.
pub fn render(markdown: &str) -> String {
    let body = directive::strip_leading(markdown);
    let html = inline::render(body);
    let html = block::render(&html);
    paragraph::group(&html)
}

/// Whether the text contains math notation.
pub fn has_math(text: &str) -> bool {
    MATH_MARKERS.iter().any(|marker| text.contains(marker))
}
