//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "codexerrata".into()
    }

    pub fn heading() -> String {
        r#"Codex <span class="errata">Errata</span>"#.into()
    }

    pub fn stylesheet() -> String {
        "css/style.css".into()
    }

    pub fn title_suffix() -> String {
        "Tufte-Style Blog".into()
    }

    pub fn language() -> String {
        "en".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn posts() -> PathBuf {
        "posts".into()
    }

    pub fn template() -> PathBuf {
        "posts/post-template.html".into()
    }

    pub fn index() -> PathBuf {
        "index.html".into()
    }

    pub fn images() -> String {
        "images/".into()
    }
}

// ============================================================================
// [template] Section Defaults
// ============================================================================

pub mod template {
    pub fn page_title() -> String {
        "Post Title - Tufte-Style Blog".into()
    }

    pub fn post_title() -> String {
        "Your Post Title Here".into()
    }

    pub fn article_date() -> String {
        "{{ARTICLE_DATE}}".into()
    }

    pub fn math_scripts() -> String {
        "{{MATH_SCRIPTS}}".into()
    }

    pub fn convert_meta() -> String {
        "Date · Reading time".into()
    }
}
