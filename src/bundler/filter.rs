//! Comment and whitespace filtering
//!
//! Purely textual: there is no tokenizer, so comment-like text inside string
//! literals (`"http://host"` preceded by whitespace, `"/* x */"`) is stripped
//! as well. Bundled output depends on this exact behaviour.
//!
//! Block and HTML comments end at their first terminator and may span any
//! number of lines. Line-oriented patterns stop at `\r` as well as `\n`, so
//! CRLF sources keep their line breaks until whitespace is collapsed.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

static DOC_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\*\*\s*\n(?:[^*]|\*+[^*/])*\*+/").expect("doc block regex is valid")
});

static BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment regex is valid"));

static TRAILING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\n]//[^\r\n]*").expect("line comment regex is valid"));

static LEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//[^\r\n]*").expect("leading comment regex is valid"));

static HTML: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("html comment regex is valid"));

static CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@charset [^\r\n]*;").expect("charset regex is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("whitespace regex is valid"));

/// Comment filter configured for one kind of unit
#[derive(Debug, Clone, Copy)]
pub struct CommentFilter {
    pub strip_html_comments: bool,
}

impl Default for CommentFilter {
    fn default() -> Self {
        Self {
            strip_html_comments: true,
        }
    }
}

impl CommentFilter {
    pub fn new(strip_html_comments: bool) -> Self {
        Self {
            strip_html_comments,
        }
    }

    /// Remove comments and collapse whitespace
    ///
    /// Order matters: doc blocks, block comments, trailing line comments,
    /// a line comment at the very start, HTML comments, `@charset`, then
    /// whitespace runs become a single space.
    pub fn filter(&self, text: &str) -> String {
        let text = DOC_BLOCK.replace_all(text, "");
        let text = BLOCK.replace_all(&text, "");
        let text = TRAILING_LINE.replace_all(&text, "");
        let text = LEADING_LINE.replace_all(&text, "");
        let text = if self.strip_html_comments {
            HTML.replace_all(&text, "").into_owned()
        } else {
            text.into_owned()
        };
        let text = CHARSET.replace_all(&text, "");
        WHITESPACE.replace_all(&text, " ").into_owned()
    }
}
