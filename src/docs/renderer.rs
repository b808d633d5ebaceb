//! Markdown rendering of documentation comments
//!
//! Understands the common subset of JSDoc: free-text description,
//! `@param {Type} name - text`, `@returns {Type} text`, `@example`,
//! `@name`, `@private`, `@deprecated`. The documented symbol is taken from the
//! declaration line following the comment.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use super::config::DocsConfig;
use crate::path_utils;

static DOC_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*\*(.*?)\*/").expect("doc comment regex is valid"));

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?:export\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)",
        r"|^(?:var|let|const)\s+([A-Za-z_$][\w$]*)",
        r"|^([A-Za-z_$][\w$.]*)\s*[:=]",
        r"|^([A-Za-z_$][\w$]*)\s*\(",
    ))
    .expect("declaration regex is valid")
});

static PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\{([^}]*)\}\s*)?\[?([\w$.]+)(?:=[^\]]*)?\]?\s*(?:-\s*)?(.*)$")
        .expect("param regex is valid")
});

static RETURNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\{([^}]*)\}\s*)?(?:-\s*)?(.*)$").expect("returns regex is valid")
});

/// No file matched the documentation pattern
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no matching files: {pattern}")]
pub struct NoMatchingFiles {
    pub pattern: String,
}

/// Renders documentation for the files of a unit that match a glob
pub trait DocRenderer {
    /// Render all files below `unit_dir` matching `pattern` into markdown
    fn render(&self, unit_dir: &Path, pattern: &str) -> Result<String, NoMatchingFiles>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Param {
    name: String,
    type_name: String,
    description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct DocBlock {
    name: Option<String>,
    description: Vec<String>,
    params: Vec<Param>,
    returns: Option<(String, String)>,
    examples: Vec<Vec<String>>,
    private: bool,
    deprecated: bool,
}

/// Built-in JSDoc-style renderer
#[derive(Debug, Clone, Default)]
pub struct JsDocRenderer {
    config: DocsConfig,
}

impl JsDocRenderer {
    pub fn new(config: DocsConfig) -> Self {
        Self { config }
    }

    fn heading(&self, extra_depth: usize, text: &str) -> String {
        let depth = (self.config.heading_depth + extra_depth).min(6);
        format!("{} {text}", "#".repeat(depth))
    }

    fn render_file(&self, rel_path: &str, source: &str) -> Vec<String> {
        let blocks: Vec<DocBlock> = parse_blocks(source)
            .into_iter()
            .filter(|b| b.name.is_some() && (self.config.private || !b.private))
            .collect();
        if blocks.is_empty() {
            return Vec::new();
        }

        let mut sections = Vec::new();
        let symbol_depth = if self.config.file_headings {
            sections.push(self.heading(0, &format!("`{rel_path}`")));
            1
        } else {
            0
        };

        for block in blocks {
            sections.push(self.render_block(symbol_depth, &block));
        }
        sections
    }

    fn render_block(&self, depth: usize, block: &DocBlock) -> String {
        let mut out = vec![self.heading(depth, block.name.as_deref().unwrap_or_default())];

        if block.deprecated {
            out.push("**Deprecated**".to_string());
        }
        if !block.description.is_empty() {
            out.push(block.description.join("\n"));
        }
        if !block.params.is_empty() {
            let mut table = vec![
                "| Param | Type | Description |".to_string(),
                "| --- | --- | --- |".to_string(),
            ];
            for p in &block.params {
                let type_cell = if p.type_name.is_empty() {
                    String::new()
                } else {
                    format!("`{}`", p.type_name)
                };
                table.push(format!("| {} | {type_cell} | {} |", p.name, p.description));
            }
            out.push(table.join("\n"));
        }
        if let Some((type_name, description)) = &block.returns {
            let mut line = "**Returns**:".to_string();
            if !type_name.is_empty() {
                line.push_str(&format!(" `{type_name}`"));
            }
            if !description.is_empty() {
                line.push_str(&format!(" - {description}"));
            }
            out.push(line);
        }
        for example in &block.examples {
            out.push(format!("**Example**\n```js\n{}\n```", example.join("\n")));
        }

        out.join("\n\n")
    }
}

impl DocRenderer for JsDocRenderer {
    fn render(&self, unit_dir: &Path, pattern: &str) -> Result<String, NoMatchingFiles> {
        let no_match = || NoMatchingFiles {
            pattern: pattern.to_string(),
        };
        let files = matching_files(unit_dir, pattern);
        if files.is_empty() {
            return Err(no_match());
        }

        let mut sections = Vec::new();
        for path in &files {
            let Ok(source) = std::fs::read_to_string(path) else {
                continue;
            };
            let rel = path_utils::relative_to(unit_dir, path);
            sections.extend(self.render_file(&rel, &source));
        }

        if sections.is_empty() {
            return Err(no_match());
        }
        Ok(format!("{}\n", sections.join("\n\n")))
    }
}

/// Files below `dir` whose forward-slashed relative path matches `pattern`
fn matching_files(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let Ok(glob) = Glob::new(pattern) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let rel = path_utils::relative_to(dir, e.path());
            glob.matched(&CandidatePath::from(rel.as_str())).is_some()
        })
        .map(walkdir::DirEntry::into_path)
        .collect();

    files.sort();
    files
}

fn declared_name(after_comment: &str) -> Option<String> {
    let line = after_comment.lines().map(str::trim).find(|l| !l.is_empty())?;
    let caps = DECLARATION.captures(line)?;
    (1..=4)
        .find_map(|i| caps.get(i))
        .map(|m| m.as_str().to_string())
}

fn parse_blocks(source: &str) -> Vec<DocBlock> {
    DOC_COMMENT
        .captures_iter(source)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?.as_str();
            let mut block = parse_body(body);
            if block.name.is_none() {
                block.name = declared_name(&source[whole.end()..]);
            }
            Some(block)
        })
        .collect()
}

fn strip_star(line: &str) -> &str {
    let trimmed = line.trim_start();
    let without = trimmed.strip_prefix('*').unwrap_or(trimmed);
    without.strip_prefix(' ').unwrap_or(without).trim_end()
}

fn parse_body(body: &str) -> DocBlock {
    let mut block = DocBlock::default();
    let mut in_example = false;

    for raw in body.lines() {
        let line = strip_star(raw);

        if let Some(tag_line) = line.strip_prefix('@') {
            in_example = false;
            let (tag, rest) = tag_line
                .split_once(char::is_whitespace)
                .map_or((tag_line, ""), |(t, r)| (t, r.trim()));
            match tag {
                "param" | "arg" | "argument" => {
                    if let Some(caps) = PARAM.captures(rest) {
                        block.params.push(Param {
                            type_name: caps.get(1).map_or("", |m| m.as_str()).to_string(),
                            name: caps.get(2).map_or("", |m| m.as_str()).to_string(),
                            description: caps.get(3).map_or("", |m| m.as_str()).to_string(),
                        });
                    }
                }
                "returns" | "return" => {
                    if let Some(caps) = RETURNS.captures(rest) {
                        block.returns = Some((
                            caps.get(1).map_or("", |m| m.as_str()).to_string(),
                            caps.get(2).map_or("", |m| m.as_str()).to_string(),
                        ));
                    }
                }
                "example" => {
                    in_example = true;
                    block.examples.push(Vec::new());
                }
                "name" | "function" | "method" if !rest.is_empty() => {
                    block.name = Some(rest.to_string());
                }
                "private" => block.private = true,
                "deprecated" => block.deprecated = true,
                _ => {}
            }
            continue;
        }

        if in_example {
            if let Some(example) = block.examples.last_mut() {
                example.push(line.to_string());
            }
        } else if !line.is_empty() || !block.description.is_empty() {
            block.description.push(line.to_string());
        }
    }

    while block.description.last().is_some_and(String::is_empty) {
        block.description.pop();
    }
    for example in &mut block.examples {
        while example.last().is_some_and(String::is_empty) {
            example.pop();
        }
    }
    block
}
