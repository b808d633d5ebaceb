//! Wrapping filtered content in the markup for its file type
//!
//! Server-side script blocks need a one-time `Platform.Load` directive per
//! render pass. That flag lives on [`RenderContext`], which is created fresh
//! for every variant of every unit.

use std::path::Path;

use serde_json::Value;

use crate::manifest::serialization::scalar_to_string;
use crate::manifest::{OrderedMap, ServerSection};

/// Source file types the bundler distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Css,
    Js,
    Ssjs,
    Amp,
    Html,
    Other,
}

impl FileType {
    /// Determine the type from the file name's final extension
    pub fn from_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        match ext {
            "css" => FileType::Css,
            "js" => FileType::Js,
            "ssjs" => FileType::Ssjs,
            "amp" => FileType::Amp,
            "html" | "htm" => FileType::Html,
            _ => FileType::Other,
        }
    }

    /// Filename banner placed in front of a file's content
    ///
    /// The banner syntax matches the surrounding context: a markup comment
    /// between blocks, a script comment inside script blocks.
    pub fn banner(self, name: &str) -> String {
        let text = match self {
            FileType::Html => format!("<!-- *** file: {name} *** -->"),
            FileType::Css | FileType::Js | FileType::Ssjs => format!("/**** file: {name} ****/"),
            FileType::Amp => format!("%%[ /**** file: {name} ****/ ]%%"),
            FileType::Other => String::new(),
        };
        format!("\n{text}\n")
    }
}

/// Per-variant wrapping state
#[derive(Debug)]
pub struct RenderContext<'a> {
    script_attributes: &'a OrderedMap<Value>,
    core_version: Option<&'a str>,
    core_loaded: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(server: &'a ServerSection) -> Self {
        Self {
            script_attributes: &server.script_attributes,
            core_version: server.core_version.as_deref().filter(|v| !v.is_empty()),
            core_loaded: false,
        }
    }

    /// Wrap content according to its type
    pub fn wrap(&mut self, file_type: FileType, content: &str) -> String {
        match file_type {
            FileType::Css => format!("\n<style>\n{content}\n</style>\n"),
            FileType::Js => format!("\n<script type=\"text/javascript\">\n{content}\n</script>\n"),
            FileType::Ssjs => self.wrap_server_script(content),
            FileType::Amp => {
                format!("\n<div style=\"display:none\">\n%%[\n{content}\n]%%\n</div>\n")
            }
            FileType::Html | FileType::Other => format!("\n{content}\n"),
        }
    }

    fn wrap_server_script(&mut self, content: &str) -> String {
        let mut output = String::from("<script runat=\"server\"");
        for (key, value) in self.script_attributes.iter() {
            output.push_str(&format!(" {key}=\"{}\"", scalar_to_string(value)));
        }
        output.push_str(">\n");

        if !self.core_loaded {
            if let Some(version) = self.core_version {
                output.push_str(&format!("Platform.Load(\"core\", \"{version}\");\n"));
                self.core_loaded = true;
            }
        }

        output.push_str(content);
        output.push_str("\n</script>\n");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(core: Option<&str>, attrs: &str) -> ServerSection {
        ServerSection {
            core_version: core.map(str::to_string),
            script_attributes: serde_json::from_str(attrs).unwrap(),
            ..ServerSection::default()
        }
    }

    #[test]
    fn test_file_type_from_name() {
        assert_eq!(FileType::from_name("a/b/style.css"), FileType::Css);
        assert_eq!(FileType::from_name("app.min.js"), FileType::Js);
        assert_eq!(FileType::from_name("main.ssjs"), FileType::Ssjs);
        assert_eq!(FileType::from_name("vars.amp"), FileType::Amp);
        assert_eq!(FileType::from_name("body.html"), FileType::Html);
        assert_eq!(FileType::from_name("README"), FileType::Other);
    }

    #[test]
    fn test_banners() {
        assert_eq!(
            FileType::Html.banner("a.html"),
            "\n<!-- *** file: a.html *** -->\n"
        );
        assert_eq!(FileType::Ssjs.banner("x.ssjs"), "\n/**** file: x.ssjs ****/\n");
        assert_eq!(
            FileType::Amp.banner("v.amp"),
            "\n%%[ /**** file: v.amp ****/ ]%%\n"
        );
        assert_eq!(FileType::Other.banner("x"), "\n\n");
    }

    #[test]
    fn test_static_wrappers() {
        let section = ServerSection::default();
        let mut ctx = RenderContext::new(&section);
        assert_eq!(ctx.wrap(FileType::Css, "a{}"), "\n<style>\na{}\n</style>\n");
        assert_eq!(
            ctx.wrap(FileType::Js, "go();"),
            "\n<script type=\"text/javascript\">\ngo();\n</script>\n"
        );
        assert_eq!(
            ctx.wrap(FileType::Amp, "SET @a = 1"),
            "\n<div style=\"display:none\">\n%%[\nSET @a = 1\n]%%\n</div>\n"
        );
        assert_eq!(ctx.wrap(FileType::Other, "raw"), "\nraw\n");
    }

    #[test]
    fn test_core_directive_emitted_once() {
        let section = server(Some("1.1.1"), "{}");
        let mut ctx = RenderContext::new(&section);

        let first = ctx.wrap(FileType::Ssjs, "a();");
        let second = ctx.wrap(FileType::Ssjs, "b();");

        assert_eq!(
            first,
            "<script runat=\"server\">\nPlatform.Load(\"core\", \"1.1.1\");\na();\n</script>\n"
        );
        assert_eq!(second, "<script runat=\"server\">\nb();\n</script>\n");
        assert!(ctx.core_loaded);
    }

    #[test]
    fn test_fresh_context_loads_again() {
        let section = server(Some("1"), "{}");
        let mut first_pass = RenderContext::new(&section);
        first_pass.wrap(FileType::Ssjs, "a();");

        let mut second_pass = RenderContext::new(&section);
        assert!(second_pass.wrap(FileType::Ssjs, "a();").contains("Platform.Load"));
    }

    #[test]
    fn test_no_directive_without_core_version() {
        let section = server(None, "{}");
        let mut ctx = RenderContext::new(&section);
        assert!(!ctx.wrap(FileType::Ssjs, "a();").contains("Platform.Load"));
        assert!(!ctx.core_loaded);
    }

    #[test]
    fn test_script_attributes_in_order() {
        let section = server(None, r#"{"language": "javascript", "executionContext": "post"}"#);
        let mut ctx = RenderContext::new(&section);
        let out = ctx.wrap(FileType::Ssjs, "x");
        assert!(out.starts_with(
            "<script runat=\"server\" language=\"javascript\" executionContext=\"post\">\n"
        ));
    }
}
