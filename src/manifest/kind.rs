//! Unit kinds and the manifest file each one is discovered by

/// The kind of bundling unit a manifest describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    CloudPage,
    Email,
    Library,
}

impl UnitKind {
    /// Manifest file name searched for during discovery
    pub fn manifest_file_name(self) -> &'static str {
        match self {
            UnitKind::CloudPage => "cloudpage.json",
            UnitKind::Email => "email.json",
            UnitKind::Library => "sfmc-lib.json",
        }
    }

    /// Plural label used in summaries ("Found 3 cloudpages")
    pub fn plural(self) -> &'static str {
        match self {
            UnitKind::CloudPage => "cloudpages",
            UnitKind::Email => "emails",
            UnitKind::Library => "libraries",
        }
    }

    /// CLI command that processes this kind
    pub fn command(self) -> &'static str {
        match self {
            UnitKind::CloudPage => "cloudPages",
            UnitKind::Email => "emails",
            UnitKind::Library => "library",
        }
    }

    /// Emails keep HTML comments: Outlook conditional comments are markup there
    pub fn strips_html_comments(self) -> bool {
        !matches!(self, UnitKind::Email)
    }
}
