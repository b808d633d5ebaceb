//! Template expansion: one source set, many outputs
//!
//! A template is a named list of literal search → replacement pairs. Both
//! operations are identities when no template is requested or the manifest
//! does not define the requested one.

use crate::manifest::{Manifest, Substitutions};

/// Look up a template by name
pub fn resolve<'m>(manifest: &'m Manifest, template: Option<&str>) -> Option<&'m Substitutions> {
    template.and_then(|name| manifest.template.get(name))
}

/// Replace every search string of the template in `text`
///
/// A single left-to-right scan: at each position the earliest match wins,
/// ties go to the pair declared first, and inserted replacement text is
/// never scanned again.
pub fn apply_template(manifest: &Manifest, template: Option<&str>, text: &str) -> String {
    match resolve(manifest, template) {
        Some(substitutions) => substitute(substitutions, text),
        None => text.to_string(),
    }
}

/// Insert `-{template}` before the final extension of `path`
pub fn derive_file_name(manifest: &Manifest, template: Option<&str>, path: &str) -> String {
    match template {
        Some(name) if resolve(manifest, template).is_some() => insert_suffix(path, name),
        _ => path.to_string(),
    }
}

fn substitute(substitutions: &Substitutions, text: &str) -> String {
    let pairs: Vec<(&str, &String)> = substitutions
        .iter()
        .filter(|(search, _)| !search.is_empty())
        .collect();

    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let next = pairs
            .iter()
            .filter_map(|(search, replacement)| {
                rest.find(search)
                    .map(|index| (index, search.len(), replacement))
            })
            .min_by_key(|(index, _, _)| *index);

        match next {
            Some((index, len, replacement)) => {
                output.push_str(&rest[..index]);
                output.push_str(replacement);
                rest = &rest[index + len..];
            }
            None => {
                output.push_str(rest);
                return output;
            }
        }
    }
}

fn insert_suffix(path: &str, suffix: &str) -> String {
    let file_start = path.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match path[file_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let dot = file_start + dot;
            format!("{}-{suffix}{}", &path[..dot], &path[dot..])
        }
        _ => format!("{path}-{suffix}"),
    }
}
