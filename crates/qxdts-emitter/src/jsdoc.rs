//! JSDoc text cleanup for declaration doc comments.
//!
//! Descriptions in class metadata are written for the qooxdoo API viewer and
//! contain a little HTML. Editors render the `.d.ts` comments as markdown, so
//! the common tags are converted.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::{Component, Path, PathBuf};

static PARAGRAPH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?p>").expect("valid regex"));

/// `{@link #member}`, a link to a member of the documented class.
static LOCAL_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{@link #([^}]+)\}").expect("valid regex"));

/// `<pre class='lang'>[<code>]body[</code>]</pre>`. The quote characters
/// around the language are not checked, so any single character matches.
static PRE_BLOCK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<pre\sclass=.([^>]+?).>(?:<code>)?((?s:.*?))(?:</code>)?</pre>")
        .expect("valid regex")
});

static INLINE_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<code>(.*?)</code>").expect("valid regex"));

/// Convert an API-viewer description into markdown-ish comment text.
///
/// - `<p>` and `</p>` are dropped
/// - `{@link #member}` becomes `{@link <class_name>.member}`
/// - the first `<pre class='lang'>` block becomes a fenced code block
/// - the first single-line `<code>x</code>` becomes `` `x` ``
pub fn fixup_description(source: &str, class_name: &str) -> String {
    let text = PARAGRAPH_RE.replace_all(source, "");
    let text = LOCAL_LINK_RE.replace_all(&text, |caps: &Captures<'_>| {
        format!("{{@link {class_name}.{}}}", &caps[1])
    });
    let text = PRE_BLOCK_RE.replace(&text, "```${1}${2}```");
    INLINE_CODE_RE.replace(&text, "`${1}`").into_owned()
}

/// Path from `from` (a directory) to `to`, both taken component-wise.
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from_components: Vec<_> = from
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let to_components: Vec<_> = to
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let mut common = 0;
    while common < from_components.len()
        && common < to_components.len()
        && from_components[common] == to_components[common]
    {
        common += 1;
    }

    let mut result = PathBuf::new();
    for _ in common..from_components.len() {
        result.push("..");
    }
    for component in &to_components[common..] {
        result.push(component.as_os_str());
    }

    if result.as_os_str().is_empty() {
        result.push(".");
    }

    result
}

/// Forward-slash rendering used in comment links on every platform.
pub fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "tests/jsdoc_tests.rs"]
mod tests;
