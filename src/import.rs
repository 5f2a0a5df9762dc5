//! `@import` inlining for stylesheets read from disk.
//!
//! Each `@import url(x);`, `@import "x";` or `@import 'x';` whose target is a
//! local file is replaced by that file's contents, itself inlined first.
//! Imports carrying a media list, remote targets and unreadable files stay
//! in the text as written and are left for the parser to record.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::diagnostics::{Component, Diagnostics};

static IMPORT_RULE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)@import\s*(?:url\(\s*(?:"([^"]*)"|'([^']*)'|([^)"'\s]*))\s*\)|"([^"]*)"|'([^']*)')([^;]*);"#,
    )
    .ok()
});

/// Inline the local `@import`s of `css`, resolving paths against `base_dir`.
pub fn inline_imports(css: &str, base_dir: &Path, diagnostics: &mut Diagnostics) -> String {
    let mut visiting = HashSet::new();
    inline(css, base_dir, &mut visiting, diagnostics)
}

fn inline(
    css: &str,
    base_dir: &Path,
    visiting: &mut HashSet<PathBuf>,
    diagnostics: &mut Diagnostics,
) -> String {
    let Some(rule) = IMPORT_RULE.as_ref() else {
        return css.to_string();
    };

    let mut out = String::with_capacity(css.len());
    let mut last = 0;
    for caps in rule.captures_iter(css) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&css[last..whole.start()]);
        last = whole.end();

        let line = css[..whole.start()].matches('\n').count() + 1;
        let target = target(&caps);
        let media = caps.get(6).map_or("", |m| m.as_str()).trim();

        if !media.is_empty() {
            diagnostics.warn(
                Component::Import,
                line,
                format!("Kept @import of {target} with media list \"{media}\""),
            );
            out.push_str(whole.as_str());
            continue;
        }
        if is_remote(target) {
            diagnostics.warn(Component::Import, line, format!("Kept remote @import of {target}"));
            out.push_str(whole.as_str());
            continue;
        }

        let path = base_dir.join(target);
        let key = path.canonicalize().unwrap_or_else(|_| path.clone());
        if visiting.contains(&key) {
            diagnostics.warn(
                Component::Import,
                line,
                format!("Dropped circular @import of {target}"),
            );
            continue;
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(target: "csstidy::import", path = %path.display(), "inlining import");
                let dir = path.parent().map_or_else(|| base_dir.to_path_buf(), Path::to_path_buf);
                visiting.insert(key.clone());
                out.push_str(&inline(&contents, &dir, visiting, diagnostics));
                visiting.remove(&key);
                diagnostics.info(Component::Import, line, format!("Inlined @import of {target}"));
            }
            Err(err) => {
                diagnostics.warn(
                    Component::Import,
                    line,
                    format!("Could not read @import of {target}: {err}"),
                );
                out.push_str(whole.as_str());
            }
        }
    }
    out.push_str(&css[last..]);
    out
}

/// First non-empty target group of an import match.
fn target<'c>(caps: &Captures<'c>) -> &'c str {
    (1..=5)
        .filter_map(|i| caps.get(i))
        .map(|m| m.as_str())
        .next()
        .unwrap_or("")
}

fn is_remote(target: &str) -> bool {
    let lower = target.to_ascii_lowercase();
    lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("//")
}
