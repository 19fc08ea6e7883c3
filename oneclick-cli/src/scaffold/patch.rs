//! Idempotent text patching of shared PHP files
//!
//! A patch is a list of [`PatchRule`]s. Each rule knows how to detect that
//! it has already been applied, so running the same patch twice leaves the
//! text unchanged the second time.

use std::fmt;

use regex::Regex;
use similar::TextDiff;

/// A rule could not find the place it inserts at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorMissing {
    /// Description of the missing anchor
    pub anchor: String,
}

impl fmt::Display for AnchorMissing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anchor not found: {}", self.anchor)
    }
}

impl std::error::Error for AnchorMissing {}

/// A single idempotent text transformation
pub trait PatchRule {
    /// Short description for reports
    fn describe(&self) -> String;

    /// Whether the text already carries this rule's change
    fn is_applied(&self, text: &str) -> bool;

    /// Apply the change; only called when [`PatchRule::is_applied`] is false
    ///
    /// # Errors
    ///
    /// Returns [`AnchorMissing`] if the insertion point cannot be located.
    fn apply(&self, text: &str) -> Result<String, AnchorMissing>;
}

/// Result of running a patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// Patched text
    pub text: String,
    /// Descriptions of the rules that changed the text
    pub applied: Vec<String>,
    /// Descriptions of the rules that were already satisfied
    pub skipped: Vec<String>,
}

/// Run `rules` in order against `text`
///
/// # Errors
///
/// Returns the first [`AnchorMissing`] raised by a rule.
pub fn apply_rules(text: &str, rules: &[&dyn PatchRule]) -> Result<PatchOutcome, AnchorMissing> {
    let mut current = text.to_string();
    let mut applied = Vec::new();
    let mut skipped = Vec::new();

    for rule in rules {
        if rule.is_applied(&current) {
            skipped.push(rule.describe());
            continue;
        }
        current = rule.apply(&current)?;
        applied.push(rule.describe());
    }

    Ok(PatchOutcome {
        text: current,
        applied,
        skipped,
    })
}

/// Unified diff between two versions of a file
#[must_use]
pub fn unified_diff(old: &str, new: &str, label: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(2)
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}

/// Where [`InsertAfter`] places its content
#[derive(Debug, Clone)]
pub enum Anchor {
    /// Right after the first match of the pattern
    Pattern(Regex),
    /// At the end of the text, on a fresh line
    EndOfFile,
}

/// Insert content at an anchor unless a marker is already present
#[derive(Debug, Clone)]
pub struct InsertAfter {
    description: String,
    anchor: Anchor,
    content: String,
    marker: String,
}

impl InsertAfter {
    /// Insert `content` at `anchor` unless `marker` occurs in the text
    pub fn new(
        description: impl Into<String>,
        anchor: Anchor,
        content: impl Into<String>,
        marker: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            anchor,
            content: content.into(),
            marker: marker.into(),
        }
    }
}

impl PatchRule for InsertAfter {
    fn describe(&self) -> String {
        self.description.clone()
    }

    fn is_applied(&self, text: &str) -> bool {
        text.contains(&self.marker)
    }

    fn apply(&self, text: &str) -> Result<String, AnchorMissing> {
        match &self.anchor {
            Anchor::Pattern(pattern) => {
                let found = pattern.find(text).ok_or_else(|| AnchorMissing {
                    anchor: pattern.as_str().to_string(),
                })?;
                let mut patched = String::with_capacity(text.len() + self.content.len());
                patched.push_str(&text[..found.end()]);
                patched.push_str(&self.content);
                patched.push_str(&text[found.end()..]);
                Ok(patched)
            }
            Anchor::EndOfFile => {
                let mut patched = text.to_string();
                if !patched.is_empty() && !patched.ends_with('\n') {
                    patched.push('\n');
                }
                patched.push_str(&self.content);
                Ok(patched)
            }
        }
    }
}

/// Make sure the file imports every listed class
#[derive(Debug, Clone)]
pub struct EnsureUseStatements {
    statements: Vec<String>,
}

impl EnsureUseStatements {
    /// Statements given as full lines (`use Illuminate\Http\Request;`)
    pub fn new<I, S>(statements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            statements: statements.into_iter().map(Into::into).collect(),
        }
    }

    fn missing<'a>(&'a self, text: &str) -> Vec<&'a str> {
        self.statements
            .iter()
            .filter(|statement| !text.lines().any(|line| line.trim() == statement.as_str()))
            .map(String::as_str)
            .collect()
    }
}

impl PatchRule for EnsureUseStatements {
    fn describe(&self) -> String {
        "import statements".to_string()
    }

    fn is_applied(&self, text: &str) -> bool {
        self.missing(text).is_empty()
    }

    fn apply(&self, text: &str) -> Result<String, AnchorMissing> {
        let missing = self.missing(text);
        if missing.is_empty() {
            return Ok(text.to_string());
        }

        // After the last top-level import, otherwise right after the open tag.
        let mut offset = 0;
        let mut last_use_end = None;
        for line in text.split_inclusive('\n') {
            if line.starts_with("use ") {
                last_use_end = Some(offset + line.trim_end_matches(['\r', '\n']).len());
            }
            offset += line.len();
        }

        let (position, prefix) = match last_use_end {
            Some(end) => (end, "\n"),
            None => {
                let open = text.find("<?php").ok_or_else(|| AnchorMissing {
                    anchor: "<?php".to_string(),
                })?;
                (open + "<?php".len(), "\n\n")
            }
        };

        let mut patched = String::with_capacity(text.len() + 64);
        patched.push_str(&text[..position]);
        patched.push_str(prefix);
        patched.push_str(&missing.join("\n"));
        patched.push_str(&text[position..]);
        Ok(patched)
    }
}

/// Replace a fluent `->method(...)` call, or insert it when absent
///
/// The replaced span runs from the start of the call's line to its matching
/// closing parenthesis, so whatever is chained after it survives.
#[derive(Debug, Clone)]
pub struct UpsertCall {
    method: &'static str,
    block: String,
    after: &'static str,
}

impl UpsertCall {
    /// `block` replaces `->method(...)`; when absent it goes after the call
    /// to `after` (a method name, or a full token such as `Application::configure`)
    pub fn new(method: &'static str, block: impl Into<String>, after: &'static str) -> Self {
        Self {
            method,
            block: block.into(),
            after,
        }
    }

    fn token(method: &str) -> String {
        if method.contains("::") {
            format!("{method}(")
        } else {
            format!("->{method}(")
        }
    }

    fn find_call(text: &str, method: &str) -> Option<(usize, usize)> {
        let token = Self::token(method);
        let start = text.find(&token)?;
        let close = matching_paren(text, start + token.len() - 1)?;
        Some((start, close + 1))
    }
}

impl PatchRule for UpsertCall {
    fn describe(&self) -> String {
        format!("->{}(...)", self.method)
    }

    fn is_applied(&self, text: &str) -> bool {
        text.contains(&self.block)
    }

    fn apply(&self, text: &str) -> Result<String, AnchorMissing> {
        let missing = |method: &str| AnchorMissing {
            anchor: Self::token(method),
        };

        if let Some(start) = text.find(&Self::token(self.method)) {
            let (_, end) = Self::find_call(text, self.method).ok_or_else(|| missing(self.method))?;
            let line_start = text[..start].rfind('\n').map_or(0, |i| i + 1);
            let (from, prefix) = if text[line_start..start].trim().is_empty() {
                (line_start, "")
            } else {
                (start, "\n")
            };
            return Ok(format!(
                "{}{prefix}{}{}",
                &text[..from],
                self.block,
                &text[end..]
            ));
        }

        let (_, end) = Self::find_call(text, self.after).ok_or_else(|| missing(self.after))?;
        Ok(format!("{}\n{}{}", &text[..end], self.block, &text[end..]))
    }
}

/// Index of the parenthesis closing the one at `open`
///
/// String literals and comments are skipped, so parentheses inside
/// `'...'`, `"..."`, `// ...` and `/* ... */` do not count.
#[must_use]
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            quote @ (b'\'' | b'"') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}
