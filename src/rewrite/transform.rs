// slotmod-rs: Mod Slot Matcher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Phase 8: textual micro-transforms.
//!
//! ```text
//! if $a != 1              ->  if ($a > 1 || $a < 1)
//! condition = $x == 1     ->  condition = $x ++ 1
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::Workspace;
use crate::dialect::text::is_identifier_char;
use crate::error::Incident;

/// An operand is a parenthesised group (one level of nesting), a quoted
/// string, or a run of variable/number characters.
static INEQUALITY: LazyLock<Regex> = LazyLock::new(|| {
    let operand = r#"(\((?:[^()]|\([^()]*\))*\)|"[^"]*"|'[^']*'|[\w$\\.\-]+)"#;
    Regex::new(&format!(r"{operand}\s*!=\s*{operand}")).expect("inequality pattern is valid")
});

/// Rewrites every `A != B` into `(A > B || A < B)`.
///
/// Applying it twice gives the same text as applying it once. A `!=` whose
/// operands cannot be delimited is left in place; callers check for it.
#[must_use]
pub fn rewrite_inequalities(line: &str) -> Cow<'_, str> {
    if !line.contains("!=") {
        return Cow::Borrowed(line);
    }
    INEQUALITY.replace_all(line, "(${1} > ${2} || ${1} < ${2})")
}

/// Replaces every `=` in the value of a line whose key is `key` with `+`.
///
/// Returns `None` when the line is not a `key = value` line for `key` or
/// its value has no `=`.
#[must_use]
pub fn rewrite_plus_value(line: &str, key: &str) -> Option<String> {
    if key.is_empty() {
        return None;
    }
    let trimmed = line.trim_start();
    let head = trimmed.get(..key.len())?;
    if !head.eq_ignore_ascii_case(key) {
        return None;
    }
    let rest = &trimmed[key.len()..];
    if rest.starts_with(is_identifier_char) || !rest.trim_start().starts_with('=') {
        return None;
    }

    let eq = line.len() - trimmed.len() + key.len() + (rest.len() - rest.trim_start().len());
    let (left, value) = line.split_at(eq + 1);
    if !value.contains('=') {
        return None;
    }
    Some(format!("{left}{}", value.replace('=', "+")))
}

impl Workspace<'_> {
    /// Phase 8: applies both micro-transforms to every line.
    pub(super) fn transform(&mut self) {
        self.log.enter_phase("transform");
        let plus_key = self.dialect.plus_value_key.clone();

        for config in &mut self.configs {
            self.log.set_file(config.name());
            let mut changed = 0usize;
            for (index, line) in config.text.lines.iter_mut().enumerate() {
                let mut next = rewrite_inequalities(line).into_owned();
                if next.contains("!=") {
                    self.log.warn(
                        Incident::StructuralAmbiguity,
                        format!(
                            "line {}: cannot rewrite inequality in '{}'",
                            index + 1,
                            next.trim()
                        ),
                    );
                }
                if let Some(plus) = rewrite_plus_value(&next, &plus_key) {
                    next = plus;
                }
                if next != *line {
                    *line = next;
                    changed += 1;
                }
            }
            if changed > 0 {
                self.log.info(format!("rewrote {changed} line(s)"));
            }
        }
        self.log.clear_file();
    }
}
