//! TeX escaping of FictionBook character data.
//!
//! Normal text goes through a fixed, ordered pipeline of substitutions.
//! Each rule scans the output of the previous one, so the order is part of
//! the contract: the backslash rule must run first so that later rules can
//! emit TeX commands, and the special-character rule escapes the `$` signs
//! of the backslash placeholder, which the repair rule then restores.
//!
//! | # | Input                         | Output                       |
//! |---|-------------------------------|------------------------------|
//! | 1 | `\`                           | `$\backslash$`               |
//! | 2 | `& $ % # _ { }`               | `\&` `\$` ...                |
//! | 3 | `\$\backslash\$`              | `$\backslash$`               |
//! | 4 | leading `–` (direct speech)   | `\cdash--*`                  |
//! | 5 | `...`                         | `\ldots{}`                   |
//! | 6 | `^` `~`                       | `\textasciicircum{}` ...     |
//! | 7 | `«` `»`                       | `<<` `>>`                    |
//! | 8 | `–`, spaced `—`               | `--`, `---`                  |
//! | 9 | `"`                           | `\symbol{34}`                |
//! | 10| `„` `“`                       | ` `` ` `''`                  |
//! | 11| `[12]`                        | `\string[12\string]`         |
//! | 12| `¦`                           | `\|`                         |
//! | 13| `±`                           | `$\pm$`                      |
//!
//! The pipeline is not idempotent: escaping already-escaped text escapes
//! the generated commands again.

use once_cell::sync::Lazy;
use regex::Regex;

static SPECIAL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[&$%#_{}]").unwrap());
static FOOTNOTE_MARK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([0-9]+)\]").unwrap());

const BACKSLASH: &str = r"$\backslash$";
const BROKEN_BACKSLASH: &str = r"\$\backslash\$";

type Rule = fn(&str) -> String;

/// The normal-text pipeline, in application order.
const PIPELINE: [Rule; 13] = [
    escape_backslash,
    escape_special_chars,
    repair_backslash,
    direct_speech_dash,
    ellipsis,
    caret_and_tilde,
    guillemets,
    dashes,
    double_quotes,
    low_high_quotes,
    footnote_marks,
    broken_bar,
    plus_minus,
];

/// Escape text for inclusion in TeX output.
///
/// With `literal` set the text is destined for a `verbatim` environment and
/// is left as is, except that an embedded `\end{verbatim}` is broken up so
/// it cannot terminate the environment early.
///
/// # Examples
///
/// ```
/// use fb2tex::latex::escape;
///
/// assert_eq!(escape("50% off", false), r"50\% off");
/// assert_eq!(escape("a...b", false), r"a\ldots{}b");
/// assert_eq!(escape("x_y", true), "x_y");
/// ```
pub fn escape(text: &str, literal: bool) -> String {
    if text.is_empty() {
        return String::new();
    }
    if literal {
        return text.replace(r"\end{verbatim}", r"\end {verbatim}");
    }

    let mut result = text.to_string();
    for rule in PIPELINE {
        result = rule(&result);
    }
    result
}

fn escape_backslash(s: &str) -> String {
    s.replace('\\', BACKSLASH)
}

fn escape_special_chars(s: &str) -> String {
    SPECIAL_CHARS.replace_all(s, r"\$0").into_owned()
}

fn repair_backslash(s: &str) -> String {
    s.replace(BROKEN_BACKSLASH, BACKSLASH)
}

/// Russian direct speech opens a paragraph with an EN DASH.
fn direct_speech_dash(s: &str) -> String {
    match s.strip_prefix('\u{2013}') {
        Some(rest) => format!(r"\cdash--*{rest}"),
        None => s.to_string(),
    }
}

fn ellipsis(s: &str) -> String {
    s.replace("...", r"\ldots{}")
}

fn caret_and_tilde(s: &str) -> String {
    s.replace('^', r"\textasciicircum{}")
        .replace('~', r"\textasciitilde{}")
}

fn guillemets(s: &str) -> String {
    s.replace('\u{00AB}', "<<").replace('\u{00BB}', ">>")
}

/// EN DASH becomes `--`; an EM DASH becomes `---` only with whitespace on
/// both sides. Neighbours are inspected, not consumed, so a space shared by
/// two dashes counts for both.
fn dashes(s: &str) -> String {
    let s = s.replace('\u{2013}', "--");
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    for (i, &c) in chars.iter().enumerate() {
        let spaced = c == '\u{2014}'
            && i > 0
            && chars[i - 1].is_whitespace()
            && chars.get(i + 1).is_some_and(|n| n.is_whitespace());
        if spaced {
            out.push_str("---");
        } else {
            out.push(c);
        }
    }
    out
}

fn double_quotes(s: &str) -> String {
    s.replace('"', r"\symbol{34}")
}

/// `„quoted“`, used for a quote inside another quote.
fn low_high_quotes(s: &str) -> String {
    s.replace('\u{201E}', "``").replace('\u{201C}', "''")
}

fn footnote_marks(s: &str) -> String {
    FOOTNOTE_MARK
        .replace_all(s, r"\string[${1}\string]")
        .into_owned()
}

fn broken_bar(s: &str) -> String {
    s.replace('\u{00A6}', "|")
}

fn plus_minus(s: &str) -> String {
    s.replace('\u{00B1}', r"$\pm$")
}
