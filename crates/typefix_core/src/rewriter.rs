use log::trace;
use std::collections::HashSet;

/// Where the scan currently sits relative to an import statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InImport,
    InImportBraces,
}

/// Rewrites every import statement in `fileText` so that names present
/// in `catalog` carry a `type` marker. When `consolidate` is set and a
/// statement imports nothing but type names, the per-name markers are
/// merged into a single statement-level `import type`.
///
/// Pure function of its inputs; callers do the surrounding I/O. Tokens
/// not touched by the rewrite are reproduced byte-for-byte, so a file
/// without imports comes back identical.
pub fn rewrite_imports(text: &str, catalog: &HashSet<String>, consolidate: bool) -> String {
    // Consolidation needs random access to already-emitted tokens of the
    // current statement, so the pass buffers tokens rather than streaming.
    let mut out: Vec<String> = Vec::new();
    let mut state = State::Outside;
    // Index in `out` of the current statement's `import` token.
    let mut stmt_start = 0usize;
    // Statement imports at least one runtime (non-type) name.
    let mut has_concrete = false;
    // Statement already reads `import type ...`; leave it untouched.
    let mut stmt_type_only = false;
    // The previous word token was an existing per-name `type` marker.
    let mut pending_marker = false;

    for token in tokenize(text) {
        let trimmed = token.trim();
        match state {
            State::Outside => {
                if token == "import" {
                    state = State::InImport;
                    stmt_start = out.len();
                    has_concrete = false;
                    stmt_type_only = false;
                    pending_marker = false;
                }
                out.push(token.to_string());
            }
            State::InImport => {
                if trimmed == "{" {
                    state = State::InImportBraces;
                    out.push(token.to_string());
                } else if trimmed.contains('"') || trimmed.contains('\'') || trimmed.contains(';') {
                    // Module specifier string or statement terminator;
                    // the name-list region is over.
                    state = State::Outside;
                    out.push(token.to_string());
                } else if token == "import" {
                    // A new statement before the previous one visibly
                    // ended; start tracking afresh.
                    stmt_start = out.len();
                    has_concrete = false;
                    stmt_type_only = false;
                    pending_marker = false;
                    out.push(token.to_string());
                } else if token == "type" {
                    stmt_type_only = true;
                    out.push(token.to_string());
                } else {
                    classify_and_emit(
                        token,
                        catalog,
                        stmt_type_only,
                        &mut pending_marker,
                        &mut has_concrete,
                        &mut out,
                    );
                }
            }
            State::InImportBraces => {
                if trimmed.contains('}') {
                    // Trailing commas glue onto the close brace token, so
                    // containment rather than equality ends the list.
                    out.push(token.to_string());
                    if consolidate && !has_concrete && !stmt_type_only {
                        trace!("Consolidating fully type-only import");
                        consolidate_statement(&mut out, stmt_start);
                    }
                    pending_marker = false;
                    state = State::InImport;
                } else if token == "type" {
                    pending_marker = true;
                    out.push(token.to_string());
                } else {
                    classify_and_emit(
                        token,
                        catalog,
                        stmt_type_only,
                        &mut pending_marker,
                        &mut has_concrete,
                        &mut out,
                    );
                }
            }
        }
    }

    out.concat()
}

/// Emits one name-position token of the current statement, marking it
/// when the catalog knows it as type-only and otherwise recording the
/// statement as mixed unless the token is structural.
fn classify_and_emit(
    token: &str,
    catalog: &HashSet<String>,
    stmt_type_only: bool,
    pending_marker: &mut bool,
    has_concrete: &mut bool,
    out: &mut Vec<String>,
) {
    if stmt_type_only {
        out.push(token.to_string());
        return;
    }
    if *pending_marker {
        // Name already carries a marker from an earlier run; it is a
        // type name, so it neither gets re-marked nor counts as mixed.
        if is_word_token(token) {
            *pending_marker = false;
        }
        out.push(token.to_string());
        return;
    }
    if catalog.contains(token) {
        trace!("Marking '{}' as type-only", token);
        out.push(format!("type {token}"));
        return;
    }
    let trimmed = token.trim();
    if trimmed != "}" && !is_structural(trimmed) {
        *has_concrete = true;
    }
    out.push(token.to_string());
}

/// Walks the emitted tokens of the current statement backward from the
/// just-emitted close brace, stripping per-name markers and re-marking
/// the open brace at statement level.
fn consolidate_statement(out: &mut Vec<String>, stmt_start: usize) {
    for i in (stmt_start..out.len()).rev() {
        if out[i].contains('}') && !out[i].contains('{') {
            continue;
        }
        if out[i].contains('{') {
            out[i] = out[i].replacen('{', "type {", 1);
            break;
        }
        if out[i] == "type" {
            // Stale marker token from a previous run; remove it and the
            // whitespace run that separated it from its name.
            out[i].clear();
            if i + 1 < out.len() && !out[i + 1].is_empty() && out[i + 1].trim().is_empty() {
                out[i + 1].clear();
            }
            continue;
        }
        if let Some(stripped) = out[i].strip_prefix("type ") {
            out[i] = stripped.to_string();
        }
    }
}

/// Structural tokens inside a name list: separators, renames, and the
/// whitespace runs between them. None of these make a statement mixed.
fn is_structural(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed == "," || trimmed == "as"
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_word_token(token: &str) -> bool {
    token.chars().next().is_some_and(is_word_char)
}

/// Splits text at word boundaries into maximal runs of identifier and
/// non-identifier characters. Concatenating the tokens reconstructs the
/// input exactly.
fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut prev: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let w = is_word_char(ch);
        if let Some(p) = prev
            && p != w
        {
            tokens.push(&text[start..idx]);
            start = idx;
        }
        prev = Some(w);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}
