use log::trace;
use std::str::FromStr;

/// A caller-supplied module specifier mapping, `prefix` -> `replacement`.
///
/// Rules are ordered and matched first-match, not longest-match: callers
/// must order their rules from most- to least-specific themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
    pub prefix: String,
    pub replacement: String,
}

impl FromStr for AliasRule {
    type Err = String;

    /// Parses `PREFIX=TARGET`; everything after the first `=` belongs to
    /// the target, so targets may themselves contain `=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((prefix, replacement)) => Ok(AliasRule {
                prefix: prefix.to_string(),
                replacement: replacement.to_string(),
            }),
            None => Err(format!("expected PREFIX=TARGET, got '{}'", s)),
        }
    }
}

/// Rewrites a module specifier through the ordered rule list.
///
/// An exact-equality match substitutes the replacement wholesale; failing
/// that, the first rule whose prefix literally prefixes the specifier
/// replaces that prefix and keeps the remainder unchanged. No rule
/// matching returns the specifier as-is.
pub fn resolve_specifier(specifier: &str, rules: &[AliasRule]) -> String {
    for rule in rules {
        if rule.prefix == specifier {
            trace!("Alias exact match '{}' -> '{}'", specifier, rule.replacement);
            return rule.replacement.clone();
        }
    }

    for rule in rules {
        if let Some(remainder) = specifier.strip_prefix(&rule.prefix) {
            let resolved = format!("{}{}", rule.replacement, remainder);
            trace!("Alias prefix match '{}' -> '{}'", specifier, resolved);
            return resolved;
        }
    }

    specifier.to_string()
}
