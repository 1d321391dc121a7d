// Option-string expansion and tokenization
//
// `$VAR` / `${VAR}` references resolve through the injected lookup; an
// absent variable expands to the empty string. A value fully enclosed in
// one pair of double quotes is a single token with the quotes stripped and
// internal whitespace preserved; anything else splits on whitespace.

/// Expand variable references and split into tokens.
pub fn tokenize<F>(value: &str, lookup: F) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = expand_vars(value, &lookup);
    match strip_enclosing_quotes(&expanded) {
        Some(inner) => vec![inner.to_string()],
        None => expanded
            .split_whitespace()
            .map(|t| t.to_string())
            .collect(),
    }
}

/// `Some(inner)` when the whole value is wrapped in exactly one pair of
/// double quotes (no interior quote characters).
fn strip_enclosing_quotes(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.len() < 2 || !trimmed.starts_with('"') || !trimmed.ends_with('"') {
        return None;
    }
    let inner = &trimmed[1..trimmed.len() - 1];
    if inner.contains('"') {
        return None;
    }
    Some(inner)
}

/// Resolve `$VAR` and `${VAR}` references. Variable names are
/// `[A-Za-z_][A-Za-z0-9_]*`; a lone `$` or an unterminated `${` is kept
/// verbatim.
fn expand_vars<F>(value: &str, lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(braced) = after.strip_prefix('{') {
            match braced.find('}') {
                Some(end) => {
                    out.push_str(&lookup(&braced[..end]).unwrap_or_default());
                    rest = &braced[end + 1..];
                }
                None => {
                    out.push('$');
                    rest = after;
                }
            }
            continue;
        }

        let end = after
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(after.len());
        if end == 0 || after.as_bytes()[0].is_ascii_digit() {
            out.push('$');
            rest = after;
            continue;
        }
        out.push_str(&lookup(&after[..end]).unwrap_or_default());
        rest = &after[end..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_whitespace_split() {
        let tokens = tokenize("-Dtest.tull1 -Dtest2", lookup_from(&[]));
        assert_eq!(tokens, vec!["-Dtest.tull1", "-Dtest2"]);
    }

    #[test]
    fn test_fully_quoted_is_single_token() {
        let tokens = tokenize("\"-Dtest.tull1 -Dtest2\"", lookup_from(&[]));
        assert_eq!(tokens, vec!["-Dtest.tull1 -Dtest2"]);
    }

    #[test]
    fn test_interior_quotes_still_split() {
        let tokens = tokenize("\"-Da=1\" \"-Db=2\"", lookup_from(&[]));
        assert_eq!(tokens, vec!["\"-Da=1\"", "\"-Db=2\""]);
    }

    #[test]
    fn test_braced_expansion() {
        let tokens = tokenize(
            "-Dvalue=${VARIABLE_TO_EXPAND}",
            lookup_from(&[("VARIABLE_TO_EXPAND", "jallaball")]),
        );
        assert_eq!(tokens, vec!["-Dvalue=jallaball"]);
    }

    #[test]
    fn test_bare_expansion_stops_at_non_ident() {
        let tokens = tokenize("-Dvalue=$HOST.local", lookup_from(&[("HOST", "pod-1")]));
        assert_eq!(tokens, vec!["-Dvalue=pod-1.local"]);
    }

    #[test]
    fn test_absent_variable_expands_empty() {
        let tokens = tokenize("-Dvalue=$MISSING -Dother=1", lookup_from(&[]));
        assert_eq!(tokens, vec!["-Dvalue=", "-Dother=1"]);
    }

    #[test]
    fn test_lone_dollar_kept() {
        let tokens = tokenize("-Dprice=5$", lookup_from(&[]));
        assert_eq!(tokens, vec!["-Dprice=5$"]);
    }

    #[test]
    fn test_empty_value_yields_nothing() {
        let tokens = tokenize("", lookup_from(&[]));
        assert!(tokens.is_empty());
    }
}
