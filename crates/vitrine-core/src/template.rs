//! `{placeholder}` handling shared by resource templates, prompts, and
//! summary strings.

use std::collections::BTreeMap;

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Split `template` into literal and placeholder segments.
///
/// A placeholder is `{` + one or more ASCII alphanumerics or `_` + `}`.
/// Any other brace is literal text, so JSON bodies can carry placeholders.
fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;
    let bytes = template.as_bytes();

    while i < bytes.len() {
        if bytes[i] == b'{' {
            let name_len = bytes[i + 1..]
                .iter()
                .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
                .count();
            let close = i + 1 + name_len;
            if name_len > 0 && bytes.get(close) == Some(&b'}') {
                if literal_start < i {
                    out.push(Segment::Literal(&template[literal_start..i]));
                }
                out.push(Segment::Placeholder(&template[i + 1..close]));
                i = close + 1;
                literal_start = i;
                continue;
            }
        }
        i += 1;
    }
    if literal_start < template.len() {
        out.push(Segment::Literal(&template[literal_start..]));
    }
    out
}

/// Match `uri` against `template`, returning the captured placeholder values.
///
/// Each placeholder captures a non-empty run of characters up to the next
/// literal segment and never spans a `/`, so `user://{id}/profile` matches
/// `user://42/profile` but not `user://a/b/profile`.
pub fn match_uri(template: &str, uri: &str) -> Option<BTreeMap<String, String>> {
    let parts = segments(template);
    let mut values = BTreeMap::new();
    let mut rest = uri;

    for (i, part) in parts.iter().enumerate() {
        match part {
            Segment::Literal(lit) => {
                rest = rest.strip_prefix(lit)?;
            }
            Segment::Placeholder(name) => {
                let end = match parts.get(i + 1) {
                    Some(Segment::Literal(next)) => rest.find(next)?,
                    Some(Segment::Placeholder(_)) => return None,
                    None => rest.len(),
                };
                let value = &rest[..end];
                if value.is_empty() || value.contains('/') {
                    return None;
                }
                values.insert(name.to_string(), value.to_string());
                rest = &rest[end..];
            }
        }
    }

    rest.is_empty().then_some(values)
}

/// Replace every `{name}` in `template` whose name is in `values`.
///
/// Unknown placeholders are left untouched.
pub fn render(template: &str, values: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    for part in segments(template) {
        match part {
            Segment::Literal(lit) => out.push_str(lit),
            Segment::Placeholder(name) => match values.get(name) {
                Some(v) => out.push_str(v),
                None => {
                    out.push('{');
                    out.push_str(name);
                    out.push('}');
                }
            },
        }
    }
    out
}
