//! Character reference decoding and escaping

use std::borrow::Cow;

/// Decode the character references markup text commonly contains.
/// Unknown references are left as written.
pub fn decode(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_reference(&rest[1..semi]).map(|c| (c, semi)));

        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    Cow::Owned(out)
}

fn decode_reference(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let code = name.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape(input, false)
}

pub fn escape_attribute(input: &str) -> Cow<'_, str> {
    escape(input, true)
}

fn escape(input: &str, quotes: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '<' | '>' | '&') || (quotes && c == '"');
    if !input.contains(needs_escape) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' if quotes => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_and_numeric() {
        assert_eq!(decode("a &lt;b&gt; &amp; &#65;&#x42;"), "a <b> & AB");
    }

    #[test]
    fn test_decode_leaves_unknown() {
        assert_eq!(decode("fish & chips &bogus;"), "fish & chips &bogus;");
    }

    #[test]
    fn test_escape_round_trip() {
        let raw = "1 < 2 && \"quoted\"";
        assert_eq!(decode(&escape_attribute(raw)), raw);
        assert_eq!(escape_text(raw), "1 &lt; 2 &amp;&amp; \"quoted\"");
    }
}
