//! Reading and writing catalog files: `key=value` lines with `#` comments.

use std::collections::BTreeMap;

use crate::values::PropertyValue;

/// The properties of a catalog file, by key.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A line that is neither blank, a comment, nor a `key=value` pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct SyntaxError {
    pub line: usize,
    pub message: String,
}

/// Parse catalog file contents. Later occurrences of a key replace earlier ones.
///
/// Leading whitespace is dropped from every line and from every value, trailing whitespace is
/// kept. A backslash escapes the next character (`\n`, `\r`, `\t`, `\f` and `\uXXXX` as in
/// Java properties files), and a line ending in an unescaped backslash continues on the next.
/// A value is an environment placeholder only if it is written as `${ENV:NAME}` with no escapes.
pub fn parse_properties(contents: &str) -> Result<Properties, SyntaxError> {
    let mut properties = Properties::new();
    let mut lines = contents.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let line_number = index + 1;
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let mut logical = line.to_string();
        while continues(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start()),
                None => break,
            }
        }
        let syntax_error = |message: String| SyntaxError {
            line: line_number,
            message,
        };

        let Some(separator) = find_separator(&logical) else {
            return Err(syntax_error(format!(
                "expected 'key=value', found '{}'",
                logical.trim_end()
            )));
        };
        let key = logical[..separator].trim_end();
        if key.is_empty() {
            return Err(syntax_error("missing key before separator".to_string()));
        }
        let key = unescape(key).map_err(syntax_error)?;
        let raw = logical[separator + 1..].trim_start();
        let value = match PropertyValue::parse(raw) {
            PropertyValue::Plain(_) => PropertyValue::Plain(unescape(raw).map_err(syntax_error)?),
            placeholder @ PropertyValue::FromEnvironment { .. } => placeholder,
        };

        properties.insert(key, value);
    }

    Ok(properties)
}

/// Render properties in key order, below a comment header, escaped so that they parse back to
/// the same properties.
pub fn render_properties(header: &str, properties: &Properties) -> String {
    let mut contents = String::new();
    for line in header.lines() {
        contents.push_str("# ");
        contents.push_str(line);
        contents.push('\n');
    }
    for (key, value) in properties {
        contents.push_str(&escape(key, Field::Key));
        contents.push('=');
        match value {
            PropertyValue::Plain(text) => {
                // Plain text that looks like a placeholder must not read back as one.
                if let PropertyValue::FromEnvironment { .. } = PropertyValue::parse(text) {
                    contents.push('\\');
                }
                contents.push_str(&escape(text, Field::Value));
            }
            PropertyValue::FromEnvironment { .. } => contents.push_str(&value.to_string()),
        }
        contents.push('\n');
    }
    contents
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Key,
    Value,
}

fn escape(text: &str, field: Field) -> String {
    let mut escaped = String::with_capacity(text.len());
    for (index, c) in text.chars().enumerate() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\u{c}' => escaped.push_str("\\f"),
            ' ' if field == Field::Key || index == 0 => escaped.push_str("\\ "),
            '=' | ':' | '#' | '!' if field == Field::Key => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            Some('f') => value.push('\u{c}'),
            Some('u') => {
                let digits: String = chars.by_ref().take(4).collect();
                let hex = digits.len() == 4 && digits.chars().all(|c| c.is_ascii_hexdigit());
                let decoded = if hex {
                    u32::from_str_radix(&digits, 16).ok().and_then(char::from_u32)
                } else {
                    None
                };
                let decoded =
                    decoded.ok_or_else(|| format!("malformed escape '\\u{digits}'"))?;
                value.push(decoded);
            }
            Some(other) => value.push(other),
            None => {}
        }
    }
    Ok(value)
}

/// The byte offset of the first `=` or `:` that is not escaped.
fn find_separator(line: &str) -> Option<usize> {
    let mut escaped = false;
    for (index, c) in line.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '=' | ':' => return Some(index),
            _ => {}
        }
    }
    None
}

/// Whether a line ends in an odd number of backslashes.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn parses_pairs_and_skips_comments() {
        let properties = parse_properties(
            "# Oracle catalog\n\
             connector.name=oracle\n\
             \n\
             ! legacy comment\n\
             oracle.number.default-scale = 12\n\
             oracle.tls.keystore-path: /etc/ks.p12\n\
             oracle.tls.keystore-password=${ENV:KEYSTORE_PASSWORD}\n\
             oracle.tls.truststore-path=\n",
        )
        .unwrap();

        assert_eq!(
            properties,
            Properties::from([
                ("connector.name".to_string(), PropertyValue::from("oracle")),
                ("oracle.number.default-scale".to_string(), PropertyValue::from("12")),
                ("oracle.tls.keystore-path".to_string(), PropertyValue::from("/etc/ks.p12")),
                (
                    "oracle.tls.keystore-password".to_string(),
                    PropertyValue::FromEnvironment {
                        variable: "KEYSTORE_PASSWORD".into()
                    }
                ),
                ("oracle.tls.truststore-path".to_string(), PropertyValue::from("")),
            ])
        );
    }

    #[test]
    fn first_separator_wins() {
        let properties =
            parse_properties("connection-url=jdbc:oracle:thin:@host:1521/ORCL").unwrap();
        assert_eq!(
            properties["connection-url"],
            PropertyValue::from("jdbc:oracle:thin:@host:1521/ORCL")
        );
    }

    #[test]
    fn last_occurrence_wins() {
        let properties =
            parse_properties("oracle.varchar.max-size=4000\noracle.varchar.max-size=8000").unwrap();
        assert_eq!(properties["oracle.varchar.max-size"], PropertyValue::from("8000"));
    }

    #[test]
    fn reports_line_numbers() {
        assert_eq!(
            parse_properties("# header\noracle.tls.enabled=true\noracle.synonyms.enabled\n"),
            Err(SyntaxError {
                line: 3,
                message: "expected 'key=value', found 'oracle.synonyms.enabled'".to_string()
            })
        );
        assert_eq!(
            parse_properties(" = true").map_err(|error| error.line),
            Err(1)
        );
    }

    #[test]
    fn renders_in_key_order() {
        let properties = Properties::from([
            ("oracle.tls.enabled".to_string(), PropertyValue::from("false")),
            (
                "oracle.tls.keystore-password".to_string(),
                PropertyValue::FromEnvironment {
                    variable: "KS".into(),
                },
            ),
            ("oracle.number.default-scale".to_string(), PropertyValue::from("10")),
        ]);
        assert_eq!(
            render_properties("Oracle connector settings", &properties),
            "# Oracle connector settings\n\
             oracle.number.default-scale=10\n\
             oracle.tls.enabled=false\n\
             oracle.tls.keystore-password=${ENV:KS}\n"
        );
    }

    #[test]
    fn rendered_properties_parse_back() {
        let properties = Properties::from([
            ("oracle.number.rounding-mode".to_string(), PropertyValue::from("HALF_UP")),
            ("oracle.tls.truststore-path".to_string(), PropertyValue::from("/etc/ts.p12")),
        ]);
        let rendered = render_properties("header\nsecond line", &properties);
        assert_eq!(parse_properties(&rendered), Ok(properties));
    }

    #[test]
    fn values_keep_trailing_whitespace() {
        let properties = parse_properties("oracle.tls.keystore-path =   /etc/ks.p12  \n").unwrap();
        assert_eq!(
            properties["oracle.tls.keystore-path"],
            PropertyValue::from("/etc/ks.p12  ")
        );
    }

    #[test]
    fn reads_escapes_and_continuation_lines() {
        let properties = parse_properties(
            "oracle.tls.keystore-password=p\\u0041ss\\=word\\\n    \\ and more\n\
             oracle\\:odd\\ key = C:\\\\oracle\\\\ks.p12\n",
        )
        .unwrap();
        assert_eq!(
            properties,
            Properties::from([
                (
                    "oracle.tls.keystore-password".to_string(),
                    PropertyValue::from("pAss=word and more")
                ),
                ("oracle:odd key".to_string(), PropertyValue::from("C:\\oracle\\ks.p12")),
            ])
        );
    }

    #[test]
    fn escaped_placeholders_are_plain_text() {
        let properties = parse_properties("oracle.tls.keystore-password=\\${ENV:KS}").unwrap();
        assert_eq!(
            properties["oracle.tls.keystore-password"],
            PropertyValue::from("${ENV:KS}")
        );
    }

    #[test]
    fn malformed_unicode_escapes_are_reported() {
        assert_eq!(
            parse_properties("# header\noracle.tls.keystore-password=\\u00zz\n"),
            Err(SyntaxError {
                line: 2,
                message: "malformed escape '\\u00zz'".to_string()
            })
        );
    }

    #[test]
    fn renders_escapes() {
        let properties = Properties::from([
            ("oracle.tls.keystore-password".to_string(), PropertyValue::from("a\nb=c")),
            ("oracle.tls.keystore-path".to_string(), PropertyValue::from(" C:\\ks ")),
            ("oracle.tls.truststore-password".to_string(), PropertyValue::from("${ENV:TS}")),
        ]);
        assert_eq!(
            render_properties("", &properties),
            "oracle.tls.keystore-password=a\\nb=c\n\
             oracle.tls.keystore-path=\\ C:\\\\ks \n\
             oracle.tls.truststore-password=\\${ENV:TS}\n"
        );
    }

    #[test]
    fn awkward_values_survive_rendering() {
        let properties = Properties::from([
            (
                "oracle.tls.keystore-password".to_string(),
                PropertyValue::from("pw\noracle.tls.enabled=true"),
            ),
            ("oracle.tls.truststore-password".to_string(), PropertyValue::from(" secret ")),
            ("oracle.tls.keystore-path".to_string(), PropertyValue::from("C:\\oracle\\ks.p12\\")),
            ("oracle.tls.truststore-path".to_string(), PropertyValue::from("\ttabbed\r\n")),
            ("oracle.number.rounding-mode".to_string(), PropertyValue::from("${ENV:MODE}")),
            (
                "oracle.varchar.max-size".to_string(),
                PropertyValue::FromEnvironment {
                    variable: "MAX_SIZE".into(),
                },
            ),
            ("connector.name".to_string(), PropertyValue::from("")),
            ("# not a comment".to_string(), PropertyValue::from("!")),
        ]);
        let rendered = render_properties("header", &properties);
        assert_eq!(parse_properties(&rendered), Ok(properties));
    }
}
