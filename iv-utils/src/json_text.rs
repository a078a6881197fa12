// JSON-as-text helpers. Pack definition files carry // and /* */ comments,
// which no strict parser accepts, and the toolchain rewrites them with
// 4-space indentation.

use std::io;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Removes `/* */` block comments, then `//` line comments. The block pass is
/// not string-aware (an unterminated opener is left in place); the line pass
/// tracks string and escape state so URLs inside values survive.
pub fn strip_json_comments(text: &str) -> String {
    let stripped = strip_block_comments(text);
    let mut out_lines: Vec<&str> = Vec::new();
    for line in stripped.lines() {
        out_lines.push(strip_line_comment(line));
    }
    out_lines.join("\n")
}

fn strip_block_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => {
                // Unterminated: keep it and let the parser complain.
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut escape = false;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'"' && !escape {
            in_string = !in_string;
        }
        if !in_string && b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            return &line[..i];
        }
        escape = b == b'\\' && !escape;
        i += 1;
    }
    line
}

/// Strips comments, then parses.
pub fn parse_lenient(text: &str) -> serde_json::Result<Value> {
    serde_json::from_str(&strip_json_comments(text))
}

/// Checks that `text` parses, optionally after comment stripping. The error
/// string carries the line/column the parser reported. Positions refer to
/// the stripped text, which only matters past a removed block comment.
pub fn validate_text(text: &str, allow_comments: bool) -> Result<(), String> {
    let data = if allow_comments {
        strip_json_comments(text)
    } else {
        text.to_string()
    };
    match serde_json::from_str::<Value>(&data) {
        Ok(_) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Serializes with 4-space indentation, keys in construction order, no
/// trailing newline.
pub fn to_pretty<T: Serialize>(value: &T) -> String {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .expect("in-memory JSON serialization");
    String::from_utf8(buf).expect("serializer emits UTF-8")
}

/// Rewrites a definition file with the standard formatting and a trailing
/// newline.
pub fn write_pretty(path: &Path, value: &Value) -> io::Result<()> {
    std::fs::write(path, to_pretty(value) + "\n")
}
