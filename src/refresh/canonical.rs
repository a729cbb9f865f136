//! Canonical form for fetched JSON documents.
//!
//! The remote endpoint may vary incidental whitespace between fetches even
//! when nothing changed. Re-indenting every document the same way makes a
//! plain byte comparison meaningful.
//!
//! Only whitespace is normalized. Object keys keep their order, and string
//! escapes and number literals are copied verbatim, so a document whose keys
//! were reordered compares as changed.

use serde::de::{Error as _, IgnoredAny};

const INDENT: &[u8] = b"  ";

/// Validate `input` as one JSON value and re-indent it.
///
/// Malformed input (including trailing garbage and empty input) is rejected,
/// so nothing that fails here can ever reach a sink.
pub fn canonicalize(input: &[u8]) -> Result<Vec<u8>, serde_json::Error> {
    if std::str::from_utf8(input).is_err() {
        return Err(serde_json::Error::custom("document is not valid UTF-8"));
    }
    serde_json::from_slice::<IgnoredAny>(input)?;
    Ok(reindent(input))
}

/// Whitespace-only rewrite of an already validated document.
fn reindent(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len() + input.len() / 2);
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    // A container was just opened; its first newline waits until we know
    // whether it is empty.
    let mut opened = false;

    for &b in input {
        if in_string {
            out.push(b);
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        if matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
            continue;
        }

        let just_opened = std::mem::take(&mut opened);
        match b {
            b'}' | b']' => {
                depth = depth.saturating_sub(1);
                if !just_opened {
                    newline(&mut out, depth);
                }
                out.push(b);
            }
            _ => {
                if just_opened {
                    newline(&mut out, depth);
                }
                match b {
                    b'{' | b'[' => {
                        out.push(b);
                        depth += 1;
                        opened = true;
                    }
                    b',' => {
                        out.push(b);
                        newline(&mut out, depth);
                    }
                    b':' => out.extend_from_slice(b": "),
                    b'"' => {
                        out.push(b);
                        in_string = true;
                    }
                    _ => out.push(b),
                }
            }
        }
    }

    out
}

fn newline(out: &mut Vec<u8>, depth: usize) {
    out.push(b'\n');
    for _ in 0..depth {
        out.extend_from_slice(INDENT);
    }
}
