//! String normalization for root addresses.
//!
//! Class path roots arrive as URL-shaped strings (`file:/...`, `jar:file:/...!/...`)
//! that may be percent-encoded, may carry a trailing separator and may mix `/` with
//! the platform's `\`. Everything here is a pure function over `&str`.

use crate::error::{Result, ScanError};

/// Scheme marker of a local file address
pub const FILE_SCHEME: &str = "file:";

/// Scheme marker of an address pointing inside an archive
pub const JAR_SCHEME: &str = "jar:";

/// Separator between an archive location and the entry path inside it
pub const ARCHIVE_SEPARATOR: &str = "!/";

/// Reverse percent-encoding, interpreting the decoded bytes as UTF-8.
///
/// `+` is kept literally: class path addresses are URLs, not form data.
pub fn decode(raw: &str) -> Result<String> {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            decoded.push(bytes[i]);
            i += 1;
            continue;
        }

        let hi = bytes.get(i + 1).and_then(|b| hex_value(*b));
        let lo = bytes.get(i + 2).and_then(|b| hex_value(*b));
        match (hi, lo) {
            (Some(hi), Some(lo)) => {
                decoded.push(hi << 4 | lo);
                i += 3;
            }
            _ => {
                return Err(ScanError::Decode {
                    input: raw.to_string(),
                    reason: format!("incomplete escape sequence at byte {i}"),
                });
            }
        }
    }

    String::from_utf8(decoded).map_err(|e| ScanError::Decode {
        input: raw.to_string(),
        reason: e.to_string(),
    })
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Remove one trailing `/` or `\`
pub fn strip_trailing_separator(s: &str) -> &str {
    s.strip_suffix(is_separator).unwrap_or(s)
}

/// Remove one leading `/` or `\`
pub fn strip_leading_separator(s: &str) -> &str {
    s.strip_prefix(is_separator).unwrap_or(s)
}

/// Remove `scheme` from the front of `s` when present
pub fn strip_scheme_prefix<'a>(s: &'a str, scheme: &str) -> &'a str {
    s.strip_prefix(scheme).unwrap_or(s)
}

/// Rewrite platform separators to `/`
pub fn to_forward_slashes(s: &str) -> String {
    s.replace('\\', "/")
}

/// Convert a dotted package name into the slash-delimited path used for lookups.
///
/// Returns `None` when the name has an empty segment (`.a`, `a..b`, `a.`), which
/// would otherwise turn into an absolute or collapsed path.
pub fn package_path(package: &str) -> Option<String> {
    let path = package.replace('.', "/");
    is_package_path(&path).then_some(path)
}

/// `true` for the empty path or `/`-separated non-empty segments that stay below their root
pub fn is_package_path(path: &str) -> bool {
    path.is_empty()
        || path
            .split(['/', '\\'])
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

/// Drop the slash a file URL puts in front of a Windows drive letter (`/C:/x` -> `C:/x`).
pub(crate) fn strip_drive_slash(s: &str) -> &str {
    let bytes = s.as_bytes();
    let has_drive = bytes.len() >= 3
        && bytes[0] == b'/'
        && bytes[1].is_ascii_alphabetic()
        && bytes[2] == b':';
    if cfg!(windows) && has_drive { &s[1..] } else { s }
}
