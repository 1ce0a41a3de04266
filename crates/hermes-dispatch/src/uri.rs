//! Raw request-URI normalization.
//!
//! The transport hands the dispatcher the raw request URI. Before matching,
//! the query and fragment are stripped and the remaining path is
//! percent-decoded, so templates always see the decoded path. `+` is left
//! alone; it only means space in query strings, which never reach the
//! matcher.

/// Extracts and decodes the path component of a raw request URI.
pub(crate) fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    percent_decode(&raw[..end])
}

/// Decodes `%XX` escapes, leaving malformed escapes untouched.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    // Decoded bytes may not be valid UTF-8; such paths will simply not
    // match any template.
    String::from_utf8(out)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
