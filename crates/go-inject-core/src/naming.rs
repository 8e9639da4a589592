//! Identifier transformations shared by the resolver and the emitter.
//!
//! All of these are ASCII-only and case-based. Non-ASCII input is carried
//! through unchanged.

/// Converts a protobuf identifier into a Go identifier, matching
/// `protogen.GoCamelCase`.
///
/// - `one_two` becomes `OneTwo`
/// - a leading `_` becomes `X`
/// - `.` before a lowercase letter is dropped, other dots become `_`
pub fn go_camel_case(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() + 1);
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        let next_is_lower = bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase);
        match c {
            b'.' if next_is_lower => {}
            b'.' => out.push(b'_'),
            b'_' if i == 0 || bytes[i - 1] == b'.' => out.push(b'X'),
            b'_' if next_is_lower => {}
            c if c.is_ascii_digit() => out.push(c),
            c => {
                out.push(c.to_ascii_uppercase());
                while bytes.get(i + 1).is_some_and(u8::is_ascii_lowercase) {
                    i += 1;
                    out.push(bytes[i]);
                }
            }
        }
        i += 1;
    }
    // Only ASCII bytes were rewritten, so multi-byte sequences survive intact.
    String::from_utf8_lossy(&out).into_owned()
}

/// Lower-cases the first character, `PingService` -> `pingService`.
pub fn unexport(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(s.len());
            out.push(first.to_ascii_lowercase());
            out.push_str(chars.as_str());
            out
        }
        None => String::new(),
    }
}

/// Converts a CamelCase name to lower snake case, `PingService` ->
/// `ping_service`, `HTTPGateway` -> `http_gateway`.
pub fn snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_uppercase() {
            out.push(c);
            continue;
        }
        let boundary = match i.checked_sub(1).map(|p| chars[p]) {
            Some(prev) if prev.is_ascii_lowercase() || prev.is_ascii_digit() => true,
            Some(prev) if prev.is_ascii_uppercase() => {
                chars.get(i + 1).is_some_and(char::is_ascii_lowercase)
            }
            _ => false,
        };
        if boundary {
            out.push('_');
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}
