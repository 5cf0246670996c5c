//! ASCII character classes used by lexers feeding the term factories.
//!
//! Each predicate takes a `u32` code point so callers can pass raw bytes,
//! `char`s or lookahead sentinels (e.g. `u32::MAX` for end of input) alike.

pub fn is_digit(c: u32) -> bool {
    ('0' as u32..='9' as u32).contains(&c)
}

pub fn is_upper(c: u32) -> bool {
    ('A' as u32..='Z' as u32).contains(&c)
}

pub fn is_lower(c: u32) -> bool {
    ('a' as u32..='z' as u32).contains(&c)
}

pub fn is_alpha(c: u32) -> bool {
    is_lower(c) || is_upper(c)
}

pub fn is_alnum(c: u32) -> bool {
    is_alpha(c) || is_digit(c)
}

/// Characters allowed after the first character of an identifier.
pub fn is_id_part(c: u32) -> bool {
    is_alnum(c) || c == '_' as u32
}
