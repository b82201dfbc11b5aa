pub fn is_ascii_whitespace(c: u8) -> bool {
    is_newline(c) || is_ascii_whitespace_no_nl(c)
}

pub fn is_ascii_whitespace_no_nl(c: u8) -> bool {
    c == b'\t' || c == 0x0b || c == 0x0c || c == b' '
}

pub fn is_newline(c: u8) -> bool {
    c == b'\n' || c == b'\r'
}

pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

// Bytes >= 0x80 belong to multi-byte UTF-8 sequences; treating all of them as
// name characters keeps every slice on a char boundary.
pub fn is_name_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c >= 0x80
}

pub fn is_name_char(c: u8) -> bool {
    is_name_start(c) || is_digit(c) || c == b'-'
}

pub fn valid_unit_char(c: u8) -> bool {
    c.is_ascii_alphabetic()
}

pub fn isnt_quote(quote: u8) -> impl Fn(u8) -> bool {
    move |c| c != quote && c != b'\\'
}

pub fn isnt_right_paren(c: u8) -> bool {
    c != b')'
}
