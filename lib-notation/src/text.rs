/// Splits `src` on `\r\n`, `\r` or `\n`. A terminator at the very end does
/// not produce an extra empty line.
pub fn split_lines(src: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut rest = src;
    while !rest.is_empty() {
        match rest.find(['\r', '\n']) {
            Some(at) => {
                out.push(&rest[..at]);
                let skip = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[at + skip..];
            }
            None => {
                out.push(rest);
                break;
            }
        }
    }
    out
}

/// The first line terminator used in `src`, or `\r` when there is none.
pub fn line_ending(src: &str) -> &'static str {
    match src.find(['\r', '\n']) {
        Some(at) if src[at..].starts_with("\r\n") => "\r\n",
        Some(at) if src[at..].starts_with('\n') => "\n",
        _ => "\r",
    }
}
