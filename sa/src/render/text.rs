//! Text clean-up for the paginated renderer

/// Replace typographic characters the standard fonts lack
///
/// Dashes become `-`, curly quotes become straight quotes, bullet glyphs
/// become `-`. Anything else outside Latin-1 becomes `?`.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{25cf}' | '\u{2022}' => '-',
            // C1 controls would show up as WinAnsi glyphs
            '\u{80}'..='\u{9f}' => '?',
            c if (c as u32) <= 0xff => c,
            _ => '?',
        })
        .collect()
}

/// Normalized text as single-byte Latin-1
pub fn encode_latin1(text: &str) -> Vec<u8> {
    // normalize leaves only code points <= 0xff
    normalize(text).chars().map(|c| c as u32 as u8).collect()
}

/// First `max` characters of `text`
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
