//! Cleanup for text captured from child processes before it reaches the menu
//! or the log.

#[derive(Clone, Copy)]
enum Escape {
    Start,
    Csi,
    Osc,
    OscEsc,
    // DCS/SOS/PM/APC payload, terminated by ESC \
    String,
    StringEsc,
}

/// Strip ANSI escape sequences and control characters from a single line.
/// Tabs become spaces; line breaks are dropped.
pub fn strip_controls(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut state: Option<Escape> = None;

    for c in input.chars() {
        state = match state {
            None => match c {
                '\x1b' => Some(Escape::Start),
                '\t' => {
                    out.push(' ');
                    None
                }
                c if c.is_control() || is_bidi_control(c) => None,
                c => {
                    out.push(c);
                    None
                }
            },
            Some(Escape::Start) => match c {
                '[' => Some(Escape::Csi),
                ']' => Some(Escape::Osc),
                'P' | 'X' | '^' | '_' => Some(Escape::String),
                _ => None,
            },
            Some(Escape::Csi) => (!('@'..='~').contains(&c)).then_some(Escape::Csi),
            Some(Escape::Osc) => match c {
                '\x07' => None,
                '\x1b' => Some(Escape::OscEsc),
                _ => Some(Escape::Osc),
            },
            Some(Escape::OscEsc) => match c {
                '\\' => None,
                '\x1b' => Some(Escape::OscEsc),
                _ => Some(Escape::Osc),
            },
            Some(Escape::String) => match c {
                '\x1b' => Some(Escape::StringEsc),
                _ => Some(Escape::String),
            },
            Some(Escape::StringEsc) => match c {
                '\\' => None,
                '\x1b' => Some(Escape::StringEsc),
                _ => Some(Escape::String),
            },
        };
    }

    out
}

/// Keep at most `max` characters without splitting a code point.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn is_bidi_control(c: char) -> bool {
    c == '\u{061C}'
        || c == '\u{200E}'
        || c == '\u{200F}'
        || ('\u{202A}'..='\u{202E}').contains(&c)
        || ('\u{2066}'..='\u{2069}').contains(&c)
}
