//! Terminal output sanitization
//!
//! Archive content is user-controlled. Before it reaches the terminal (TUI panes or
//! `show` output) escape sequences and stray control characters are removed so a
//! message cannot move the cursor, recolour the screen or ring the bell.

/// Remove CSI (`ESC [ ... final`) and OSC (`ESC ] ... BEL|ST`) sequences and
/// control characters other than tab and newline.
///
/// # Examples
///
/// ```
/// use chat_archive_viewer::utils::terminal::sanitize_for_display;
///
/// assert_eq!(sanitize_for_display("\x1b[1mbold\x1b[0m"), "bold");
/// ```
pub fn sanitize_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    // Parameters and intermediates end at a byte in 0x40..=0x7e
                    for next in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&next) {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch == '\r' {
            continue;
        }
        if ch.is_control() && ch != '\t' && ch != '\n' {
            continue;
        }

        out.push(ch);
    }

    out
}
