use crate::models::Message;

/// Plain-text rendering of a thread: `ROLE: content` per message, each followed by a
/// blank line.
pub fn render_thread(thread: &[Message]) -> String {
    let capacity = thread.iter().map(|m| m.role.len() + m.content.len() + 4).sum();
    let mut out = String::with_capacity(capacity);
    for message in thread {
        out.push_str(&message.role.to_uppercase());
        out.push_str(": ");
        out.push_str(&message.content);
        out.push_str("\n\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_thread() {
        let thread = vec![Message::new("user", "Hi"), Message::new("assistant", "Hello\nthere")];
        assert_eq!(render_thread(&thread), "USER: Hi\n\nASSISTANT: Hello\nthere\n\n");
    }

    #[test]
    fn test_render_empty_thread() {
        assert_eq!(render_thread(&[]), "");
    }
}
