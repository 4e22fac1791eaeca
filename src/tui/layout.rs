use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// List/detail layout
pub struct AppLayout {
    pub query_area: Rect,
    pub list_area: Rect,
    pub thread_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// - Query bar: top, 3 rows (bordered)
    /// - Conversation list: 40% width (left)
    /// - Thread pane: 60% width (right)
    /// - Status bar: bottom row
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Query bar
                Constraint::Min(3),    // Main area
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let horizontal_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(vertical_chunks[1]);

        Self {
            query_area: vertical_chunks[0],
            list_area: horizontal_chunks[0],
            thread_area: horizontal_chunks[1],
            status_area: vertical_chunks[2],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_splits_correctly() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30));

        assert_eq!(layout.query_area.height, 3);
        assert_eq!(layout.query_area.y, 0);

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.status_area.y, 29);

        assert_eq!(layout.list_area.height, 26);
        assert_eq!(layout.thread_area.height, 26);
        assert_eq!(layout.list_area.width, 40);
        assert_eq!(layout.thread_area.width, 60);
    }

    #[test]
    fn test_layout_minimum_height() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 7));

        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.query_area.height, 3);
        assert_eq!(layout.list_area.height, 3);
    }
}
