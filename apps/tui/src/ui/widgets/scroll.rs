/// First line to show so the selected card's `(start, end)` line range fits in `height`.
///
/// Prefers the card's first line when the card is taller than the view.
pub fn card_scroll_offset((start, end): (usize, usize), height: usize) -> usize {
    end.saturating_sub(height).min(start)
}
