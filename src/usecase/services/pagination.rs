pub const PAGINATION_WINDOW: usize = 5;

/// Number of pages for `total` rows; never below one so an empty table still
/// has a page to sit on.
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Contiguous run of 0-based page numbers around `current`, shifted rather
/// than truncated near either edge.
pub fn pagination_window(current: usize, total_pages: usize, window: usize) -> Vec<usize> {
    if total_pages == 0 || window == 0 {
        return Vec::new();
    }
    let current = current.min(total_pages - 1);
    let half = window / 2;
    let mut start = current.saturating_sub(half);
    let end = (start + window - 1).min(total_pages - 1);
    if end - start + 1 < window {
        start = (end + 1).saturating_sub(window);
    }
    (start..=end).collect()
}

/// Free-text "go to page" input. Keystrokes only edit the text; the page
/// changes on `commit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageJump {
    input: String,
}

impl PageJump {
    pub fn new(page_index: usize) -> Self {
        Self {
            input: (page_index + 1).to_string(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Resets the text to the current page, e.g. after paging elsewhere.
    pub fn sync(&mut self, page_index: usize) {
        self.input = (page_index + 1).to_string();
    }

    /// Parses and clamps the input to `[1, total_pages]`, returning the 0-based
    /// page index. Non-numeric input commits nothing.
    pub fn commit(&mut self, total_pages: usize) -> Option<usize> {
        let parsed = self.input.trim().parse::<f64>().ok()?;
        if !parsed.is_finite() {
            return None;
        }
        let last = total_pages.max(1);
        let floored = parsed.floor();
        let clamped = if floored < 1.0 {
            1
        } else if floored >= last as f64 {
            last
        } else {
            floored as usize
        };
        self.input = clamped.to_string();
        Some(clamped - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_count_rounds_up_and_never_hits_zero() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
    }

    #[test]
    fn window_is_centered_on_the_current_page() {
        assert_eq!(pagination_window(5, 20, PAGINATION_WINDOW), vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn window_shifts_at_the_edges() {
        assert_eq!(pagination_window(0, 20, PAGINATION_WINDOW), vec![0, 1, 2, 3, 4]);
        assert_eq!(pagination_window(19, 20, PAGINATION_WINDOW), vec![15, 16, 17, 18, 19]);
        assert_eq!(pagination_window(18, 20, PAGINATION_WINDOW), vec![15, 16, 17, 18, 19]);
    }

    #[test]
    fn window_never_exceeds_the_page_count() {
        assert_eq!(pagination_window(1, 3, PAGINATION_WINDOW), vec![0, 1, 2]);
        assert_eq!(pagination_window(0, 1, PAGINATION_WINDOW), vec![0]);
        assert!(pagination_window(0, 0, PAGINATION_WINDOW).is_empty());
    }

    #[test]
    fn jump_clamps_out_of_range_input() {
        let mut jump = PageJump::new(2);
        jump.set_input("0");
        assert_eq!(jump.commit(5), Some(0));
        assert_eq!(jump.input(), "1");

        jump.set_input("999");
        assert_eq!(jump.commit(5), Some(4));
        assert_eq!(jump.input(), "5");
    }

    #[test]
    fn jump_floors_fractions_and_ignores_garbage() {
        let mut jump = PageJump::new(0);
        jump.set_input("3.7");
        assert_eq!(jump.commit(5), Some(2));

        jump.set_input("abc");
        assert_eq!(jump.commit(5), None);
        assert_eq!(jump.input(), "abc");
    }

    #[test]
    fn editing_does_not_move_until_commit() {
        let mut jump = PageJump::new(0);
        jump.set_input("4");
        assert_eq!(jump.input(), "4");
        jump.sync(1);
        assert_eq!(jump.input(), "2");
    }
}
