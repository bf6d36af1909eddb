//! Single-selection register shared by the grid widgets.

/// Remembers the most recently selected cell.
///
/// Once something is selected the register never returns to empty; a
/// pointer miss leaves it as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState<R> {
    last: Option<R>,
}

impl<R> Default for SelectionState<R> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<R: Copy + PartialEq> SelectionState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, cell: R) {
        self.last = Some(cell);
    }

    pub fn last_selected(&self) -> Option<R> {
        self.last
    }

    pub fn is_selected(&self, cell: R) -> bool {
        self.last == Some(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty_and_remembers() {
        let mut sel = SelectionState::new();
        assert_eq!(sel.last_selected(), None);
        sel.select(3usize);
        sel.select(5usize);
        assert_eq!(sel.last_selected(), Some(5));
        assert!(sel.is_selected(5));
        assert!(!sel.is_selected(3));
    }

    #[test]
    fn test_zero_is_a_real_selection() {
        let mut sel = SelectionState::new();
        sel.select(0usize);
        assert_eq!(sel.last_selected(), Some(0));
    }
}
