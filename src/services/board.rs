use std::collections::BTreeSet;

pub const BOARD_SIZE: usize = 5;

/// A row, column or diagonal of the 5x5 board, as rule indices
pub type Line = [usize; BOARD_SIZE];

/// All 12 lines: 5 rows, 5 columns, then the two diagonals
pub fn lines() -> Vec<Line> {
    let mut lines = Vec::with_capacity(2 * BOARD_SIZE + 2);
    for j in 0..BOARD_SIZE {
        lines.push(std::array::from_fn(|i| BOARD_SIZE * j + i));
    }
    for i in 0..BOARD_SIZE {
        lines.push(std::array::from_fn(|j| i + BOARD_SIZE * j));
    }
    lines.push(std::array::from_fn(|k| k * (BOARD_SIZE + 1)));
    lines.push(std::array::from_fn(|k| (k + 1) * (BOARD_SIZE - 1)));
    lines
}

/// Indices on every line that `known ∪ triggered` covers but `known` alone
/// did not. Completion is cumulative: a line may finish with cells known
/// from earlier submissions plus cells triggered now.
pub fn newly_completed(known: &BTreeSet<usize>, triggered: &BTreeSet<usize>) -> BTreeSet<usize> {
    let covered = |line: &Line, by_triggered: bool| {
        line.iter()
            .all(|idx| known.contains(idx) || (by_triggered && triggered.contains(idx)))
    };

    lines()
        .iter()
        .filter(|&line| covered(line, true) && !covered(line, false))
        .flat_map(|line| line.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_lines() {
        let lines = lines();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], [0, 1, 2, 3, 4]);
        assert_eq!(lines[4], [20, 21, 22, 23, 24]);
        assert_eq!(lines[5], [0, 5, 10, 15, 20]);
        assert_eq!(lines[9], [4, 9, 14, 19, 24]);
        assert_eq!(lines[10], [0, 6, 12, 18, 24]);
        assert_eq!(lines[11], [4, 8, 12, 16, 20]);
        // Bonus rules sit off the board
        assert!(lines.iter().all(|line| line.iter().all(|&idx| idx < 25)));
    }

    #[test]
    fn test_single_submission_completes_row() {
        let newly = newly_completed(&set(&[25, 26]), &set(&[0, 1, 2, 3, 4, 7]));
        assert_eq!(newly, set(&[0, 1, 2, 3, 4]));
    }

    #[test]
    fn test_cumulative_completion() {
        // Row 0 known already; column 0 finishes with 0 from the known set
        let known = set(&[0, 1, 2, 3, 4, 25, 26]);
        let newly = newly_completed(&known, &set(&[5, 10, 15, 20]));
        assert_eq!(newly, set(&[0, 5, 10, 15, 20]));
    }

    #[test]
    fn test_already_complete_line_is_not_new() {
        let known = set(&[0, 1, 2, 3, 4]);
        assert!(newly_completed(&known, &set(&[0, 1, 2, 3, 4])).is_empty());
    }

    #[test]
    fn test_incomplete_line() {
        assert!(newly_completed(&BTreeSet::new(), &set(&[4, 7, 9, 17, 18, 19, 22, 23, 24])).is_empty());
    }

    #[test]
    fn test_crossing_lines() {
        // Row 2 and both diagonals through the centre
        let triggered = set(&[10, 11, 12, 13, 14, 0, 6, 18, 24, 4, 8, 16, 20]);
        let newly = newly_completed(&BTreeSet::new(), &triggered);
        assert_eq!(newly, triggered);
    }
}
