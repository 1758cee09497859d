//! N-queens as a constraint problem.
//!
//! Cells are named `x<row><col>` with 1-based indices, so boards are limited
//! to 9 by 9.

use quench_ir::{Assignment, ConstraintSet, IrError, IrResult};

/// Largest board whose cell names stay unambiguous.
pub const MAX_BOARD: usize = 9;

fn cell(row: usize, col: usize) -> String {
    format!("x{row}{col}")
}

/// One row of four cells with exactly one queen, as an `AnyOf` plus six
/// pairwise `NotBoth` constraints.
pub fn single_row() -> IrResult<ConstraintSet> {
    let cells = ["x1", "x2", "x3", "x4"];
    let mut set = ConstraintSet::new();
    set.any_of(&cells)?;
    for (i, a) in cells.iter().enumerate() {
        for b in &cells[i + 1..] {
            set.not_both(a, b)?;
        }
    }
    Ok(set)
}

/// An `n` by `n` board: a queen in every row, and no two queens sharing a
/// row, column or diagonal.
pub fn board(n: usize) -> IrResult<ConstraintSet> {
    if n == 0 || n > MAX_BOARD {
        return Err(IrError::InvalidModel(format!(
            "board size must be between 1 and {MAX_BOARD}, got {n}"
        )));
    }
    let mut set = ConstraintSet::new();
    for row in 1..=n {
        let cells: Vec<String> = (1..=n).map(|col| cell(row, col)).collect();
        set.any_of(&cells)?;
    }
    let cells: Vec<(usize, usize)> = (1..=n)
        .flat_map(|row| (1..=n).map(move |col| (row, col)))
        .collect();
    for (i, &(r1, c1)) in cells.iter().enumerate() {
        for &(r2, c2) in &cells[i + 1..] {
            if r1 == r2 || c1 == c2 || r1.abs_diff(r2) == c1.abs_diff(c2) {
                set.not_both(&cell(r1, c1), &cell(r2, c2))?;
            }
        }
    }
    Ok(set)
}

/// The classic 4 by 4 puzzle.
pub fn four_queens() -> IrResult<ConstraintSet> {
    board(4)
}

/// Draw a solution with `Q` for queens and `*` for empty cells.
pub fn draw_board(assignment: &Assignment, n: usize) -> IrResult<String> {
    let rule = format!("{}+\n", "+-".repeat(n));
    let mut out = rule.clone();
    for row in 1..=n {
        for col in 1..=n {
            let mark = if assignment.require(&cell(row, col))? { 'Q' } else { '*' };
            out.push('|');
            out.push(mark);
        }
        out.push_str("|\n");
        out.push_str(&rule);
    }
    Ok(out)
}

/// How well a run went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// No valid samples at all.
    StruckOut,
    /// Fewer than 10% of samples were valid.
    Few,
    /// At least 10% of samples were valid.
    Plenty,
}

impl Verdict {
    /// Classify a run by its valid and invalid occurrence counts.
    pub fn from_counts(valid: u64, invalid: u64) -> Self {
        if valid == 0 {
            Verdict::StruckOut
        } else if (valid as f64) / ((valid + invalid) as f64) < 0.1 {
            Verdict::Few
        } else {
            Verdict::Plenty
        }
    }

    /// Line printed at the end of the tutorial.
    pub fn message(self) -> &'static str {
        match self {
            Verdict::StruckOut => {
                "Looks like we struck out. Try again and better luck next time."
            }
            Verdict::Few => "Not a huge number of valid solutions, but it worked!",
            Verdict::Plenty => "Wow! Look at those solutions!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row_accepts_one_hot_only() {
        let set = single_row().unwrap();
        assert_eq!(set.len(), 7);
        let mut accepted = Vec::new();
        for state in 0..16_u8 {
            let a = Assignment::from_iter(
                (0..4).map(|i| (format!("x{}", i + 1), (state >> i) & 1)),
            );
            if set.check(&a).unwrap() {
                accepted.push(a.bitstring(set.variable_names()).unwrap());
            }
        }
        assert_eq!(accepted, vec!["1000", "0100", "0010", "0001"]);
    }

    #[test]
    fn test_board_constraint_counts() {
        let set = four_queens().unwrap();
        assert_eq!(set.variable_names().len(), 16);
        // 4 rows, 24 row pairs, 24 column pairs, 28 diagonal pairs.
        assert_eq!(set.len(), 4 + 24 + 24 + 28);
        assert!(board(10).is_err());
    }

    #[test]
    fn test_draw_board() {
        let names = four_queens().unwrap().variable_names().to_vec();
        let bits: Vec<bool> = "0010100000010100".chars().map(|c| c == '1').collect();
        let drawn = draw_board(&Assignment::from_bits(&names, &bits), 4).unwrap();
        let expected = "\
+-+-+-+-+
|*|*|Q|*|
+-+-+-+-+
|Q|*|*|*|
+-+-+-+-+
|*|*|*|Q|
+-+-+-+-+
|*|Q|*|*|
+-+-+-+-+
";
        assert_eq!(drawn, expected);
    }

    #[test]
    fn test_verdict() {
        assert_eq!(Verdict::from_counts(0, 1000), Verdict::StruckOut);
        assert_eq!(Verdict::from_counts(99, 901), Verdict::Few);
        assert_eq!(Verdict::from_counts(100, 900), Verdict::Plenty);
    }
}
