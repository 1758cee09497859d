//! Problem definitions for the tutorials.

pub mod adder;
pub mod coin;
pub mod gates;
pub mod multiplier;
pub mod queens;
pub mod schedules;

pub use adder::{format_sum, full_adder, sanity_assignment};
pub use coin::{coin_model, heads_histogram, histogram_lines};
pub use gates::{and_constraints, and_qubo, not_constraints, not_qubo};
pub use multiplier::{MAX_PRODUCT, format_product, multiplier};
pub use queens::{Verdict, draw_board, four_queens, single_row};
pub use schedules::{biased_not_qubo, tutorial_schedules};
