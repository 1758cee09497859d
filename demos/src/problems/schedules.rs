//! Custom anneal schedules on a slightly biased NOT gate.

use quench_hal::{AnnealSchedule, HalResult};
use quench_ir::{EnergyModel, IrResult};

/// NOT gate with `q0` favored by an extra -0.1 bias, so the two ground
/// states are no longer degenerate.
pub fn biased_not_qubo() -> IrResult<EnergyModel> {
    EnergyModel::from_qubo([
        (("q0", "q0"), -1.1),
        (("q0", "q4"), 0.0),
        (("q4", "q0"), 2.0),
        (("q4", "q4"), -1.0),
    ])
}

/// The three schedules compared by the tutorial, with a short description.
///
/// 1. Quench to full strength after 5 us.
/// 2. Half strength at 5 us, full strength at 20 us.
/// 3. Jump to 80% in 1 us, pause until 19 us, finish at 20 us.
pub fn tutorial_schedules() -> HalResult<Vec<(&'static str, AnnealSchedule)>> {
    Ok(vec![
        ("quench after 5 us", AnnealSchedule::new([(0.0, 0.0), (5.0, 1.0)])?),
        (
            "ramp to 50% then finish at 20 us",
            AnnealSchedule::new([(0.0, 0.0), (5.0, 0.5), (20.0, 1.0)])?,
        ),
        (
            "pause near 80% from 1 us to 19 us",
            AnnealSchedule::new([(0.0, 0.0), (1.0, 0.8), (19.0, 0.81), (20.0, 1.0)])?,
        ),
    ])
}
