//! Fitness scoring.

/// Scalar fitness for an organism that produced `children` within a budget of
/// `step_budget` steps. Lower is better: `1.0` means no offspring.
pub fn reproductive_fitness(children: u32, step_budget: usize) -> f64 {
    if step_budget == 0 {
        return 1.0;
    }
    1.0 - (children as f64 / step_budget as f64)
}

/// Recover the offspring count from a fitness value, for progress reporting
pub fn children_from_fitness(fitness: f64, step_budget: usize) -> u32 {
    ((1.0 - fitness) * step_budget as f64).round().max(0.0) as u32
}
