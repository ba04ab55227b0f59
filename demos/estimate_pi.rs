// Use Buffon's needle to estimate the value of pi. Needles as long as the
// grid spacing are dropped on a table ruled with parallel lines. A needle
// crosses a line with probability 2/pi, so
//
//   # crossing     2              2 * # dropped
//  ------------ = ----    =>    --------------- ~= pi
//   # dropped      pi              # crossing
//
use buffon::prelude::*;
use std::f64::consts::PI;

fn main() {
    env_logger::builder().init();

    // The number of needles to drop
    let n_drops: usize = 1_000_000;

    let table = NeedleDrop::unit_cell();
    let mut rng = rand::thread_rng();

    let n_cross = table
        .sample_stream(&mut rng)
        .take(n_drops)
        // Count the needles that land across a line
        .filter(|needle: &Needle| needle.crosses_grid_line())
        .count();

    let outcome = TrialOutcome::new(n_drops, n_cross)
        .expect("cannot cross more needles than were dropped");

    match outcome.pi_estimate() {
        Ok(pi_est) => println!(
            "π_est: {}, π_true: {}, absolute error: {}",
            pi_est,
            PI,
            (pi_est - PI).abs()
        ),
        Err(err) => eprintln!("{err}"),
    }
}
