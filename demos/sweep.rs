// Characterize the estimator: 50 trials at each of 10, 100, 1000, 10000 and
// 100000 needles, summarized and drawn as a text histogram.
//
// Pass a seed as the first argument for a reproducible run.
use buffon::{DegeneratePolicy, Experiment};

const N_BINS: usize = 12;

fn histogram(xs: &[f64], lo: f64, hi: f64) -> Vec<usize> {
    let width = (hi - lo) / N_BINS as f64;
    let mut counts = vec![0; N_BINS];
    for x in xs {
        let ix = ((x - lo) / width).floor();
        if ix >= 0.0 {
            counts[(ix as usize).min(N_BINS - 1)] += 1;
        }
    }
    counts
}

fn main() {
    env_logger::builder().init();

    let mut experiment =
        Experiment::default().with_policy(DegeneratePolicy::Skip);
    if let Some(seed) = std::env::args().nth(1).and_then(|s| s.parse().ok()) {
        experiment = experiment.with_seed(seed);
    }

    let result = match experiment.run() {
        Ok(result) => result,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    for batch in result.batches() {
        let Some(summary) = batch.summary() else {
            println!("{:>7} needles: no estimates", batch.num_drops());
            continue;
        };
        println!("{:>7} needles: {}", batch.num_drops(), summary);
        if batch.n_degenerate() > 0 {
            println!("         {} trials had no crossings", batch.n_degenerate());
        }
        let counts = histogram(batch.estimates(), summary.min, summary.max);
        for count in counts {
            println!("         |{}", "#".repeat(count));
        }
    }
}
