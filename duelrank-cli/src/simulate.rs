/// Simulate command: rank synthetic items with an automatic judge.
///
/// The oracle knows a hidden order and answers every question from it,
/// optionally flipping a fraction of answers to mimic an inconsistent human.
/// Reports comparisons used against the theoretical worst case and how far
/// the result is from the hidden order.
use duelrank_core::{Duel, RankingSession, theoretical_total_comparisons};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashMap;

use crate::bail;
use crate::judge::{Judge, Outcome, run_session};

/// Answers from a hidden ranking. Lower rank is better.
pub struct OracleJudge {
    rank_of: HashMap<String, usize>,
    error_rate: f64,
    rng: StdRng,
    /// Number of answers deliberately flipped.
    pub flipped: usize,
}

impl OracleJudge {
    pub fn new(hidden_order: &[String], error_rate: f64, rng: StdRng) -> Self {
        let rank_of = hidden_order
            .iter()
            .enumerate()
            .map(|(rank, name)| (name.clone(), rank))
            .collect();
        OracleJudge { rank_of, error_rate, rng, flipped: 0 }
    }

    fn rank(&self, name: &str) -> Result<usize, String> {
        self.rank_of
            .get(name)
            .copied()
            .ok_or_else(|| format!("Oracle has no rank for item \"{name}\""))
    }
}

impl Judge<String> for OracleJudge {
    fn judge(&mut self, duel: &Duel<'_, String>) -> Result<Option<bool>, String> {
        let truth = self.rank(duel.challengee)? < self.rank(duel.challenger)?;
        if self.error_rate > 0.0 && self.rng.random::<f64>() < self.error_rate {
            self.flipped += 1;
            return Ok(Some(!truth));
        }
        Ok(Some(truth))
    }
}

/// Summary of one simulated ranking.
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub items: usize,
    pub comparisons: usize,
    pub theoretical_max: usize,
    pub flipped_answers: usize,
    /// Items whose final position differs from the hidden order.
    pub displaced: usize,
    /// Pairs ordered differently from the hidden order (Kendall tau distance).
    pub discordant_pairs: usize,
    pub exact: bool,
}

/// Count pairs that `ranked` orders differently from `hidden`.
pub fn discordant_pairs(hidden: &[String], ranked: &[String]) -> usize {
    let position: HashMap<&str, usize> = ranked
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut count = 0;
    for i in 0..hidden.len() {
        for j in (i + 1)..hidden.len() {
            if position[hidden[i].as_str()] > position[hidden[j].as_str()] {
                count += 1;
            }
        }
    }
    count
}

/// Hide a random order over `names`, rank them in a random source order, and report.
pub fn simulate(
    names: Vec<String>,
    error_rate: f64,
    seed: Option<u64>,
) -> Result<SimulationReport, String> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut hidden = names.clone();
    hidden.shuffle(&mut rng);

    let mut source = names;
    source.shuffle(&mut rng);

    let n = source.len();
    let mut session = RankingSession::start(source).map_err(|e| e.to_string())?;
    let mut oracle = OracleJudge::new(&hidden, error_rate, rng);

    let ranked = match run_session(&mut session, &mut oracle)? {
        Outcome::Completed(ranked) => ranked,
        Outcome::Abandoned { .. } => return Err("Oracle abandoned the session".to_string()),
    };

    let displaced = ranked.iter().zip(&hidden).filter(|(a, b)| a != b).count();
    Ok(SimulationReport {
        items: n,
        comparisons: session.total_comparisons(),
        theoretical_max: theoretical_total_comparisons(n),
        flipped_answers: oracle.flipped,
        displaced,
        discordant_pairs: discordant_pairs(&hidden, &ranked),
        exact: displaced == 0,
    })
}

/// Names for synthetic items: "item-001", "item-002", ...
pub fn synthetic_names(count: usize) -> Vec<String> {
    let width = count.to_string().len().max(3);
    (1..=count).map(|i| format!("item-{i:0width$}")).collect()
}

/// Run `runs` simulations and print a report.
pub fn run_simulate(names: Vec<String>, runs: usize, error_rate: f64, seed: Option<u64>, json: bool) {
    if !(0.0..=1.0).contains(&error_rate) {
        bail(format!("--error-rate must be between 0.0 and 1.0, got {error_rate}"));
    }
    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    if unique.len() != names.len() {
        bail("Simulation items must be unique");
    }

    let mut reports = Vec::with_capacity(runs);
    for run in 0..runs {
        let run_seed = seed.map(|s| s.wrapping_add(run as u64));
        let report = simulate(names.clone(), error_rate, run_seed)
            .unwrap_or_else(|e| bail(format!("Simulation failed: {e}")));
        reports.push(report);
    }

    if json {
        let out = serde_json::to_string_pretty(&reports)
            .unwrap_or_else(|e| bail(format!("Failed to serialize report: {e}")));
        println!("{out}");
        return;
    }

    println!("── Simulation ──────────────────────────────────");
    println!("Items:                 {}", names.len());
    println!("Runs:                  {}", runs);
    println!("Error rate:            {:.1}%", error_rate * 100.0);
    if let Some(first) = reports.first() {
        println!("Worst case:            {} comparisons", first.theoretical_max);
    }

    println!();
    println!("── Comparisons ─────────────────────────────────");
    let mut counts: Vec<usize> = reports.iter().map(|r| r.comparisons).collect();
    counts.sort_unstable();
    if let (Some(min), Some(max)) = (counts.first(), counts.last()) {
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        println!("Mean:   {:.1}", mean);
        println!("Min:    {}    Max: {}", min, max);
    }

    println!();
    println!("── Accuracy ────────────────────────────────────");
    let exact = reports.iter().filter(|r| r.exact).count();
    let discordant: usize = reports.iter().map(|r| r.discordant_pairs).sum();
    println!("Exact rankings:        {}/{}", exact, reports.len());
    println!(
        "Avg discordant pairs:  {:.2}",
        discordant as f64 / reports.len().max(1) as f64
    );
}
