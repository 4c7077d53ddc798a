//! Calibration harness: runs batches of independent games over
//! style-directed random rosters and writes a JSON aggregate.

use anyhow::{Context, Result};
use clap::Parser;
use ob_core::calibration::{build_team, compute_game_metrics, style_profile, StatsAccumulator};
use ob_core::{
    simulate_game_with_sink, EraSelector, GameContext, ReplaySink, SimOptions, VecSink,
    ENGINE_VERSION,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;
use std::collections::BTreeMap;
use std::fs;

#[derive(Debug, Parser)]
#[command(name = "ob_harness", about = "Possession engine calibration batches")]
struct Args {
    /// Number of games to simulate.
    #[arg(long = "n_games", default_value_t = 1000)]
    n_games: u64,

    /// Base seed; game i runs under seed + i.
    #[arg(long, default_value_t = 123)]
    seed: u64,

    /// Roster/tactic style profile.
    #[arg(long, default_value = "modern", value_parser = ["modern", "motion", "post", "pace"])]
    style: String,

    /// Era name, path to an era json, or "default".
    #[arg(long, default_value = "default")]
    era: String,

    /// Enable replay event emission (counts events per game).
    #[arg(long, default_value_t = false)]
    replay: bool,

    /// Abort on the first validation error instead of embedding reports.
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Keep per-game metric rows in the output file.
    #[arg(long = "store_per_game", default_value_t = false)]
    store_per_game: bool,

    /// Output path for the JSON aggregate.
    #[arg(long, default_value = "calibration_output.json")]
    out: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let profile = style_profile(&args.style);
    let era = EraSelector::Name(args.era.clone());
    let options = SimOptions {
        strict_validation: args.strict,
        replay_disabled: !args.replay,
    };

    let mut acc = StatsAccumulator::new();
    let mut per_game: Vec<serde_json::Value> = Vec::new();
    let mut scheme_counts_off: BTreeMap<String, u64> = BTreeMap::new();
    let mut scheme_counts_def: BTreeMap<String, u64> = BTreeMap::new();

    for gi in 0..args.n_games {
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed + gi);
        let home_id = format!("H{gi:05}");
        let away_id = format!("A{gi:05}");
        let mut home = build_team(&mut rng, &home_id, &format!("Home{gi:05}"), &profile);
        let mut away = build_team(&mut rng, &away_id, &format!("Away{gi:05}"), &profile);

        *scheme_counts_off.entry(home.tactics.offense_scheme.clone()).or_insert(0) += 1;
        *scheme_counts_off.entry(away.tactics.offense_scheme.clone()).or_insert(0) += 1;
        *scheme_counts_def.entry(home.tactics.defense_scheme.clone()).or_insert(0) += 1;
        *scheme_counts_def.entry(away.tactics.defense_scheme.clone()).or_insert(0) += 1;

        let ctx = GameContext::new(
            format!("CALIB_{}_{gi}", args.seed),
            home_id.clone(),
            away_id.clone(),
        );

        let mut sink = VecSink::default();
        let sink_ref: Option<&mut dyn ReplaySink> =
            if args.replay { Some(&mut sink) } else { None };
        let result = simulate_game_with_sink(
            &mut rng, &mut home, &mut away, &ctx, &era, &options, sink_ref,
        )
        .with_context(|| format!("game {gi} failed"))?;

        if !result.meta.validation.ok {
            log::warn!(
                "game {gi}: validation recorded {} errors",
                result.meta.validation.errors.len()
            );
        }

        for row in compute_game_metrics(&result) {
            let mut metrics = row.metrics;
            if args.replay {
                metrics.insert("replay_events".to_string(), sink.events.len() as f64);
            }
            acc.add(&metrics);
            if args.store_per_game {
                per_game.push(json!({
                    "game": gi,
                    "team": row.team,
                    "opponent": row.opponent,
                    "metrics": metrics,
                }));
            }
        }
    }

    let mut out = json!({
        "meta": {
            "engine_version": ENGINE_VERSION,
            "seed": args.seed,
            "n_games": args.n_games,
            "style": profile.name,
            "era": args.era,
            "strict": args.strict,
            "replay": args.replay,
        },
        "scheme_counts": {
            "offense": scheme_counts_off,
            "defense": scheme_counts_def,
        },
        "summary": acc.summary(),
    });
    if args.store_per_game {
        out["per_game"] = json!(per_game);
    }

    fs::write(&args.out, serde_json::to_string_pretty(&out)?)
        .with_context(|| format!("writing {}", args.out))?;
    println!("{}", args.out);
    Ok(())
}
