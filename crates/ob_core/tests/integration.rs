//! End-to-end engine tests: accounting identities, determinism contracts,
//! clamp law, bounded role fit and era overrides.

use ob_core::calibration::{build_team, style_profile};
use ob_core::{simulate_game, EraSelector, GameContext, GameResult, SimOptions, TeamState};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

fn matchup(seed: u64) -> (TeamState, TeamState, GameContext) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let profile = style_profile("modern");
    let home = build_team(&mut rng, "HOME", "Home", &profile);
    let away = build_team(&mut rng, "AWAY", "Away", &profile);
    (home, away, GameContext::new(format!("G{seed}"), "HOME", "AWAY"))
}

fn run(
    mut home: TeamState,
    mut away: TeamState,
    ctx: &GameContext,
    era: &EraSelector,
    seed: u64,
) -> GameResult {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    simulate_game(&mut rng, &mut home, &mut away, ctx, era, &SimOptions::default())
        .expect("simulation")
}

#[test]
fn box_score_identities_hold_across_games() {
    for seed in [1u64, 2, 3, 4, 5] {
        let (home, away, ctx) = matchup(seed);
        let result = run(home, away, &ctx, &EraSelector::from("default"), seed);
        for (id, team) in &result.teams {
            assert!(team.fgm <= team.fga, "{id}: FGM > FGA");
            assert!(team.tpm <= team.tpa, "{id}: 3PM > 3PA");
            assert!(team.tpa <= team.fga, "{id}: 3PA > FGA");
            assert!(team.ftm <= team.fta, "{id}: FTM > FTA");
            let pts = 2 * (team.fgm - team.tpm) as i64 + 3 * team.tpm as i64 + team.ftm as i64;
            assert_eq!(team.pts, pts, "{id}: points identity");
            let zones: u64 = team.shot_zones.values().map(|v| v.as_u64().unwrap_or(0)).sum();
            assert_eq!(zones, team.fga as u64, "{id}: shot zones must cover FGA");
            // outcome histogram covers at least one entry per possession
            let outcomes: u64 = team.outcome_counts.values().map(|v| v.as_u64().unwrap_or(0)).sum();
            assert!(outcomes >= team.possessions as u64, "{id}: outcomes < possessions");
        }
        let ids: Vec<&String> = result.teams.keys().collect();
        let diff = result.teams[ids[0]].possessions as i64 - result.teams[ids[1]].possessions as i64;
        assert!(diff.abs() <= 1, "possessions differ by {diff}");

        for fresh in result.game_state.fatigue.values() {
            assert!((0.0..=1.0).contains(fresh));
        }
    }
}

#[test]
fn rebound_mass_balances_missed_shots() {
    let (home, away, ctx) = matchup(12);
    let result = run(home, away, &ctx, &EraSelector::from("default"), 12);
    let ids: Vec<&String> = result.teams.keys().collect();
    let t0 = &result.teams[ids[0]];
    let t1 = &result.teams[ids[1]];
    let misses = (t0.fga - t0.fgm) + (t1.fga - t1.fgm);
    let boards = t0.orb + t0.drb + t1.orb + t1.drb;
    assert_eq!(boards, misses, "every miss is rebounded by exactly one team");
}

#[test]
fn clamp_law_out_of_range_tactics_match_preclamped() {
    let (mut wild_home, away, ctx) = matchup(21);
    let mut tame_home = wild_home.clone();

    wild_home.tactics.scheme_weight_sharpness = 3.5;
    wild_home.tactics.action_weight_mult.insert("PnR".to_string(), 9.0);
    wild_home.tactics.outcome_global_mult.insert("SHOT_3_CS".to_string(), 0.01);

    tame_home.tactics.scheme_weight_sharpness = 1.40;
    tame_home.tactics.action_weight_mult.insert("PnR".to_string(), 1.40);
    tame_home.tactics.outcome_global_mult.insert("SHOT_3_CS".to_string(), 0.70);

    let era = EraSelector::from("default");
    let wild = run(wild_home, away.clone(), &ctx, &era, 21);
    let tame = run(tame_home, away, &ctx, &era, 21);
    assert_eq!(
        serde_json::to_string(&wild.teams).unwrap(),
        serde_json::to_string(&tame.teams).unwrap()
    );
    assert_eq!(wild.meta.replay_token, tame.meta.replay_token);
}

#[test]
fn neutral_multipliers_are_a_no_op() {
    let (plain_home, away, ctx) = matchup(31);
    let mut decorated_home = plain_home.clone();
    // SpotUp and Kickout appear in every scheme table, so a 1.0 multiplier
    // cannot introduce a new action entry
    decorated_home.tactics.action_weight_mult.insert("SpotUp".to_string(), 1.0);
    decorated_home.tactics.action_weight_mult.insert("Kickout".to_string(), 1.0);
    decorated_home.tactics.outcome_global_mult.insert("SHOT_3_CS".to_string(), 1.0);
    decorated_home
        .tactics
        .opp_outcome_global_mult
        .insert("SHOT_RIM_LAYUP".to_string(), 1.0);

    let era = EraSelector::from("default");
    let plain = run(plain_home, away.clone(), &ctx, &era, 31);
    let decorated = run(decorated_home, away, &ctx, &era, 31);
    assert_eq!(
        serde_json::to_string(&plain.teams).unwrap(),
        serde_json::to_string(&decorated.teams).unwrap()
    );
}

#[test]
fn role_fit_strength_zero_ignores_role_assignments() {
    let (mut home_a, away, ctx) = matchup(41);
    home_a
        .tactics
        .context
        .insert("ROLE_FIT_STRENGTH".to_string(), json!(0.0));
    let mut home_b = home_a.clone();
    // strip the scheme participant roles but keep selector slots intact
    home_b.roles.retain(|k, _| k.chars().next().map(char::is_lowercase).unwrap_or(false));

    let era = EraSelector::from("default");
    let a = run(home_a, away.clone(), &ctx, &era, 41);
    let b = run(home_b, away, &ctx, &era, 41);
    assert_eq!(
        serde_json::to_string(&a.teams).unwrap(),
        serde_json::to_string(&b.teams).unwrap(),
        "with strength 0 outputs must not depend on role-fit assignments"
    );
}

#[test]
fn boosting_the_best_shooter_raises_three_point_makes() {
    let era = EraSelector::from("default");
    let games = 300u64;

    let rate = |boost: f64| -> f64 {
        let mut makes = 0u64;
        let mut attempts = 0u64;
        for gi in 0..games {
            let (mut home, away, ctx) = matchup(1000 + gi);
            // bump the best shooter's catch-and-shoot tools
            let best = home
                .lineup
                .iter()
                .enumerate()
                .max_by(|a, b| {
                    let va = a.1.derived.get("SHOT_3_CS").copied().unwrap_or(50.0);
                    let vb = b.1.derived.get("SHOT_3_CS").copied().unwrap_or(50.0);
                    va.partial_cmp(&vb).unwrap()
                })
                .map(|(i, _)| i)
                .unwrap();
            for key in ["SHOT_3_CS", "SHOT_3_OD", "ENDURANCE"] {
                let v = home.lineup[best].derived.get(key).copied().unwrap_or(50.0);
                home.lineup[best].derived.insert(key.to_string(), (v + boost).min(99.0));
            }
            let result = run(home, away, &ctx, &era, 5000 + gi);
            let t = &result.teams["HOME"];
            makes += t.tpm as u64;
            attempts += t.tpa as u64;
        }
        makes as f64 / attempts.max(1) as f64
    };

    let base = rate(0.0);
    let boosted = rate(10.0);
    assert!(
        boosted > base,
        "boosted 3P% {boosted:.4} should exceed baseline {base:.4}"
    );
}

#[test]
fn inline_era_can_reshape_the_shot_diet() {
    // an era whose only offense is a catch-and-shoot three
    let raw = json!({
        "name": "threes_only",
        "action_outcome_priors": {
            "PnR": {"SHOT_3_CS": 1.0},
            "DHO": {"SHOT_3_CS": 1.0},
            "Drive": {"SHOT_3_CS": 1.0},
            "Kickout": {"SHOT_3_CS": 1.0},
            "ExtraPass": {"SHOT_3_CS": 1.0},
            "PostUp": {"SHOT_3_CS": 1.0},
            "HornsSet": {"SHOT_3_CS": 1.0},
            "SpotUp": {"SHOT_3_CS": 1.0},
            "Cut": {"SHOT_3_CS": 1.0},
            "TransitionEarly": {"SHOT_3_CS": 1.0}
        }
    });
    let (home, away, ctx) = matchup(61);
    let result = run(home, away, &ctx, &EraSelector::Inline(raw), 61);
    for (id, team) in &result.teams {
        assert_eq!(team.tpa, team.fga, "{id}: every attempt must be a three");
        if team.tpa > 0 {
            let rate = team.tpm as f64 / team.tpa as f64;
            assert!((0.03..=0.97).contains(&rate), "{id}: make rate {rate}");
        }
    }
    assert_eq!(result.meta.era, "threes_only");
}

#[test]
fn foul_heavy_era_flags_fouled_out_players() {
    let raw = json!({
        "name": "hack_fest",
        "action_outcome_priors": {
            "PnR": {"FOUL_DRAW_RIM": 1.0},
            "DHO": {"FOUL_DRAW_RIM": 1.0},
            "Drive": {"FOUL_DRAW_RIM": 1.0},
            "Kickout": {"FOUL_DRAW_RIM": 1.0},
            "ExtraPass": {"FOUL_DRAW_RIM": 1.0},
            "PostUp": {"FOUL_DRAW_RIM": 1.0},
            "HornsSet": {"FOUL_DRAW_RIM": 1.0},
            "SpotUp": {"FOUL_DRAW_RIM": 1.0},
            "Cut": {"FOUL_DRAW_RIM": 1.0},
            "TransitionEarly": {"FOUL_DRAW_RIM": 1.0}
        },
        "rules": {"quarters": 1}
    });
    let (home, away, ctx) = matchup(71);
    let result = run(home, away, &ctx, &EraSelector::Inline(raw), 71);
    let fouled_out: Vec<&String> = result
        .game_state
        .player_fouls
        .iter()
        .filter(|(_, n)| **n >= 6)
        .map(|(pid, _)| pid)
        .collect();
    for pid in fouled_out {
        let fresh = result.game_state.fatigue.get(pid).copied().unwrap_or(1.0);
        assert_eq!(fresh, 0.0, "{pid} fouled out but was never flagged for the bench");
    }
    // FT volume confirms the foul pipeline actually ran
    let fta: u32 = result.teams.values().map(|t| t.fta).sum();
    assert!(fta > 50, "expected a parade to the line, saw {fta} FTA");
}

#[test]
fn era_files_load_by_name_with_directory_resolution() {
    let dir = std::env::temp_dir().join("ob_core_era_test");
    std::fs::create_dir_all(&dir).unwrap();
    let era_path = dir.join("era_heavy_paint.json");
    std::fs::write(
        &era_path,
        serde_json::to_string(&json!({
            "name": "heavy_paint",
            "version": "2.1",
            "shot_base": {
                "SHOT_RIM_LAYUP": 0.70,
                "SHOT_RIM_DUNK": 0.80,
                "SHOT_RIM_CONTACT": 0.60,
                "SHOT_TOUCH_FLOATER": 0.50,
                "SHOT_MID_CS": 0.43,
                "SHOT_MID_PU": 0.41,
                "SHOT_3_CS": 0.30,
                "SHOT_3_OD": 0.28,
                "SHOT_POST": 0.55
            }
        }))
        .unwrap(),
    )
    .unwrap();
    ob_core::era::set_base_dir(&dir);

    let (home, away, ctx) = matchup(81);
    let result = run(home, away, &ctx, &EraSelector::from("heavy_paint"), 81);
    assert_eq!(result.meta.era, "heavy_paint");
    assert_eq!(result.meta.era_version, "2.1");
    // missing blocks fill from defaults with warnings, not errors
    assert!(result.meta.validation.ok);
    assert!(result
        .meta
        .validation
        .warnings
        .iter()
        .any(|w| w.contains("filled from defaults")));
}

#[test]
fn minutes_and_fouls_stay_plausible() {
    let (home, away, ctx) = matchup(91);
    let result = run(home, away, &ctx, &EraSelector::from("default"), 91);
    let total_game_sec: u64 = 4 * 720;
    for (pid, sec) in &result.game_state.minutes_played_sec {
        assert!(
            *sec <= total_game_sec + 60,
            "{pid} played {sec}s of a {total_game_sec}s game"
        );
    }
    for (pid, fouls) in &result.game_state.player_fouls {
        assert!(*fouls <= 6, "{pid} has {fouls} fouls");
    }
    // five on court per side at the final whistle, tracked via freshness keys
    assert_eq!(result.game_state.fatigue.len(), 24);
}
