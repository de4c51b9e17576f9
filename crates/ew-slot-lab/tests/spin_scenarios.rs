//! Spin scenarios with pinned draws and persisted spin logs

use std::sync::Arc;

use ew_core::ManualClock;
use ew_slot_lab::{
    BackgroundSink, JsonLinesSink, LineOutcome, ScriptedRng, SlotConfig, SlotEngine, Symbol,
};

fn engine(symbols: &[usize], units: &[f64]) -> SlotEngine {
    let rng = ScriptedRng::new(symbols.to_vec()).with_units(units.to_vec());
    SlotEngine::with_rng(SlotConfig::default(), rng)
        .unwrap()
        .with_clock(ManualClock::new(1_700_000_000_000))
}

#[test]
fn triple_pays_between_two_and_five_times() {
    for u in [0.0, 0.1, 0.5, 0.9, 0.999] {
        let mut engine = engine(&[1, 1, 1], &[u]);
        let mut state = engine.new_state();

        let result = engine.spin(&mut state, 10).unwrap();
        assert!(result.is_win);
        assert!(!result.near_miss);
        assert!((20..=49).contains(&result.win), "win {} for u={}", result.win, u);
        assert_eq!(result.win, (10.0 * (2.0 + 3.0 * u)).floor() as i64);
        assert_eq!(state.balance(), 1000 - 10 + result.win);
    }
}

#[test]
fn near_miss_iff_exactly_two_match() {
    let lines: [[usize; 3]; 6] = [[1, 1, 2], [2, 1, 1], [0, 2, 0], [0, 1, 2], [2, 0, 1], [1, 2, 0]];
    for line in lines {
        let mut engine = engine(&line, &[]);
        let mut state = engine.new_state();
        let result = engine.spin(&mut state, 10).unwrap();

        let expected = LineOutcome::classify(&line.map(Symbol::from_index));
        assert_eq!(result.near_miss, expected == LineOutcome::NearMiss);
        assert!(!result.is_win);
        assert_eq!(result.win, 0);
        assert_eq!(state.balance(), 990);
    }
}

#[test]
fn bet_presets_and_arbitrary_bets_accepted() {
    let mut engine = engine(&[0, 1, 2], &[]);
    let mut state = engine.new_state();
    let presets = engine.config().bet_presets.clone();

    for bet in presets.iter().copied().chain([1, 7, 333]) {
        engine.spin(&mut state, bet).unwrap();
    }
    assert_eq!(state.balance(), 1000 - 10 - 50 - 1 - 7 - 333);
}

#[test]
fn spin_log_persists_through_background_sink() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spins.jsonl");

    let file_sink = JsonLinesSink::open(&path).unwrap();
    let background = Arc::new(BackgroundSink::spawn(file_sink, 128).unwrap());

    let mut engine = SlotEngine::seeded(SlotConfig::default(), 2024)
        .unwrap()
        .with_sink(background.clone());
    let mut state = engine.new_state();
    for _ in 0..25 {
        engine.spin(&mut state, 10).unwrap();
    }

    // Last handle dropped here flushes and joins the worker
    drop(engine);
    drop(background);

    let stored = JsonLinesSink::read_all(&path).unwrap();
    assert_eq!(stored.len(), 25);
    for (snap, spin) in stored.iter().zip(state.history()) {
        assert_eq!(snap.id, spin.id);
        assert_eq!(snap.win, spin.win);
        assert_eq!(snap.balance, spin.balance_after);
        assert_eq!(snap.symbols, spin.symbols.map(|s| s as u8));
    }
}
