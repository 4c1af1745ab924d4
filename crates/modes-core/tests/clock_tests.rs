use modes_core::clock::SimulationClock;
use modes_core::config::SimConfig;

fn make_clock() -> SimulationClock {
    SimulationClock::new(&SimConfig::default())
}

// ---------------------------------------------------------------------------
// 1. Sub-step deltas accumulate until they cross the fixed step
// ---------------------------------------------------------------------------

#[test]
fn test_small_deltas_accumulate() {
    let mut clock = make_clock();

    // 10 ms is below the 1/60 s step; the first call banks it
    assert_eq!(clock.drain(0.01), 0);
    // 20 ms banked now crosses one step
    assert_eq!(clock.drain(0.01), 1);
}

// ---------------------------------------------------------------------------
// 2. Large frame deltas are clamped (suspended-tab protection)
// ---------------------------------------------------------------------------

#[test]
fn test_huge_delta_is_clamped() {
    let mut clock = make_clock();

    // 0.15 s cap => at most 9 steps of 1/60 s, no matter the delta
    let steps = clock.drain(1000.0);
    assert!(
        (8..=9).contains(&steps),
        "a clamped frame should drain at most 0.15 s of steps, got {steps}"
    );
}

#[test]
fn test_clamped_delta_equals_cap_delta() {
    let mut clock_a = make_clock();
    let mut clock_b = make_clock();

    for _ in 0..5 {
        assert_eq!(clock_a.drain(10.0), clock_b.drain(0.15));
    }
}

// ---------------------------------------------------------------------------
// 3. Determinism: identical call sequences drain identical step counts
// ---------------------------------------------------------------------------

#[test]
fn test_drain_is_deterministic() {
    let deltas = [0.016, 0.04, 0.002, 0.1, 0.0333, 0.016, 0.07];

    let mut clock_a = make_clock();
    let mut clock_b = make_clock();
    for dt in deltas {
        assert_eq!(clock_a.drain(dt), clock_b.drain(dt), "dt = {dt}");
    }
}

// ---------------------------------------------------------------------------
// 4. Speed is clamped and scales the per-step simulation delta
// ---------------------------------------------------------------------------

#[test]
fn test_speed_clamping() {
    let mut clock = make_clock();
    assert_eq!(clock.speed(), 1.0);

    clock.set_speed(100.0);
    assert_eq!(clock.speed(), 3.0);

    clock.set_speed(0.0);
    assert_eq!(clock.speed(), 0.02);
}

#[test]
fn test_step_dt_scales_with_speed() {
    let mut clock = make_clock();
    assert_eq!(clock.step_dt(), 1.0 / 60.0);

    clock.set_speed(2.0);
    assert_eq!(clock.step_dt(), 2.0 / 60.0);
}

// ---------------------------------------------------------------------------
// 5. Reset clears time, speed and the banked remainder
// ---------------------------------------------------------------------------

#[test]
fn test_reset_clears_accumulator() {
    let mut clock = make_clock();
    clock.time = 4.2;
    clock.playing = false;
    clock.set_speed(3.0);
    clock.drain(0.01); // bank a remainder

    clock.reset();

    assert!(clock.playing);
    assert_eq!(clock.time, 0.0);
    assert_eq!(clock.speed(), 1.0);
    // the banked 10 ms is gone, so another 10 ms drains nothing
    assert_eq!(clock.drain(0.01), 0);
}

#[test]
fn test_reset_time_leaves_playback_alone() {
    let mut clock = make_clock();
    clock.time = 1.5;
    clock.playing = false;
    clock.set_speed(2.0);

    clock.reset_time();

    assert_eq!(clock.time, 0.0);
    assert!(!clock.playing);
    assert_eq!(clock.speed(), 2.0);
}
