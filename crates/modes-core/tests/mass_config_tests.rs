use glam::Vec2;
use modes_core::config::{SimConfig, MAX_MASSES_PER_ROW};
use modes_core::mass::MassSet;
use modes_core::spring::{chain_springs, lattice_springs_x, lattice_springs_y, spring_visible};

use std::f32::consts::PI;

#[test]
fn test_mass_set_new_initializes_correctly() {
    let masses = MassSet::new(12);

    assert_eq!(masses.count, 12);

    for i in 0..12 {
        assert_eq!(masses.equilibrium[i], Vec2::ZERO, "equilibrium[{i}] should be ZERO");
        assert_eq!(masses.displacement[i], Vec2::ZERO, "displacement[{i}] should be ZERO");
        assert_eq!(masses.velocity[i], Vec2::ZERO, "velocity[{i}] should be ZERO");
        assert_eq!(masses.acceleration[i], Vec2::ZERO, "acceleration[{i}] should be ZERO");
        assert_eq!(
            masses.previous_acceleration[i],
            Vec2::ZERO,
            "previous_acceleration[{i}] should be ZERO"
        );
        assert!(!masses.visible[i], "visible[{i}] should be false");
    }
}

#[test]
fn test_mass_set_position_is_equilibrium_plus_displacement() {
    let mut masses = MassSet::new(3);
    masses.equilibrium[1] = Vec2::new(-0.5, 0.0);
    masses.displacement[1] = Vec2::new(0.0, 0.02);

    assert_eq!(masses.position(1), Vec2::new(-0.5, 0.02));
}

#[test]
fn test_mass_set_zero_motion_keeps_equilibrium() {
    let mut masses = MassSet::new(3);
    masses.equilibrium[1] = Vec2::new(0.25, 0.0);
    masses.displacement[1] = Vec2::new(0.1, 0.1);
    masses.velocity[1] = Vec2::new(1.0, 1.0);
    masses.acceleration[1] = Vec2::new(2.0, 2.0);
    masses.previous_acceleration[1] = Vec2::new(3.0, 3.0);

    masses.zero_motion(1);

    assert_eq!(masses.equilibrium[1], Vec2::new(0.25, 0.0));
    assert_eq!(masses.displacement[1], Vec2::ZERO);
    assert_eq!(masses.velocity[1], Vec2::ZERO);
    assert_eq!(masses.acceleration[1], Vec2::ZERO);
    assert_eq!(masses.previous_acceleration[1], Vec2::ZERO);
}

#[test]
fn test_config_default_values() {
    let config = SimConfig::default();

    assert_eq!(config.spring_constant, 0.1 * 4.0 * PI * PI);
    assert_eq!(config.mass_value, 0.1);
    assert_eq!(config.fixed_dt, 1.0 / 60.0);
    assert_eq!(config.max_frame_dt, 0.15);
    assert_eq!(config.min_speed, 0.02);
    assert_eq!(config.init_speed, 1.0);
    assert_eq!(config.max_speed, 3.0);
    assert_eq!(config.max_mode_amplitude, 0.2);
    assert_eq!(config.base_max_amplitude, 0.3);
    assert_eq!(config.min_mode_phase, -PI);
    assert_eq!(config.max_mode_phase, PI);
    assert_eq!(config.left_wall_x, -1.0);
    assert_eq!(config.top_wall_y, 1.0);
    assert_eq!(config.wall_span, 2.0);
    assert_eq!(MAX_MASSES_PER_ROW, 10);
}

#[test]
fn test_lattice_amplitude_cap_shrinks_with_count() {
    let config = SimConfig::default();

    assert_eq!(config.max_mode_amplitude_2d(1), 0.3 * 2.0 / 2.0);
    assert_eq!(config.max_mode_amplitude_2d(10), 0.3 * 2.0 / 11.0);

    for n in 1..MAX_MASSES_PER_ROW {
        assert!(
            config.max_mode_amplitude_2d(n + 1) < config.max_mode_amplitude_2d(n),
            "cap should shrink from {n} to {} masses",
            n + 1
        );
    }
}

#[test]
fn test_chain_springs_connect_adjacent_slots() {
    let springs = chain_springs(12);

    assert_eq!(springs.len(), 11);
    for (i, spring) in springs.iter().enumerate() {
        assert_eq!(spring.left, i);
        assert_eq!(spring.right, i + 1);
    }
}

#[test]
fn test_lattice_springs_cover_interior_rows_and_columns() {
    let stride = 12;
    let springs_x = lattice_springs_x(stride);
    let springs_y = lattice_springs_y(stride);

    // 10 interior rows (columns), 11 spans each
    assert_eq!(springs_x.len(), 10 * 11);
    assert_eq!(springs_y.len(), 10 * 11);

    for spring in &springs_x {
        assert_eq!(spring.right, spring.left + 1, "horizontal spring spans one column");
        let row = spring.left / stride;
        assert!(row >= 1 && row <= stride - 2, "horizontal springs live on interior rows");
    }
    for spring in &springs_y {
        assert_eq!(spring.right, spring.left + stride, "vertical spring spans one row");
        let col = spring.left % stride;
        assert!(col >= 1 && col <= stride - 2, "vertical springs live on interior columns");
    }
}

#[test]
fn test_spring_visibility_follows_left_mass() {
    let mut masses = MassSet::new(4);
    let springs = chain_springs(4);

    masses.visible[0] = true;
    masses.visible[1] = true;
    // slots 2 and 3 stay invisible

    assert!(spring_visible(&masses, &springs[0]));
    assert!(spring_visible(&masses, &springs[1]));
    assert!(!spring_visible(&masses, &springs[2]));
}
