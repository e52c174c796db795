//! End-to-end temperature scans on small lattices.

use ising_scan::lattice::{Init, Topology};
use ising_scan::sweep::{run_scan_collect, ScanConfig};

use approx::assert_abs_diff_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn test_cold_start_at_low_temperature_stays_magnetized() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xDEADBEEF);

    // Single temperature far below T_c, no thermalization, one sweep:
    // flips are exponentially suppressed, |m| per spin stays at 1.
    let cfg = ScanConfig {
        size: 4,
        max_t: 0.01,
        min_t: 0.01,
        therm_sweeps: 0,
        measure_sweeps: 1,
        init: Init::Cold,
        ..ScanConfig::default()
    };

    let records = run_scan_collect(&cfg, &mut rng);
    assert_eq!(records.len(), 1);
    assert!(records[0].mag_abs > 0.99, "|m| = {}", records[0].mag_abs);
    assert_abs_diff_eq!(records[0].energy, -2.0, epsilon = 0.1);
}

#[test]
fn test_hot_start_at_high_temperature_stays_disordered() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);

    // At T = 1000 the lattice is an uncorrelated ±1 grid; ⟨|M|⟩ for 16
    // random spins is O(1/√n) per spin, nowhere near saturation.
    let cfg = ScanConfig {
        size: 4,
        max_t: 1000.0,
        min_t: 1000.0,
        therm_sweeps: 5,
        measure_sweeps: 400,
        init: Init::Hot,
        ..ScanConfig::default()
    };

    let records = run_scan_collect(&cfg, &mut rng);
    assert_eq!(records.len(), 1);
    assert!(
        records[0].mag_abs < 0.6,
        "disordered lattice reported |m| = {}",
        records[0].mag_abs
    );
}

#[test]
fn test_temperatures_descend_inclusively() {
    let mut rng = ChaCha20Rng::seed_from_u64(8);

    let cfg = ScanConfig {
        size: 4,
        max_t: 2.0,
        min_t: 1.0,
        t_step: 0.25,
        therm_sweeps: 1,
        measure_sweeps: 2,
        ..ScanConfig::default()
    };

    let records = run_scan_collect(&cfg, &mut rng);
    let ts: Vec<f64> = records.iter().map(|r| r.t).collect();
    assert_eq!(ts.len(), 5);
    assert_abs_diff_eq!(ts[0], 2.0);
    assert_abs_diff_eq!(*ts.last().unwrap(), 1.0, epsilon = 1e-9);
    for pair in ts.windows(2) {
        assert!(pair[1] < pair[0], "temperatures not strictly descending: {ts:?}");
    }
}

#[test]
fn test_scan_observables_stay_non_negative() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);

    for &topology in &[Topology::Square, Topology::Triangular] {
        let cfg = ScanConfig {
            size: 8,
            topology,
            max_t: 3.0,
            min_t: 1.0,
            t_step: 0.5,
            therm_sweeps: 10,
            measure_sweeps: 50,
            ..ScanConfig::default()
        };

        for rec in run_scan_collect(&cfg, &mut rng) {
            assert!(rec.specific_heat >= 0.0, "C < 0 at T = {}", rec.t);
            assert!(rec.chi >= 0.0, "χ < 0 at T = {}", rec.t);
            assert!(rec.mag_abs >= 0.0 && rec.mag_abs <= 1.0);
        }
    }
}

#[test]
fn test_cold_scan_below_tc_keeps_positive_magnetization() {
    let mut rng = ChaCha20Rng::seed_from_u64(10);

    // Well below T_c ≈ 2.269 a cold-started ferromagnet must not lose its
    // sign over a short descending scan.
    let cfg = ScanConfig {
        size: 4,
        max_t: 0.5,
        min_t: 0.3,
        t_step: 0.1,
        therm_sweeps: 5,
        measure_sweeps: 20,
        init: Init::Cold,
        ..ScanConfig::default()
    };

    for rec in run_scan_collect(&cfg, &mut rng) {
        assert!(rec.mag > 0.9, "m = {} at T = {}", rec.mag, rec.t);
    }
}

#[test]
fn test_config_validation_rejects_bad_ranges() {
    let bad_step = ScanConfig { t_step: 0.0, ..ScanConfig::default() };
    assert!(bad_step.validate().is_err());

    let bad_range = ScanConfig { max_t: 0.5, min_t: 5.0, ..ScanConfig::default() };
    assert!(bad_range.validate().is_err());

    let bad_size = ScanConfig { size: 1, ..ScanConfig::default() };
    assert!(bad_size.validate().is_err());

    assert!(ScanConfig::default().validate().is_ok());
}
