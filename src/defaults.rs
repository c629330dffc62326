// src/defaults.rs

// Aggregation Constants
pub const ZERO_DEMAND_POLICY: &str = "error";
pub const PARALLEL: bool = true;
pub const MIN_PARALLEL_ROWS: usize = 64;

// Processing Constants
pub const THREADS: usize = 0; // 0 = rayon global pool
pub const MAX_THREADS: usize = 256;

// Other Constants
pub const VERBOSITY: i32 = 3;

// Self-test matrices (4x4, row-major)
pub const SELFTEST_X: [f64; 16] = [
    3.0, 4.0, 6.0, 10.0, //
    7.0, 4.0, 5.0, 11.0, //
    12.0, 8.0, 5.0, 6.0, //
    13.0, 7.0, 9.0, 6.0,
];
pub const SELFTEST_Y: [f64; 16] = [
    10.0, 9.0, 12.0, 16.0, //
    17.0, 10.0, 13.0, 11.0, //
    11.0, 14.0, 12.0, 18.0, //
    12.0, 13.0, 19.0, 15.0,
];
