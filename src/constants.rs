pub const INITIAL_PRICE_USD_OZ: f64 = 2_350.0;
pub const MAX_STEP_USD_OZ: f64 = 10.0;
pub const PRICE_FLOOR: f64 = 0.01;
pub const HISTORY_CAPACITY: usize = 30;
pub const TREND_LOOKBACK: usize = 3;
pub const TREND_THRESHOLD_PCT: f64 = 0.5;
pub const TICK_INTERVAL_MS: u64 = 2_000;

pub const GRAMS_PER_TROY_OUNCE: f64 = 31.103_476_8;
pub const USD_RATE: f64 = 1.0;
pub const SGD_RATE: f64 = 1.35;
pub const EUR_RATE: f64 = 0.92;

pub const BEST_CASE_RATE: f64 = 0.08;
pub const WORST_CASE_RATE: f64 = -0.05;

pub const TOTO_PICKS: usize = 6;
pub const TOTO_MAX_NUMBER: u8 = 49;
