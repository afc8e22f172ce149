// Snapshot format
pub const SAVE_VERSION: u32 = 1;
pub const SAVE_FILE_NAME: &str = "progress.json";

// Round budgets
pub const ROUND_ATTEMPTS: u32 = 3;
pub const MAX_SEQUENCE_LENGTH: usize = 12;

// Path hint reveal (per cell: lit, then dark, then a settle pause after the last cell)
pub const PATH_CELL_VISIBLE_MS: u64 = 400;
pub const PATH_CELL_GAP_MS: u64 = 100;
pub const PATH_HINT_SETTLE_MS: u64 = 500;

// Echo playback
pub const ECHO_SHAPE_VISIBLE_MS: u64 = 800;
pub const ECHO_SHAPE_GAP_MS: u64 = 400;
pub const ECHO_SETTLE_MS: u64 = 500;

// Lane runner. Obstacle positions are integer hundredths of the track.
pub const RUNNER_UPDATE_TICK_MS: u64 = 16;
pub const RUNNER_MAX_FRAME_MS: u64 = 100;
pub const LANE_COUNT: u8 = 3;
pub const RUNNER_START_LANE: u8 = 1;
pub const TRACK_STEP: u32 = 1;
pub const TRACK_UNITS: u32 = 100;
pub const COLLISION_BAND_LOW: u32 = 80;
pub const COLLISION_BAND_HIGH: u32 = 90;
pub const SCORE_LINE: u32 = 100;
pub const PRUNE_LINE: u32 = 110;
