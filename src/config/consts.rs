// src/config/consts.rs

// Net config
pub const DEFAULT_BASE_URL: &str = "http://81.60.206.190";
pub const FETCH_TIMEOUT_SECS: u64 = 25;

// Pagination: ?ovrideStart=<offset>, twelve rows per page on every
// firmware revision seen so far. MAX_PAGES bounds a misbehaving server.
pub const OFFSET_PARAM: &str = "ovrideStart";
pub const PAGE_STRIDE: u32 = 12;
pub const MAX_PAGES: u32 = 8;

// Table scoring
pub const HEADER_KEYWORDS: [&str; 4] = ["item", "label", "value", "units"];
pub const KEYWORD_WEIGHT: u32 = 2;
pub const ROWS_PER_BONUS_POINT: u32 = 5;

// Data directory layout
pub const DEFAULT_DATA_DIR: &str = "data";
pub const SENSORS_LATEST_FILE: &str = "latest.json";
pub const DRIVERS_LATEST_FILE: &str = "drivers_latest.json";
pub const COMBINED_LATEST_FILE: &str = "latest_all.json";
pub const SENSORS_MANIFEST_FILE: &str = "sensors_manifest.json";
pub const DRIVERS_MANIFEST_FILE: &str = "drivers_manifest.json";
pub const DRIVER_HISTORY_PREFIX: &str = "drv_";
pub const HISTORY_EXT: &str = "txt";
pub const DEFAULT_LOG_FILE: &str = "poll.log";

// History lines: "<timestamp>;<value>\n"
pub const HISTORY_SEP: char = ';';

// Render
pub const DEFAULT_TEMPLATE_FILE: &str = "esquema.drawio.svg";
pub const DEFAULT_RENDER_FILE: &str = "esquema_render.svg";
pub const MAX_TOKEN_ORDINAL: u32 = 99;
pub const SLUG_MAX_LEN: usize = 40;
pub const SLUG_FALLBACK: &str = "sin_label";

// Driver tri-state. The controller reports Spanish tokens on some firmware.
pub const ON_TOKENS: [&str; 7] = ["on", "1", "true", "yes", "si", "sí", "marcha"];
pub const OFF_TOKENS: [&str; 5] = ["off", "0", "false", "no", "paro"];

// Default paint rules: driver item, structural cell id, fill, spin.
pub const DEFAULT_PAINT_RULES: [(&str, &str, &str, bool); 2] = [
    ("D4", "bomba_acs", "#2e7d32", true),
    ("D6", "caldera", "#c62828", false),
];
