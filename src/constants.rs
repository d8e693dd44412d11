pub const SETTINGS_KEY: &str = "ripple-settings";
pub const USER_KEY: &str = "ripple-user";
pub const LAUNCH_URL_KEY: &str = "drl";
pub const LAUNCH_MODE_KEY: &str = "iframeVar";

pub const DEFAULT_ESCAPE_KEY: &str = "=";
pub const DEFAULT_ESCAPE_URL: &str = "https://google.com";

pub const CATALOG_URL_DEFAULT: &str =
  "https://raw.githubusercontent.com/WFIS01/SnipeHub-UK/refs/heads/main/connect_file.txt";
pub const TAGLINE_URL_DEFAULT: &str =
  "https://raw.githubusercontent.com/WFIS01/SnipeHub-UK/refs/heads/main/rand_text.txt";
pub const FORK_URL: &str = "https://github.com/WFIS01/SnipeHub-UK";
pub const FETCH_TIMEOUT_MS_DEFAULT: u64 = 8_000;

pub const TAGLINE_FALLBACK: &str = "Welcome to RPL v0.1.1";
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=50&width=50";
pub const RIPPLE_ICON_URL: &str = "https://i.ibb.co/KzftD25N/download-3.png";

pub const RECENT_APPS_MAX: usize = 3;
pub const FEATURED_FETCHED: usize = 3;
pub const FEATURED_PLACEHOLDER: usize = 2;

pub const CATALOG_MIN_FIELDS: usize = 5;
pub const FLAG_ORIGINAL: i64 = 2;
pub const FLAG_SRCDOC: i64 = 2;

pub const ADMIN_KEY: &str = "1282";
pub const PIN_LENGTH: usize = 4;
pub const SNIPE_ID_LENGTH: usize = 6;
