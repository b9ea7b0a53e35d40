/// Mock backend configuration, read from the environment
///
/// | Variable | Default |
/// |----------|---------|
/// | PORT | 8080 |
/// | LOG_LEVEL | info |
/// | LOG_DIR | (stdout) |
/// | LOG_JSON | false |
/// | SEED_DEMO_SHIFTS | true |
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    /// Daily rolling log files go here when the directory exists
    pub log_dir: Option<String>,
    pub log_json: bool,
    /// Start with a breakfast/lunch/dinner sample set
    pub seed_demo_shifts: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            seed_demo_shifts: std::env::var("SEED_DEMO_SHIFTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
