//! Observability configuration, read from environment variables.

/// Variable holding the `EnvFilter` directive.
pub const FILTER_VAR: &str = "RUST_LOG";
/// Variable selecting the log output format (`json` or `pretty`).
pub const FORMAT_VAR: &str = "LOTLEDGER_LOG_FORMAT";
/// Variable toggling the event target (module path) in log lines.
pub const TARGET_VAR: &str = "LOTLEDGER_LOG_TARGET";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable, multi-line output for local debugging.
    Pretty,
}

impl LogFormat {
    /// Parse a format name. Unknown names yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub filter: String,
    pub format: LogFormat,
    pub with_target: bool,
    /// Format value that could not be parsed; reported once logging is up.
    pub unknown_format: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
            with_target: false,
            unknown_format: None,
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(filter) = lookup(FILTER_VAR).filter(|f| !f.trim().is_empty()) {
            config.filter = filter;
        }

        if let Some(raw) = lookup(FORMAT_VAR) {
            match LogFormat::parse(&raw) {
                Some(format) => config.format = format,
                None => config.unknown_format = Some(raw),
            }
        }

        config.with_target = lookup(TARGET_VAR)
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        config
    }
}
