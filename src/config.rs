use serde::{Deserialize, Serialize};

pub const MAX_UPLOAD_SIZE: u64 = 100 * 1024 * 1024; // 100 MB
pub const PROGRESS_STEP: u8 = 10;
pub const TICK_INTERVAL_MS: u32 = 100;
pub const CLEANUP_DELAY_MS: u32 = 2000;
pub const STORAGE_QUOTA: u64 = 100 * 1024 * 1024 * 1024; // 100 GB

pub const ALLOWED_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/figma",
    "application/sql",
    "text/plain",
    "application/json",
    "application/zip",
];

/// Limits for the simulated upload pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    pub max_file_size: u64,
    pub allowed_types: Vec<String>,
    /// Progress added per tick, in percent.
    pub progress_step: u8,
    pub tick_interval_ms: u32,
    /// How long a finished task stays visible in the queue.
    pub cleanup_delay_ms: u32,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: MAX_UPLOAD_SIZE,
            allowed_types: ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
            progress_step: PROGRESS_STEP,
            tick_interval_ms: TICK_INTERVAL_MS,
            cleanup_delay_ms: CLEANUP_DELAY_MS,
        }
    }
}

impl UploadLimits {
    pub fn max_file_size_mb(&self) -> u64 {
        self.max_file_size / 1024 / 1024
    }

    pub fn is_type_allowed(&self, file_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == file_type) || file_type.starts_with("image/")
    }
}

/// Served by the host at `/config` and fetched by the dashboard on start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub debug: bool,
    pub uploads: UploadLimits,
    pub storage_quota: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            debug: false,
            uploads: UploadLimits::default(),
            storage_quota: STORAGE_QUOTA,
        }
    }
}

impl DashboardConfig {
    /// Verbosity for whichever logger the host or dashboard installs.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
