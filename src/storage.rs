use serde::{Deserialize, Serialize};

use crate::filter::TypeCategory;
use crate::FileRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageBucket {
    Documents,
    Images,
    Videos,
    Audio,
    Other,
}

impl StorageBucket {
    pub const ALL: [StorageBucket; 5] = [
        StorageBucket::Documents,
        StorageBucket::Images,
        StorageBucket::Videos,
        StorageBucket::Audio,
        StorageBucket::Other,
    ];

    pub fn of(file_type: &str) -> Self {
        if TypeCategory::Image.matches(file_type) {
            StorageBucket::Images
        } else if TypeCategory::Video.matches(file_type) {
            StorageBucket::Videos
        } else if TypeCategory::Audio.matches(file_type) {
            StorageBucket::Audio
        } else if TypeCategory::Pdf.matches(file_type) || TypeCategory::Document.matches(file_type) {
            StorageBucket::Documents
        } else {
            StorageBucket::Other
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StorageBucket::Documents => "Documents",
            StorageBucket::Images => "Images",
            StorageBucket::Videos => "Videos",
            StorageBucket::Audio => "Audio",
            StorageBucket::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    Normal,
    Warning,
    Critical,
}

impl UsageLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 80.0 {
            UsageLevel::Critical
        } else if percentage > 60.0 {
            UsageLevel::Warning
        } else {
            UsageLevel::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketUsage {
    pub bucket: StorageBucket,
    pub bytes: u64,
    /// Share of the used space, not of the quota.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSummary {
    pub used_bytes: u64,
    pub total_files: usize,
    pub quota_bytes: u64,
    pub used_percentage: f64,
    pub level: UsageLevel,
    pub breakdown: Vec<BucketUsage>,
}

impl StorageSummary {
    pub fn from_files(files: &[FileRecord], quota_bytes: u64) -> Self {
        let used_bytes: u64 = files.iter().map(|f| f.size).sum();
        let used_percentage = percentage_of(used_bytes, quota_bytes);

        let breakdown = StorageBucket::ALL
            .into_iter()
            .map(|bucket| {
                let bytes = files
                    .iter()
                    .filter(|f| StorageBucket::of(&f.file_type) == bucket)
                    .map(|f| f.size)
                    .sum();
                BucketUsage {
                    bucket,
                    bytes,
                    percentage: percentage_of(bytes, used_bytes),
                }
            })
            .collect();

        Self {
            used_bytes,
            total_files: files.len(),
            quota_bytes,
            used_percentage,
            level: UsageLevel::from_percentage(used_percentage),
            breakdown,
        }
    }

    pub fn formatted_used(&self) -> String {
        format_bytes(self.used_bytes)
    }

    pub fn formatted_quota(&self) -> String {
        format_bytes(self.quota_bytes)
    }
}

fn percentage_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
