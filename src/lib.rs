use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

pub mod config;
pub mod filter;
pub mod permissions;
pub mod session;
pub mod settings;
pub mod sort;
pub mod storage;
pub mod upload;
pub mod users;

pub use config::DashboardConfig;
pub use filter::{DateRange, FilterCriteria, FilterPatch, TypeCategory};
pub use session::{FileCounts, SessionState};
pub use sort::{SortDirection, SortField, SortSpec};
pub use upload::{UploadRejection, UploadStatus, UploadTask};
pub use users::{AuthError, UserDirectory};

/// Raised when a display label does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown role: {0}")]
    Role(String),
    #[error("unknown access level: {0}")]
    AccessLevel(String),
    #[error("unknown file type category: {0}")]
    Category(String),
    #[error("unknown sort field: {0}")]
    SortField(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-file permission tier. Only used to decide which actions are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    View,
    Edit,
    Admin,
}

impl AccessLevel {
    pub fn label(self) -> &'static str {
        match self {
            AccessLevel::View => "Can View",
            AccessLevel::Edit => "Can Edit",
            AccessLevel::Admin => "Full Access",
        }
    }
}

impl FromStr for AccessLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "view" => Ok(AccessLevel::View),
            "edit" => Ok(AccessLevel::Edit),
            "admin" => Ok(AccessLevel::Admin),
            _ => Err(ParseError::AccessLevel(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::Viewer];

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Editor => "Editor",
            Role::Viewer => "Viewer",
        }
    }
}

impl FromStr for Role {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            _ => Err(ParseError::Role(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    pub name: String,
    pub size: u64,
    /// MIME-like type string, e.g. `application/pdf`.
    pub file_type: String,
    pub uploaded_at: DateTime<Utc>,
    /// Email of the uploader.
    pub uploaded_by: String,
    pub version: u32,
    pub tags: Vec<String>,
    pub shared: bool,
    pub access_level: AccessLevel,
    pub download_count: u32,
}

impl FileRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(feature = "frontend")]
pub mod frontend;

#[cfg(feature = "frontend")]
pub use frontend::*;
