//! Narrowing the file collection by search text, tags and type category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{FileRecord, ParseError};

/// Coarse file kind derived from the MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
    Pdf,
    Image,
    Video,
    Audio,
    Document,
    Figma,
}

impl TypeCategory {
    pub const ALL: [TypeCategory; 6] = [
        TypeCategory::Pdf,
        TypeCategory::Image,
        TypeCategory::Video,
        TypeCategory::Audio,
        TypeCategory::Document,
        TypeCategory::Figma,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TypeCategory::Pdf => "PDF",
            TypeCategory::Image => "Image",
            TypeCategory::Video => "Video",
            TypeCategory::Audio => "Audio",
            TypeCategory::Document => "Document",
            TypeCategory::Figma => "Figma",
        }
    }

    /// A type string can fall into several categories (`text/pdf` is both
    /// PDF and Document).
    pub fn matches(self, file_type: &str) -> bool {
        match self {
            TypeCategory::Pdf => file_type.contains("pdf"),
            TypeCategory::Image => file_type.starts_with("image/"),
            TypeCategory::Video => file_type.starts_with("video/"),
            TypeCategory::Audio => file_type.starts_with("audio/"),
            TypeCategory::Document => file_type.contains("text") || file_type.contains("document"),
            TypeCategory::Figma => file_type.contains("figma"),
        }
    }
}

impl FromStr for TypeCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeCategory::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::Category(s.to_string()))
    }
}

/// Accepted as part of the criteria but not used for matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search: String,
    pub tags: Vec<String>,
    pub categories: Vec<TypeCategory>,
    pub date_range: DateRange,
}

/// Partial update of [`FilterCriteria`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<TypeCategory>>,
    pub date_range: Option<DateRange>,
}

impl FilterPatch {
    pub fn search(value: impl Into<String>) -> Self {
        Self {
            search: Some(value.into()),
            ..Self::default()
        }
    }
}

impl FilterCriteria {
    pub fn matches(&self, file: &FileRecord) -> bool {
        self.matches_search(file) && self.matches_tags(file) && self.matches_category(file)
    }

    fn matches_search(&self, file: &FileRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        file.name.to_lowercase().contains(&needle)
            || file.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
    }

    fn matches_tags(&self, file: &FileRecord) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|tag| file.has_tag(tag))
    }

    fn matches_category(&self, file: &FileRecord) -> bool {
        self.categories.is_empty()
            || self.categories.iter().any(|c| c.matches(&file.file_type))
    }

    /// Returns the matching files in collection order.
    pub fn apply(&self, files: &[FileRecord]) -> Vec<FileRecord> {
        files.iter().filter(|f| self.matches(f)).cloned().collect()
    }

    pub fn merge(&mut self, patch: FilterPatch) {
        if let Some(search) = patch.search {
            self.search = search;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(categories) = patch.categories {
            self.categories = categories;
        }
        if let Some(date_range) = patch.date_range {
            self.date_range = date_range;
        }
    }

    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
    }

    pub fn toggle_category(&mut self, category: TypeCategory) {
        if let Some(pos) = self.categories.iter().position(|c| *c == category) {
            self.categories.remove(pos);
        } else {
            self.categories.push(category);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The date range does not count: it never narrows the list.
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || !self.tags.is_empty() || !self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccessLevel, FileId};
    use chrono::TimeZone;

    fn file(name: &str, file_type: &str, tags: &[&str]) -> FileRecord {
        FileRecord {
            id: FileId::new(name),
            name: name.to_string(),
            size: 10,
            file_type: file_type.to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            uploaded_by: "john.doe@company.com".to_string(),
            version: 1,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            shared: false,
            access_level: AccessLevel::Edit,
            download_count: 0,
        }
    }

    #[test]
    fn test_search_matches_name_or_tag() {
        let report = file("Report.pdf", "application/pdf", &["urgent"]);
        let mut criteria = FilterCriteria::default();

        criteria.search = "urg".to_string();
        assert!(criteria.matches(&report));
        criteria.search = "REPORT".to_string();
        assert!(criteria.matches(&report));
        criteria.search = "xyz".to_string();
        assert!(!criteria.matches(&report));
    }

    #[test]
    fn test_search_is_not_trimmed() {
        let report = file("Report.pdf", "application/pdf", &[]);
        let criteria = FilterCriteria {
            search: " ".to_string(),
            ..FilterCriteria::default()
        };
        assert!(!criteria.matches(&report));
    }

    #[test]
    fn test_tags_match_any() {
        let f = file("a.txt", "text/plain", &["design", "ui"]);
        let mut criteria = FilterCriteria::default();
        criteria.tags = vec!["backend".to_string(), "ui".to_string()];
        assert!(criteria.matches(&f));
        criteria.tags = vec!["backend".to_string()];
        assert!(!criteria.matches(&f));
        // exact membership, unlike search
        criteria.tags = vec!["UI".to_string()];
        assert!(!criteria.matches(&f));
    }

    #[test]
    fn test_category_mapping() {
        assert!(TypeCategory::Pdf.matches("application/pdf"));
        assert!(TypeCategory::Image.matches("image/png"));
        assert!(!TypeCategory::Image.matches("application/image"));
        assert!(TypeCategory::Video.matches("video/mp4"));
        assert!(TypeCategory::Audio.matches("audio/ogg"));
        assert!(TypeCategory::Document.matches("text/plain"));
        assert!(TypeCategory::Document.matches("application/vnd.oasis.opendocument.text"));
        assert!(TypeCategory::Figma.matches("application/figma"));
        assert!(!TypeCategory::Document.matches("application/sql"));
    }

    #[test]
    fn test_predicates_are_anded() {
        let f = file("Design.fig", "application/figma", &["design"]);
        let criteria = FilterCriteria {
            search: "design".to_string(),
            tags: vec!["design".to_string()],
            categories: vec![TypeCategory::Pdf],
            ..FilterCriteria::default()
        };
        assert!(!criteria.matches(&f));

        let criteria = FilterCriteria {
            categories: vec![TypeCategory::Pdf, TypeCategory::Figma],
            ..criteria
        };
        assert!(criteria.matches(&f));
    }

    #[test]
    fn test_date_range_is_ignored() {
        let f = file("old.txt", "text/plain", &[]);
        let criteria = FilterCriteria {
            date_range: DateRange {
                start: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
                end: None,
            },
            ..FilterCriteria::default()
        };
        assert!(criteria.matches(&f));
        assert!(!criteria.is_active());
    }

    #[test]
    fn test_merge_replaces_only_given_fields() {
        let mut criteria = FilterCriteria {
            search: "report".to_string(),
            tags: vec!["urgent".to_string()],
            ..FilterCriteria::default()
        };
        criteria.merge(FilterPatch {
            categories: Some(vec![TypeCategory::Pdf]),
            ..FilterPatch::default()
        });
        assert_eq!(criteria.search, "report");
        assert_eq!(criteria.tags, vec!["urgent".to_string()]);
        assert_eq!(criteria.categories, vec![TypeCategory::Pdf]);

        criteria.merge(FilterPatch::search(""));
        assert_eq!(criteria.search, "");
        assert!(criteria.is_active());
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_tag("ui");
        criteria.toggle_category(TypeCategory::Audio);
        assert!(criteria.is_active());
        criteria.toggle_tag("ui");
        assert!(criteria.tags.is_empty());

        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("pdf".parse::<TypeCategory>(), Ok(TypeCategory::Pdf));
        assert_eq!("Figma".parse::<TypeCategory>(), Ok(TypeCategory::Figma));
        assert!("Spreadsheet".parse::<TypeCategory>().is_err());
    }

    #[test]
    fn test_apply_keeps_order() {
        let files = vec![
            file("b.txt", "text/plain", &[]),
            file("a.png", "image/png", &[]),
            file("c.txt", "text/plain", &[]),
        ];
        let criteria = FilterCriteria {
            categories: vec![TypeCategory::Document],
            ..FilterCriteria::default()
        };
        let names: Vec<_> = criteria.apply(&files).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["b.txt", "c.txt"]);
    }
}
