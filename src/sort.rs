use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::{FileRecord, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Name,
    Size,
    /// Upload timestamp.
    Modified,
    Type,
}

impl SortField {
    pub fn label(self) -> &'static str {
        match self {
            SortField::Name => "Name",
            SortField::Size => "Size",
            SortField::Modified => "Modified",
            SortField::Type => "Type",
        }
    }

    fn compare(self, a: &FileRecord, b: &FileRecord) -> Ordering {
        match self {
            SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortField::Size => a.size.cmp(&b.size),
            SortField::Modified => a.uploaded_at.cmp(&b.uploaded_at),
            SortField::Type => a.file_type.to_lowercase().cmp(&b.file_type.to_lowercase()),
        }
    }
}

impl FromStr for SortField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortField::Name),
            "size" => Ok(SortField::Size),
            "modified" | "uploaded_at" | "uploadedat" => Ok(SortField::Modified),
            "type" => Ok(SortField::Type),
            _ => Err(ParseError::SortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Modified,
            direction: SortDirection::Desc,
        }
    }
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Column header click: the active ascending column flips to descending,
    /// anything else starts ascending on `field`.
    pub fn toggled(self, field: SortField) -> Self {
        let direction = if self.field == field && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        Self { field, direction }
    }

    pub fn compare(&self, a: &FileRecord, b: &FileRecord) -> Ordering {
        let ordering = self.field.compare(a, b);
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Stable sort of a copy; ties keep their input order.
    pub fn sorted(&self, files: &[FileRecord]) -> Vec<FileRecord> {
        let mut sorted = files.to_vec();
        sorted.sort_by(|a, b| self.compare(a, b));
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AccessLevel, FileId};
    use chrono::{TimeZone, Utc};

    fn file(name: &str, size: u64, file_type: &str, day: u32) -> FileRecord {
        FileRecord {
            id: FileId::new(name),
            name: name.to_string(),
            size,
            file_type: file_type.to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
            uploaded_by: "mike.chen@company.com".to_string(),
            version: 1,
            tags: vec![],
            shared: false,
            access_level: AccessLevel::View,
            download_count: 0,
        }
    }

    fn names(files: &[FileRecord]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let files = vec![
            file("beta", 1, "text/plain", 1),
            file("Alpha", 2, "text/plain", 2),
            file("gamma", 3, "text/plain", 3),
        ];
        let spec = SortSpec::new(SortField::Name, SortDirection::Asc);
        assert_eq!(names(&spec.sorted(&files)), vec!["Alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_size_directions_are_reverses() {
        let files = vec![
            file("a", 300, "text/plain", 1),
            file("b", 100, "text/plain", 2),
            file("c", 200, "text/plain", 3),
        ];
        let asc = SortSpec::new(SortField::Size, SortDirection::Asc).sorted(&files);
        let mut desc = SortSpec::new(SortField::Size, SortDirection::Desc).sorted(&files);
        assert_eq!(names(&asc), vec!["b", "c", "a"]);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_default_is_newest_first() {
        let files = vec![
            file("old", 1, "text/plain", 13),
            file("new", 1, "text/plain", 15),
            file("mid", 1, "text/plain", 14),
        ];
        assert_eq!(names(&SortSpec::default().sorted(&files)), vec!["new", "mid", "old"]);
    }

    #[test]
    fn test_ties_keep_input_order_both_ways() {
        let files = vec![
            file("x", 5, "Image/PNG", 1),
            file("y", 5, "image/png", 2),
        ];
        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let sorted = SortSpec::new(SortField::Type, direction).sorted(&files);
            assert_eq!(names(&sorted), vec!["x", "y"]);
        }
    }

    #[test]
    fn test_sorted_leaves_input_untouched() {
        let files = vec![file("b", 2, "a", 1), file("a", 1, "b", 2)];
        let before = files.clone();
        let _ = SortSpec::new(SortField::Name, SortDirection::Asc).sorted(&files);
        assert_eq!(files, before);
    }

    #[test]
    fn test_toggled() {
        let spec = SortSpec::default();
        let by_name = spec.toggled(SortField::Name);
        assert_eq!(by_name, SortSpec::new(SortField::Name, SortDirection::Asc));
        let flipped = by_name.toggled(SortField::Name);
        assert_eq!(flipped, SortSpec::new(SortField::Name, SortDirection::Desc));
        assert_eq!(flipped.toggled(SortField::Name).direction, SortDirection::Asc);
        // the default descending column restarts ascending
        assert_eq!(spec.toggled(SortField::Modified).direction, SortDirection::Asc);
    }

    #[test]
    fn test_field_parse() {
        assert_eq!("uploadedAt".parse::<SortField>(), Ok(SortField::Modified));
        assert_eq!("SIZE".parse::<SortField>(), Ok(SortField::Size));
        assert!("owner".parse::<SortField>().is_err());
    }
}
