//! Owned dashboard state and the views derived from it.
//!
//! The displayed list is always `sort(filter(files, criteria), sort_spec)`,
//! recomputed on demand; nothing is cached.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::DashboardConfig;
use crate::filter::{FilterCriteria, FilterPatch, TypeCategory};
use crate::settings::Settings;
use crate::sort::{SortField, SortSpec};
use crate::storage::StorageSummary;
use crate::upload::{TickOutcome, UploadQueue, UploadSource, UploadTask};
use crate::users::{AuthError, UserDirectory};
use crate::{AccessLevel, FileId, FileRecord, User};

/// "N of M files"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCounts {
    pub shown: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    config: DashboardConfig,
    files: Vec<FileRecord>,
    criteria: FilterCriteria,
    sort: SortSpec,
    uploads: UploadQueue,
    directory: UserDirectory,
    current_user: Option<User>,
    settings: Settings,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

impl SessionState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            uploads: UploadQueue::new(config.uploads.clone()),
            config,
            files: Vec::new(),
            criteria: FilterCriteria::default(),
            sort: SortSpec::default(),
            directory: UserDirectory::default(),
            current_user: None,
            settings: Settings::default(),
        }
    }

    /// Seeded with the sample files and demo accounts.
    pub fn demo(config: DashboardConfig) -> Self {
        let mut state = Self::new(config);
        state.files = demo_files();
        state.directory = UserDirectory::demo();
        state
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn apply_config(&mut self, config: DashboardConfig) {
        self.uploads.set_limits(config.uploads.clone());
        self.config = config;
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn file(&self, id: &FileId) -> Option<&FileRecord> {
        self.files.iter().find(|f| &f.id == id)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    pub fn uploads(&self) -> &UploadQueue {
        &self.uploads
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        let user = self.directory.authenticate(email, password)?;
        Ok(&*self.current_user.insert(user))
    }

    pub fn sign_out(&mut self) -> Option<User> {
        self.current_user.take()
    }

    // -- filtering and sorting --

    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.criteria.merge(patch);
    }

    pub fn toggle_tag_filter(&mut self, tag: &str) {
        self.criteria.toggle_tag(tag);
    }

    pub fn toggle_category_filter(&mut self, category: TypeCategory) {
        self.criteria.toggle_category(category);
    }

    pub fn clear_filters(&mut self) {
        self.criteria.clear();
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }

    /// Column header click.
    pub fn toggle_sort(&mut self, field: SortField) -> SortSpec {
        self.sort = self.sort.toggled(field);
        self.sort
    }

    pub fn filtered_files(&self) -> Vec<FileRecord> {
        self.criteria.apply(&self.files)
    }

    pub fn visible_files(&self) -> Vec<FileRecord> {
        self.sort.sorted(&self.filtered_files())
    }

    /// Shared files uploaded by someone other than the signed-in user.
    /// Without a signed-in user every shared file qualifies.
    pub fn shared_with_me(&self) -> Vec<FileRecord> {
        let me = self.current_user.as_ref().map(|u| u.email.as_str());
        self.files
            .iter()
            .filter(|f| f.shared && Some(f.uploaded_by.as_str()) != me)
            .cloned()
            .collect()
    }

    pub fn counts(&self) -> FileCounts {
        FileCounts {
            shown: self.files.iter().filter(|f| self.criteria.matches(f)).count(),
            total: self.files.len(),
        }
    }

    /// Distinct tags across the collection, in first-seen order.
    pub fn known_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.files.iter().flat_map(|f| f.tags.iter()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    pub fn storage_summary(&self) -> StorageSummary {
        StorageSummary::from_files(&self.files, self.config.storage_quota)
    }

    // -- file mutations --

    pub fn add_file(&mut self, file: FileRecord) {
        self.files.insert(0, file);
    }

    pub fn remove_file(&mut self, id: &FileId) -> Option<FileRecord> {
        let pos = self.files.iter().position(|f| &f.id == id)?;
        let removed = self.files.remove(pos);
        log::debug!("removed file {} ({})", removed.id, removed.name);
        Some(removed)
    }

    /// Returns the new shared flag.
    pub fn toggle_share(&mut self, id: &FileId) -> Option<bool> {
        let file = self.files.iter_mut().find(|f| &f.id == id)?;
        file.shared = !file.shared;
        Some(file.shared)
    }

    /// Counts a download. No bytes move.
    pub fn record_download(&mut self, id: &FileId) -> Option<u32> {
        let file = self.files.iter_mut().find(|f| &f.id == id)?;
        file.download_count = file.download_count.saturating_add(1);
        Some(file.download_count)
    }

    // -- uploads --

    pub fn enqueue_uploads<I>(&mut self, sources: I, tags: &str) -> Vec<Uuid>
    where
        I: IntoIterator<Item = UploadSource>,
    {
        self.uploads.enqueue(sources, tags)
    }

    pub fn start_uploads(&mut self, tags: Option<&str>) -> Vec<Uuid> {
        self.uploads.start_pending(tags)
    }

    /// Advances one upload. On completion the new file is put at the front
    /// of the collection.
    pub fn tick_upload(&mut self, id: Uuid) -> TickOutcome {
        let outcome = self.uploads.tick(id);
        if let TickOutcome::Completed(task) = &outcome {
            let uploader = self
                .current_user
                .as_ref()
                .map(|u| u.email.clone())
                .unwrap_or_default();
            let file = file_from_upload(task, uploader, Utc::now());
            log::info!("upload of {} finished as file {}", file.name, file.id);
            self.add_file(file);
        }
        outcome
    }

    pub fn remove_upload(&mut self, id: Uuid) -> Option<UploadTask> {
        self.uploads.remove(id)
    }
}

fn file_from_upload(task: &UploadTask, uploaded_by: String, now: DateTime<Utc>) -> FileRecord {
    FileRecord {
        id: FileId::generate(),
        name: task.source.name.clone(),
        size: task.source.size,
        file_type: task.source.file_type.clone(),
        uploaded_at: now,
        uploaded_by,
        version: 1,
        tags: task.tags.clone(),
        shared: false,
        access_level: AccessLevel::Edit,
        download_count: 0,
    }
}

pub fn demo_files() -> Vec<FileRecord> {
    let day = |d: u32| {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0)
            .single()
            .unwrap_or_default()
    };
    let tags = |t: &[&str]| -> Vec<String> { t.iter().map(|s| s.to_string()).collect() };

    vec![
        FileRecord {
            id: FileId::new("1"),
            name: "Project_Proposal.pdf".to_string(),
            size: 2_450_000,
            file_type: "application/pdf".to_string(),
            uploaded_at: day(15),
            uploaded_by: "john.doe@company.com".to_string(),
            version: 3,
            tags: tags(&["proposal", "client", "urgent"]),
            shared: true,
            access_level: AccessLevel::Edit,
            download_count: 12,
        },
        FileRecord {
            id: FileId::new("2"),
            name: "Design_Mockups.fig".to_string(),
            size: 15_670_000,
            file_type: "application/figma".to_string(),
            uploaded_at: day(14),
            uploaded_by: "sarah.wilson@company.com".to_string(),
            version: 1,
            tags: tags(&["design", "mockup", "ui"]),
            shared: false,
            access_level: AccessLevel::View,
            download_count: 5,
        },
        FileRecord {
            id: FileId::new("3"),
            name: "Database_Schema.sql".to_string(),
            size: 890_000,
            file_type: "application/sql".to_string(),
            uploaded_at: day(13),
            uploaded_by: "mike.chen@company.com".to_string(),
            version: 2,
            tags: tags(&["database", "schema", "backend"]),
            shared: true,
            access_level: AccessLevel::Admin,
            download_count: 8,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortDirection;
    use crate::upload::UploadStatus;
    use crate::users::DEMO_PASSWORD;

    fn demo() -> SessionState {
        SessionState::demo(DashboardConfig::default())
    }

    fn names(files: &[FileRecord]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_default_view_newest_first() {
        let state = demo();
        assert_eq!(
            names(&state.visible_files()),
            vec!["Project_Proposal.pdf", "Design_Mockups.fig", "Database_Schema.sql"]
        );
        assert_eq!(state.counts(), FileCounts { shown: 3, total: 3 });
    }

    #[test]
    fn test_visible_is_sorted_filter() {
        let mut state = demo();
        state.set_filters(FilterPatch::search("s"));
        state.set_sort(SortSpec::new(SortField::Size, SortDirection::Asc));

        let expected = state.sort_spec().sorted(&state.criteria().apply(state.files()));
        assert_eq!(state.visible_files(), expected);
    }

    #[test]
    fn test_filters_and_counts() {
        let mut state = demo();
        state.toggle_category_filter(TypeCategory::Figma);
        assert_eq!(names(&state.visible_files()), vec!["Design_Mockups.fig"]);
        assert_eq!(state.counts(), FileCounts { shown: 1, total: 3 });

        state.clear_filters();
        state.toggle_tag_filter("backend");
        state.toggle_tag_filter("urgent");
        assert_eq!(state.counts().shown, 2);
    }

    #[test]
    fn test_shared_with_me_excludes_own_files() {
        let mut state = demo();
        state.sign_in("john.doe@company.com", DEMO_PASSWORD).unwrap();
        assert_eq!(names(&state.shared_with_me()), vec!["Database_Schema.sql"]);

        state.sign_out();
        assert_eq!(state.shared_with_me().len(), 2);
    }

    #[test]
    fn test_toggle_share_twice_restores() {
        let mut state = demo();
        let id = FileId::new("2");
        assert_eq!(state.toggle_share(&id), Some(true));
        assert_eq!(state.toggle_share(&id), Some(false));
        assert_eq!(state.toggle_share(&FileId::new("nope")), None);
    }

    #[test]
    fn test_record_download() {
        let mut state = demo();
        assert_eq!(state.record_download(&FileId::new("1")), Some(13));
        assert_eq!(state.file(&FileId::new("1")).unwrap().download_count, 13);
    }

    #[test]
    fn test_remove_file() {
        let mut state = demo();
        let removed = state.remove_file(&FileId::new("3")).unwrap();
        assert_eq!(removed.name, "Database_Schema.sql");
        assert_eq!(state.files().len(), 2);
        assert!(state.remove_file(&FileId::new("3")).is_none());
    }

    #[test]
    fn test_upload_completion_adds_file_at_front() {
        let mut state = demo();
        state
            .sign_in("sarah.wilson@company.com", DEMO_PASSWORD)
            .unwrap();
        let id = state.enqueue_uploads([UploadSource::new("notes.txt", 42, "text/plain")], "")[0];
        state.start_uploads(Some("meeting, q1"));

        let mut outcome = TickOutcome::Ignored;
        for _ in 0..10 {
            outcome = state.tick_upload(id);
        }
        assert!(matches!(outcome, TickOutcome::Completed(_)));
        assert_eq!(state.uploads().get(id).unwrap().status, UploadStatus::Completed);

        let added = &state.files()[0];
        assert_eq!(added.name, "notes.txt");
        assert_eq!(added.version, 1);
        assert_eq!(added.download_count, 0);
        assert_eq!(added.access_level, AccessLevel::Edit);
        assert!(!added.shared);
        assert_eq!(added.uploaded_by, "sarah.wilson@company.com");
        assert_eq!(added.tags, vec!["meeting", "q1"]);
        assert_eq!(state.files().len(), 4);

        assert!(state.remove_upload(id).is_some());
        assert!(state.uploads().tasks().is_empty());
    }

    #[test]
    fn test_oversized_upload_never_adds_file() {
        let mut state = demo();
        let id = state.enqueue_uploads(
            [UploadSource::new("huge.pdf", 101 * 1024 * 1024, "application/pdf")],
            "",
        )[0];
        state.start_uploads(None);
        for _ in 0..20 {
            assert_eq!(state.tick_upload(id), TickOutcome::Ignored);
        }
        assert_eq!(state.uploads().get(id).unwrap().status, UploadStatus::Error);
        assert_eq!(state.files().len(), 3);
    }

    #[test]
    fn test_known_tags_and_storage() {
        let state = demo();
        let tags = state.known_tags();
        assert_eq!(tags.len(), 9);
        assert_eq!(tags[0], "proposal");

        let summary = state.storage_summary();
        assert_eq!(summary.used_bytes, 2_450_000 + 15_670_000 + 890_000);
        assert_eq!(summary.total_files, 3);
    }

    #[test]
    fn test_sign_in_failure_keeps_user() {
        let mut state = demo();
        assert!(state.sign_in("john.doe@company.com", "wrong").is_err());
        assert!(state.current_user().is_none());
    }
}
