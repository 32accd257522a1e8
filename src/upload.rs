//! Simulated upload pipeline.
//!
//! Nothing is transferred: a task is validated when queued, then advanced by
//! fixed progress steps each time the caller's timer fires. The queue itself
//! holds no timers; the dashboard drives [`UploadQueue::tick`] and removes
//! finished tasks after [`UploadLimits::cleanup_delay_ms`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::UploadLimits;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("File size must be less than {max_mb}MB")]
    TooLarge { size: u64, max_mb: u64 },
    #[error("File type not supported")]
    UnsupportedType(String),
}

/// The file picked by the user, as far as the dashboard cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSource {
    pub name: String,
    pub size: u64,
    pub file_type: String,
}

impl UploadSource {
    pub fn new(name: impl Into<String>, size: u64, file_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            file_type: file_type.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Pending,
    Uploading,
    Completed,
    Error,
}

impl UploadStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadStatus::Completed | UploadStatus::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTask {
    pub id: Uuid,
    pub source: UploadSource,
    /// 0..=100
    pub progress: u8,
    pub status: UploadStatus,
    pub error: Option<String>,
    pub tags: Vec<String>,
}

/// Result of one timer tick on a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The task is gone, not started yet, or already finished.
    Ignored,
    Advanced(u8),
    Completed(UploadTask),
}

pub fn validate(source: &UploadSource, limits: &UploadLimits) -> Result<(), UploadRejection> {
    if source.size > limits.max_file_size {
        return Err(UploadRejection::TooLarge {
            size: source.size,
            max_mb: limits.max_file_size_mb(),
        });
    }
    if !limits.is_type_allowed(&source.file_type) {
        return Err(UploadRejection::UnsupportedType(source.file_type.clone()));
    }
    Ok(())
}

/// Splits the free-text tag field on commas, dropping blanks.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadQueue {
    limits: UploadLimits,
    tasks: Vec<UploadTask>,
}

impl UploadQueue {
    pub fn new(limits: UploadLimits) -> Self {
        Self {
            limits,
            tasks: Vec::new(),
        }
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    pub fn set_limits(&mut self, limits: UploadLimits) {
        self.limits = limits;
    }

    pub fn tasks(&self) -> &[UploadTask] {
        &self.tasks
    }

    pub fn get(&self, id: Uuid) -> Option<&UploadTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == UploadStatus::Pending)
            .count()
    }

    /// Queues each source. Rejected sources are queued too, already in the
    /// terminal `Error` state.
    pub fn enqueue<I>(&mut self, sources: I, tags: &str) -> Vec<Uuid>
    where
        I: IntoIterator<Item = UploadSource>,
    {
        let tags = parse_tags(tags);
        let mut ids = Vec::new();

        for source in sources {
            let (status, error) = match validate(&source, &self.limits) {
                Ok(()) => (UploadStatus::Pending, None),
                Err(rejection) => {
                    log::warn!("rejected upload of {}: {}", source.name, rejection);
                    (UploadStatus::Error, Some(rejection.to_string()))
                }
            };
            let task = UploadTask {
                id: Uuid::new_v4(),
                source,
                progress: 0,
                status,
                error,
                tags: tags.clone(),
            };
            ids.push(task.id);
            self.tasks.push(task);
        }

        ids
    }

    /// Moves every pending task to `Uploading`. When `tags` is given it
    /// replaces the tags captured at enqueue time.
    pub fn start_pending(&mut self, tags: Option<&str>) -> Vec<Uuid> {
        let tags = tags.map(parse_tags);
        let mut started = Vec::new();

        for task in self
            .tasks
            .iter_mut()
            .filter(|t| t.status == UploadStatus::Pending)
        {
            task.status = UploadStatus::Uploading;
            task.progress = 0;
            if let Some(tags) = &tags {
                task.tags = tags.clone();
            }
            log::debug!("upload {} started", task.id);
            started.push(task.id);
        }

        started
    }

    pub fn tick(&mut self, id: Uuid) -> TickOutcome {
        let step = self.limits.progress_step.max(1);
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return TickOutcome::Ignored;
        };
        if task.status != UploadStatus::Uploading {
            return TickOutcome::Ignored;
        }

        task.progress = task.progress.saturating_add(step).min(100);
        if task.progress < 100 {
            return TickOutcome::Advanced(task.progress);
        }

        task.status = UploadStatus::Completed;
        log::debug!("upload {} completed", task.id);
        TickOutcome::Completed(task.clone())
    }

    pub fn remove(&mut self, id: Uuid) -> Option<UploadTask> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(pos))
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    fn queue() -> UploadQueue {
        UploadQueue::new(UploadLimits::default())
    }

    #[test]
    fn test_validate_size_checked_first() {
        let limits = UploadLimits::default();
        let huge = UploadSource::new("movie.mkv", 101 * MB, "video/x-matroska");
        assert_eq!(
            validate(&huge, &limits),
            Err(UploadRejection::TooLarge {
                size: 101 * MB,
                max_mb: 100
            })
        );
        assert_eq!(
            validate(&huge, &limits).unwrap_err().to_string(),
            "File size must be less than 100MB"
        );

        let clip = UploadSource::new("clip.mp4", MB, "video/mp4");
        assert_eq!(
            validate(&clip, &limits).unwrap_err().to_string(),
            "File type not supported"
        );
    }

    #[test]
    fn test_validate_boundary() {
        let limits = UploadLimits::default();
        let exact = UploadSource::new("a.pdf", 100 * MB, "application/pdf");
        assert!(validate(&exact, &limits).is_ok());
        let webp = UploadSource::new("a.webp", 1, "image/webp");
        assert!(validate(&webp, &limits).is_ok());
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(" design, ui ,,  "), vec!["design", "ui"]);
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_rejected_task_is_terminal() {
        let mut q = queue();
        let ids = q.enqueue([UploadSource::new("big.zip", 200 * MB, "application/zip")], "");
        let id = ids[0];
        assert_eq!(q.get(id).unwrap().status, UploadStatus::Error);
        assert!(q.get(id).unwrap().error.is_some());

        assert!(q.start_pending(None).is_empty());
        assert_eq!(q.tick(id), TickOutcome::Ignored);
        assert_eq!(q.get(id).unwrap().status, UploadStatus::Error);
    }

    #[test]
    fn test_ticks_until_completed() {
        let mut q = queue();
        let id = q.enqueue([UploadSource::new("a.txt", 10, "text/plain")], "x")[0];
        assert_eq!(q.tick(id), TickOutcome::Ignored, "pending tasks do not advance");

        assert_eq!(q.start_pending(None), vec![id]);
        for expected in (10..100).step_by(10) {
            assert_eq!(q.tick(id), TickOutcome::Advanced(expected as u8));
        }
        match q.tick(id) {
            TickOutcome::Completed(task) => {
                assert_eq!(task.progress, 100);
                assert_eq!(task.status, UploadStatus::Completed);
                assert_eq!(task.tags, vec!["x"]);
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(q.tick(id), TickOutcome::Ignored);
    }

    #[test]
    fn test_start_pending_retags() {
        let mut q = queue();
        let id = q.enqueue([UploadSource::new("a.txt", 10, "text/plain")], "old")[0];
        q.start_pending(Some("new, other"));
        assert_eq!(q.get(id).unwrap().tags, vec!["new", "other"]);
        assert_eq!(q.pending_count(), 0);
    }

    #[test]
    fn test_removed_task_ignores_ticks() {
        let mut q = queue();
        let id = q.enqueue([UploadSource::new("a.txt", 10, "text/plain")], "")[0];
        q.start_pending(None);
        assert!(q.remove(id).is_some());
        assert_eq!(q.tick(id), TickOutcome::Ignored);
        assert!(q.remove(id).is_none());
    }
}
