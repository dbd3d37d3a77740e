use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use domain::{Author, Comment, CommentId, CommentView, Slug, UserId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::notify::Notification;
use crate::traits::{Notifier, RemoteApi, SessionGate};

/// In-process backend that records calls and fails the operations it is told to.
#[derive(Default)]
pub struct FakeRemote {
    pub calls: Mutex<Vec<String>>,
    failing: Mutex<HashSet<&'static str>>,
    comments: Mutex<Vec<CommentView>>,
    next_id: AtomicUsize,
    holds: Mutex<HashMap<&'static str, Arc<Notify>>>,
}

impl FakeRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail(&self, op: &'static str) {
        self.failing.lock().unwrap().insert(op);
    }

    /// Makes `op` wait, after it has been recorded, until the returned handle is notified.
    pub fn hold(&self, op: &'static str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.holds.lock().unwrap().insert(op, gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn seed_comment(&self, slug: &Slug, parent_id: Option<CommentId>, body: &str) -> CommentId {
        let id = CommentId::new(self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1);
        let author = UserId::new("alice");
        self.comments.lock().unwrap().push(CommentView {
            comment: Comment {
                id,
                parent_id,
                slug: slug.clone(),
                author_id: author.clone(),
                body: body.to_string(),
                created_at: Utc::now().naive_utc(),
                like_count: None,
            },
            author: Author {
                id: author,
                name: Some("Alice".to_string()),
                image: None,
            },
        });
        id
    }

    pub fn called(&self, op: &str) -> usize {
        self.calls().iter().filter(|c| c.split(' ').next() == Some(op)).count()
    }

    async fn record(&self, op: &'static str, detail: String) -> Result<()> {
        self.calls.lock().unwrap().push(format!("{} {}", op, detail));
        if self.failing.lock().unwrap().contains(op) {
            return Err(anyhow!("{} rejected", op));
        }
        let gate = self.holds.lock().unwrap().get(op).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteApi for FakeRemote {
    async fn post_comment(
        &self,
        comment: &str,
        slug: &Slug,
        parent_id: Option<CommentId>,
    ) -> Result<()> {
        self.record("post_comment", format!("{} {:?}", slug, parent_id)).await?;
        self.seed_comment(slug, parent_id, comment);
        Ok(())
    }

    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        self.record("delete_comment", id.to_string()).await?;
        self.comments.lock().unwrap().retain(|c| c.comment.id != id);
        Ok(())
    }

    async fn comments_by_slug(&self, slug: &Slug) -> Result<Vec<CommentView>> {
        self.record("comments_by_slug", slug.to_string()).await?;
        Ok(self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| &c.comment.slug == slug)
            .cloned()
            .collect())
    }

    async fn like_comment(&self, comment_id: CommentId, like: bool) -> Result<()> {
        self.record("like_comment", format!("{} {}", comment_id, like)).await
    }

    async fn delete_like(&self, comment_id: CommentId) -> Result<()> {
        self.record("delete_like", comment_id.to_string()).await
    }

    async fn count_likes(&self, id: CommentId, like_count: i64) -> Result<()> {
        self.record("count_likes", format!("{} {}", id, like_count)).await
    }

    async fn like_slug(&self, slug: &Slug, like: bool) -> Result<()> {
        self.record("like_slug", format!("{} {}", slug, like)).await
    }

    async fn delete_like_slug(&self, slug: &Slug) -> Result<()> {
        self.record("delete_like_slug", slug.to_string()).await
    }

    async fn bookmark_slug(&self, slug: &Slug, bookmark: bool) -> Result<()> {
        self.record("bookmark_slug", format!("{} {}", slug, bookmark)).await
    }

    async fn delete_bookmark_slug(&self, slug: &Slug) -> Result<()> {
        self.record("delete_bookmark_slug", slug.to_string()).await
    }
}

#[derive(Default)]
pub struct FakeSession {
    signed_in: AtomicBool,
    pub sign_in_calls: AtomicUsize,
}

impl FakeSession {
    pub fn signed_in() -> Arc<Self> {
        let s = Self::default();
        s.signed_in.store(true, Ordering::SeqCst);
        Arc::new(s)
    }

    pub fn anonymous() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sign_in_count(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionGate for FakeSession {
    fn is_signed_in(&self) -> bool {
        self.signed_in.load(Ordering::SeqCst)
    }

    async fn sign_in(&self) {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn shown(&self) -> Vec<Notification> {
        self.shown.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show(&self, notification: Notification) {
        self.shown.lock().unwrap().push(notification);
    }
}

/// Yields to the other branches of a `join!` until `cond` holds.
pub async fn wait_until(cond: impl Fn() -> bool) {
    while !cond() {
        tokio::task::yield_now().await;
    }
}
