use chrono::{NaiveDateTime, Utc};
use domain::{is_blank_html, organize, CommentId, CommentTree, CommentView, Slug, Threaded};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

use crate::error::InteractionFailed;
use crate::notify::Notification;
use crate::pending::{PendingWrite, WriteToken};
use crate::traits::{Notifier, RemoteApi, SessionGate};

/// A comment submitted locally that the server has not returned yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingComment {
    pub slug: Slug,
    pub body: String,
    pub parent_id: Option<CommentId>,
    pub submitted_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CachedComment {
    Confirmed(CommentView),
    Pending(PendingComment),
}

impl CachedComment {
    pub fn body(&self) -> &str {
        match self {
            CachedComment::Confirmed(view) => &view.comment.body,
            CachedComment::Pending(p) => &p.body,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, CachedComment::Pending(_))
    }
}

impl Threaded for CachedComment {
    fn thread_id(&self) -> Option<CommentId> {
        match self {
            CachedComment::Confirmed(view) => Some(view.comment.id),
            CachedComment::Pending(_) => None,
        }
    }

    fn parent_id(&self) -> Option<CommentId> {
        match self {
            CachedComment::Confirmed(view) => view.comment.parent_id,
            CachedComment::Pending(p) => p.parent_id,
        }
    }
}

#[derive(Debug, Default)]
struct CachedList {
    entries: Vec<CachedComment>,
    stale: bool,
}

/// Last fetched comment list per slug, plus optimistic inserts.
#[derive(Debug, Default)]
pub struct CommentCache {
    lists: Mutex<HashMap<Slug, CachedList>>,
}

impl CommentCache {
    fn lock(&self) -> MutexGuard<'_, HashMap<Slug, CachedList>> {
        self.lists.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, slug: &Slug) -> Vec<CachedComment> {
        self.lock()
            .get(slug)
            .map(|l| l.entries.clone())
            .unwrap_or_default()
    }

    pub fn replace(&self, slug: &Slug, comments: Vec<CommentView>) {
        self.lock().insert(
            slug.clone(),
            CachedList {
                entries: comments.into_iter().map(CachedComment::Confirmed).collect(),
                stale: false,
            },
        );
    }

    pub fn invalidate(&self, slug: &Slug) {
        if let Some(list) = self.lock().get_mut(slug) {
            list.stale = true;
        }
    }

    pub fn is_stale(&self, slug: &Slug) -> bool {
        self.lock().get(slug).map(|l| l.stale).unwrap_or(true)
    }

    /// Puts `pending` at the head of the slug's list in one locked step.
    pub fn begin_pending(&self, slug: Slug, pending: PendingComment) -> WriteToken<Slug> {
        let mut lists = self.lock();
        let list = lists.entry(slug.clone()).or_default();
        list.entries.insert(0, CachedComment::Pending(pending));
        WriteToken::new(slug)
    }
}

impl PendingWrite for CommentCache {
    type Key = Slug;
    type Value = Vec<CachedComment>;

    fn begin(&self, slug: Slug, optimistic: Vec<CachedComment>) -> WriteToken<Slug> {
        let mut lists = self.lock();
        let list = lists.entry(slug.clone()).or_default();
        list.entries = optimistic;
        WriteToken::new(slug)
    }

    fn commit(&self, _token: WriteToken<Slug>) {}

    fn rollback(&self, token: WriteToken<Slug>, previous: Vec<CachedComment>) {
        let mut lists = self.lock();
        lists.entry(token.into_key()).or_default().entries = previous;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Posted,
    SignInRequired,
    EmptyContent,
}

/// Comment list of the open page: loading, posting and deleting.
pub struct CommentThread {
    cache: CommentCache,
    deleting: Mutex<HashSet<CommentId>>,
    remote: Arc<dyn RemoteApi>,
    session: Arc<dyn SessionGate>,
    notifier: Arc<dyn Notifier>,
}

impl CommentThread {
    pub fn new(
        remote: Arc<dyn RemoteApi>,
        session: Arc<dyn SessionGate>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            cache: CommentCache::default(),
            deleting: Mutex::new(HashSet::new()),
            remote,
            session,
            notifier,
        }
    }

    pub fn cache(&self) -> &CommentCache {
        &self.cache
    }

    pub fn tree(&self, slug: &Slug) -> CommentTree<CachedComment> {
        organize(self.cache.get(slug))
    }

    pub async fn load(&self, slug: &Slug) -> Result<CommentTree<CachedComment>, InteractionFailed> {
        let comments = self.remote.comments_by_slug(slug).await?;
        info!("Loaded {} comment(s) for {}", comments.len(), slug);
        self.cache.replace(slug, comments);
        Ok(self.tree(slug))
    }

    pub async fn submit(
        &self,
        slug: &Slug,
        body: &str,
        parent_id: Option<CommentId>,
    ) -> Result<SubmitOutcome, InteractionFailed> {
        if !self.session.is_signed_in() {
            self.session.sign_in().await;
            return Ok(SubmitOutcome::SignInRequired);
        }
        if is_blank_html(body) {
            self.notifier.show(Notification::empty_comment());
            return Ok(SubmitOutcome::EmptyContent);
        }

        let pending = PendingComment {
            slug: slug.clone(),
            body: body.to_string(),
            parent_id,
            submitted_at: Utc::now().naive_utc(),
        };
        let token = self.cache.begin_pending(slug.clone(), pending);

        let result = self.remote.post_comment(body, slug, parent_id).await;

        // 无论成败都以服务端列表为准
        self.cache.commit(token);
        self.settle(slug).await;

        match result {
            Ok(()) => {
                self.notifier.show(Notification::comment_posted());
                Ok(SubmitOutcome::Posted)
            }
            Err(e) => {
                warn!("Posting comment to {} failed: {:?}", slug, e);
                self.notifier.show(Notification::submit_failed());
                Err(InteractionFailed::new(e))
            }
        }
    }

    pub fn is_deleting(&self, id: CommentId) -> bool {
        self.lock_deleting().contains(&id)
    }

    pub async fn delete(&self, slug: &Slug, id: CommentId) -> Result<(), InteractionFailed> {
        self.lock_deleting().insert(id);
        let result = self.remote.delete_comment(id).await;
        self.lock_deleting().remove(&id);
        self.settle(slug).await;

        match result {
            Ok(()) => {
                self.notifier.show(Notification::comment_deleted());
                Ok(())
            }
            Err(e) => {
                warn!("Deleting comment {} failed: {:?}", id, e);
                self.notifier.show(Notification::submit_failed());
                Err(InteractionFailed::new(e))
            }
        }
    }

    async fn settle(&self, slug: &Slug) {
        self.cache.invalidate(slug);
        if let Err(e) = self.load(slug).await {
            warn!("Refetching comments for {} failed, keeping cached list: {}", slug, e);
        }
    }

    fn lock_deleting(&self) -> MutexGuard<'_, HashSet<CommentId>> {
        self.deleting.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
