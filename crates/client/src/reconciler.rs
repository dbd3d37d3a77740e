use domain::{plan_toggle, CommentId, Interaction, RemoteMutation, Slug, ToggleEntry, TogglePlan};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, warn};

use crate::error::InteractionFailed;
use crate::notify::Notification;
use crate::pending::PendingWrite;
use crate::store::{LocalStore, ToggleStore};
use crate::traits::{Notifier, RemoteApi, SessionGate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Applied(ToggleEntry),
    /// A toggle on the same subject was still in flight; nothing changed.
    Busy,
}

/// Optimistic like/bookmark toggles with rollback on remote failure.
pub struct Interactions {
    toggles: ToggleStore,
    remote: Arc<dyn RemoteApi>,
    session: Arc<dyn SessionGate>,
    notifier: Arc<dyn Notifier>,
    in_flight: Mutex<HashSet<Interaction>>,
}

struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<Interaction>>,
    key: Interaction,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

impl Interactions {
    pub fn new(
        store: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteApi>,
        session: Arc<dyn SessionGate>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            toggles: ToggleStore::new(store),
            remote,
            session,
            notifier,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn state(&self, interaction: &Interaction) -> ToggleEntry {
        self.toggles.entry(interaction)
    }

    pub async fn toggle_comment_like(
        &self,
        id: CommentId,
    ) -> Result<ToggleOutcome, InteractionFailed> {
        self.toggle(Interaction::CommentLike(id)).await
    }

    pub async fn toggle_slug_like(
        &self,
        slug: &Slug,
    ) -> Result<ToggleOutcome, InteractionFailed> {
        self.toggle(Interaction::SlugLike(slug.clone())).await
    }

    pub async fn toggle_slug_bookmark(
        &self,
        slug: &Slug,
    ) -> Result<ToggleOutcome, InteractionFailed> {
        self.toggle(Interaction::SlugBookmark(slug.clone())).await
    }

    pub async fn toggle(
        &self,
        interaction: Interaction,
    ) -> Result<ToggleOutcome, InteractionFailed> {
        let Some(_guard) = self.try_begin(&interaction) else {
            debug!("{} {} already in flight", interaction.label(), interaction.subject_key());
            return Ok(ToggleOutcome::Busy);
        };

        // 本地先行：远端调用前状态已经写入
        let plan = plan_toggle(self.toggles.entry(&interaction));
        let token = self.toggles.begin(interaction.clone(), plan.next);

        match self.send(&interaction, &plan).await {
            Ok(()) => {
                self.toggles.commit(token);
                debug!(
                    "{} {} -> active={} count={:?}",
                    interaction.label(),
                    interaction.subject_key(),
                    plan.next.active,
                    plan.next.count
                );
                Ok(ToggleOutcome::Applied(plan.next))
            }
            Err(e) => {
                warn!(
                    "{} {} failed, rolling back: {:?}",
                    interaction.label(),
                    interaction.subject_key(),
                    e
                );
                self.toggles.rollback(token, plan.previous);
                self.notifier.show(Notification::submit_failed());
                if matches!(interaction, Interaction::CommentLike(_))
                    && !self.session.is_signed_in()
                {
                    self.session.sign_in().await;
                }
                Err(InteractionFailed::new(e))
            }
        }
    }

    fn try_begin(&self, interaction: &Interaction) -> Option<InFlightGuard<'_>> {
        let mut set = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(interaction.clone()) {
            return None;
        }
        Some(InFlightGuard {
            set: &self.in_flight,
            key: interaction.clone(),
        })
    }

    async fn send(&self, interaction: &Interaction, plan: &TogglePlan) -> anyhow::Result<()> {
        match (interaction, plan.mutation) {
            (Interaction::CommentLike(id), RemoteMutation::Remove) => {
                self.remote.delete_like(*id).await?
            }
            (Interaction::CommentLike(id), RemoteMutation::Set { active }) => {
                self.remote.like_comment(*id, active).await?
            }
            (Interaction::SlugLike(slug), RemoteMutation::Remove) => {
                self.remote.delete_like_slug(slug).await?
            }
            (Interaction::SlugLike(slug), RemoteMutation::Set { active }) => {
                self.remote.like_slug(slug, active).await?
            }
            (Interaction::SlugBookmark(slug), RemoteMutation::Remove) => {
                self.remote.delete_bookmark_slug(slug).await?
            }
            (Interaction::SlugBookmark(slug), RemoteMutation::Set { active }) => {
                self.remote.bookmark_slug(slug, active).await?
            }
        }
        // comment-like also syncs the denormalized counter on the comment row
        if let Interaction::CommentLike(id) = interaction {
            self.remote.count_likes(*id, plan.raw_count()).await?;
        }
        Ok(())
    }
}
