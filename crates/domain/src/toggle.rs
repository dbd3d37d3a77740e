use serde::{Deserialize, Serialize};

use crate::models::{CommentId, Slug};

/// One of the three toggle interactions, with the subject it is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Interaction {
    CommentLike(CommentId),
    SlugLike(Slug),
    SlugBookmark(Slug),
}

/// Local storage namespaces backing one interaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespaces {
    pub flags: &'static str,
    pub counts: &'static str,
}

impl Interaction {
    pub fn subject_key(&self) -> String {
        match self {
            Interaction::CommentLike(id) => id.to_string(),
            Interaction::SlugLike(slug) | Interaction::SlugBookmark(slug) => {
                slug.as_str().to_string()
            }
        }
    }

    pub fn namespaces(&self) -> Namespaces {
        match self {
            Interaction::CommentLike(_) => Namespaces {
                flags: "liked-comments",
                counts: "comment-like-counts",
            },
            Interaction::SlugLike(_) => Namespaces {
                flags: "liked-slugs",
                counts: "like-counts",
            },
            Interaction::SlugBookmark(_) => Namespaces {
                flags: "bookmarked-slugs",
                counts: "bookmarked-counts",
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interaction::CommentLike(_) => "comment-like",
            Interaction::SlugLike(_) => "slug-like",
            Interaction::SlugBookmark(_) => "slug-bookmark",
        }
    }
}

/// Flag plus displayed counter for one subject. `count: None` means zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleEntry {
    pub active: bool,
    pub count: Option<i64>,
}

impl ToggleEntry {
    pub fn new(active: bool, count: i64) -> Self {
        Self {
            active,
            count: normalize_count(count),
        }
    }

    pub fn count_value(&self) -> i64 {
        self.count.unwrap_or(0)
    }

    /// Same entry with a zero counter stored as `None`.
    pub fn normalized(self) -> Self {
        Self::new(self.active, self.count_value())
    }
}

pub fn normalize_count(count: i64) -> Option<i64> {
    if count == 0 {
        None
    } else {
        Some(count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteMutation {
    Set { active: bool },
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TogglePlan {
    pub previous: ToggleEntry,
    pub next: ToggleEntry,
    pub mutation: RemoteMutation,
}

impl TogglePlan {
    /// The new counter as synced to the server: zero instead of `None`, and
    /// never below zero even when the local flag and counter diverged.
    pub fn raw_count(&self) -> i64 {
        self.next.count_value().max(0)
    }
}

pub fn plan_toggle(current: ToggleEntry) -> TogglePlan {
    let active = !current.active;
    let delta = if active { 1 } else { -1 };
    let next = ToggleEntry::new(active, current.count_value() + delta);
    let mutation = if current.active {
        RemoteMutation::Remove
    } else {
        RemoteMutation::Set { active }
    };
    TogglePlan {
        previous: current,
        next,
        mutation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_on_from_nothing() {
        let plan = plan_toggle(ToggleEntry::default());
        assert_eq!(plan.next, ToggleEntry { active: true, count: Some(1) });
        assert_eq!(plan.mutation, RemoteMutation::Set { active: true });
        assert_eq!(plan.raw_count(), 1);
    }

    #[test]
    fn toggle_off_back_to_null() {
        let on = plan_toggle(ToggleEntry::default()).next;
        let plan = plan_toggle(on);
        assert_eq!(plan.next, ToggleEntry { active: false, count: None });
        assert_eq!(plan.mutation, RemoteMutation::Remove);
        assert_eq!(plan.raw_count(), 0);
    }

    #[test]
    fn twice_restores_original() {
        let start = ToggleEntry { active: false, count: Some(4) };
        let once = plan_toggle(start).next;
        assert_eq!(once, ToggleEntry { active: true, count: Some(5) });
        assert_eq!(plan_toggle(once).next, start);
    }

    #[test]
    fn counter_is_never_literal_zero() {
        let entry = ToggleEntry { active: true, count: Some(1) };
        assert_eq!(plan_toggle(entry).next.count, None);
        assert_eq!(ToggleEntry { active: false, count: Some(0) }.normalized().count, None);
    }

    #[test]
    fn diverged_state_can_go_negative() {
        // flag set but no counter recorded locally
        let entry = ToggleEntry { active: true, count: None };
        assert_eq!(plan_toggle(entry).next.count, Some(-1));
    }

    #[test]
    fn synced_count_is_clamped_at_zero() {
        let plan = plan_toggle(ToggleEntry { active: true, count: None });
        assert_eq!(plan.mutation, RemoteMutation::Remove);
        assert_eq!(plan.raw_count(), 0);
    }

    #[test]
    fn namespaces_are_distinct_per_kind() {
        let slug = Slug::new("intro").unwrap();
        let kinds = [
            Interaction::CommentLike(CommentId::new(1)),
            Interaction::SlugLike(slug.clone()),
            Interaction::SlugBookmark(slug),
        ];
        for a in &kinds {
            for b in &kinds {
                if a != b {
                    assert_ne!(a.namespaces().counts, b.namespaces().counts);
                    assert_ne!(a.namespaces().flags, b.namespaces().flags);
                }
            }
        }
        assert_eq!(kinds[0].subject_key(), "1");
        assert_eq!(kinds[1].subject_key(), "intro");
    }
}
