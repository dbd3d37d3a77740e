//! Groups a flat comment list into reply buckets keyed by parent.
//!
//! The traversal trusts that parent chains are acyclic. Storage only accepts a
//! parent that already exists, which makes a cycle impossible to write.

use std::collections::HashMap;

use crate::models::{Comment, CommentId, CommentView};

/// Anything that can sit in a reply thread.
///
/// `thread_id` is `None` for entries that have not been assigned an id yet
/// (optimistic inserts); such entries can never have replies.
pub trait Threaded {
    fn thread_id(&self) -> Option<CommentId>;
    fn parent_id(&self) -> Option<CommentId>;
}

impl Threaded for Comment {
    fn thread_id(&self) -> Option<CommentId> {
        Some(self.id)
    }

    fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }
}

impl Threaded for CommentView {
    fn thread_id(&self) -> Option<CommentId> {
        Some(self.comment.id)
    }

    fn parent_id(&self) -> Option<CommentId> {
        self.comment.parent_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentKey {
    TopLevel,
    Reply(CommentId),
}

impl ParentKey {
    pub fn of(parent_id: Option<CommentId>) -> Self {
        match parent_id {
            Some(id) => ParentKey::Reply(id),
            None => ParentKey::TopLevel,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommentTree<T> {
    buckets: HashMap<ParentKey, Vec<T>>,
}

/// Stable partition of `records` by parent key, in one pass.
pub fn organize<T: Threaded>(records: impl IntoIterator<Item = T>) -> CommentTree<T> {
    let mut buckets: HashMap<ParentKey, Vec<T>> = HashMap::new();
    for record in records {
        buckets
            .entry(ParentKey::of(record.parent_id()))
            .or_default()
            .push(record);
    }
    CommentTree { buckets }
}

#[derive(Debug)]
pub struct ThreadNode<'a, T> {
    pub item: &'a T,
    pub depth: usize,
    pub reply_count: usize,
}

impl<T: Threaded> CommentTree<T> {
    pub fn children(&self, key: ParentKey) -> &[T] {
        self.buckets.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn top_level(&self) -> &[T] {
        self.children(ParentKey::TopLevel)
    }

    pub fn reply_count(&self, id: CommentId) -> usize {
        self.children(ParentKey::Reply(id)).len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Depth-first from the top-level bucket, parent before its replies.
    /// Entries under a parent that is not reachable are never visited.
    pub fn walk<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(ThreadNode<'a, T>),
    {
        self.walk_bucket(self.top_level(), 0, &mut visit);
    }

    fn walk_bucket<'a, F>(&'a self, bucket: &'a [T], depth: usize, visit: &mut F)
    where
        F: FnMut(ThreadNode<'a, T>),
    {
        for item in bucket {
            let replies = match item.thread_id() {
                Some(id) => self.children(ParentKey::Reply(id)),
                None => &[],
            };
            visit(ThreadNode {
                item,
                depth,
                reply_count: replies.len(),
            });
            self.walk_bucket(replies, depth + 1, visit);
        }
    }

    pub fn flatten(&self) -> Vec<ThreadNode<'_, T>> {
        let mut nodes = Vec::new();
        self.walk(|node| nodes.push(node));
        nodes
    }
}

pub fn reply_count_text(count: usize) -> String {
    match count {
        0 => "No replies".to_string(),
        1 => "1 reply".to_string(),
        n => format!("{} replies", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Rec {
        id: i64,
        parent: Option<i64>,
    }

    impl Threaded for Rec {
        fn thread_id(&self) -> Option<CommentId> {
            Some(CommentId::new(self.id))
        }

        fn parent_id(&self) -> Option<CommentId> {
            self.parent.map(CommentId::new)
        }
    }

    fn rec(id: i64, parent: Option<i64>) -> Rec {
        Rec { id, parent }
    }

    fn visited_ids(tree: &CommentTree<Rec>) -> Vec<(i64, usize, usize)> {
        tree.flatten()
            .into_iter()
            .map(|n| (n.item.id, n.depth, n.reply_count))
            .collect()
    }

    #[test]
    fn empty_input_yields_no_nodes() {
        let tree = organize(Vec::<Rec>::new());
        assert!(tree.is_empty());
        assert!(tree.top_level().is_empty());
        assert!(tree.flatten().is_empty());
    }

    #[test]
    fn first_comment_then_reply() {
        let tree = organize(vec![rec(1, None)]);
        assert_eq!(visited_ids(&tree), vec![(1, 0, 0)]);

        let tree = organize(vec![rec(1, None), rec(2, Some(1))]);
        assert_eq!(tree.reply_count(CommentId::new(1)), 1);
        assert_eq!(visited_ids(&tree), vec![(1, 0, 1), (2, 1, 0)]);
    }

    #[test]
    fn buckets_keep_input_order() {
        let tree = organize(vec![
            rec(5, None),
            rec(3, Some(5)),
            rec(1, None),
            rec(4, Some(5)),
            rec(2, Some(5)),
        ]);
        let replies: Vec<i64> = tree
            .children(ParentKey::Reply(CommentId::new(5)))
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(replies, vec![3, 4, 2]);
        let roots: Vec<i64> = tree.top_level().iter().map(|r| r.id).collect();
        assert_eq!(roots, vec![5, 1]);
    }

    #[test]
    fn traversal_is_depth_first() {
        let tree = organize(vec![
            rec(1, None),
            rec(2, None),
            rec(3, Some(1)),
            rec(4, Some(3)),
            rec(5, Some(1)),
        ]);
        assert_eq!(
            visited_ids(&tree),
            vec![(1, 0, 2), (3, 1, 1), (4, 2, 0), (5, 1, 0), (2, 0, 0)]
        );
    }

    #[test]
    fn dangling_parent_is_unreachable() {
        let tree = organize(vec![rec(1, None), rec(7, Some(99)), rec(8, Some(7))]);
        assert_eq!(tree.reply_count(CommentId::new(99)), 1);
        assert_eq!(visited_ids(&tree), vec![(1, 0, 0)]);
    }

    #[test]
    fn reply_count_matches_parent_references() {
        let records = vec![
            rec(1, None),
            rec(2, Some(1)),
            rec(3, Some(1)),
            rec(4, Some(2)),
            rec(5, Some(1)),
        ];
        let tree = organize(records.clone());
        for r in &records {
            let expected = records.iter().filter(|o| o.parent == Some(r.id)).count();
            assert_eq!(tree.reply_count(CommentId::new(r.id)), expected);
        }
        // every reachable record is rendered exactly once
        let mut ids: Vec<i64> = tree.flatten().iter().map(|n| n.item.id).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn reply_text() {
        assert_eq!(reply_count_text(0), "No replies");
        assert_eq!(reply_count_text(1), "1 reply");
        assert_eq!(reply_count_text(4), "4 replies");
    }
}
