use std::collections::HashSet;

use komento_client::{api::*, toggled, ThreadDump};
use proptest::prelude::*;

/// Shape of a random forest: for each node, the index of its parent among
/// the earlier nodes, or None for a root. Indices only point backwards, so
/// no cycles are possible.
fn forest_shape() -> impl Strategy<Value = Vec<Option<prop::sample::Index>>> {
    prop::collection::vec(prop::option::of(any::<prop::sample::Index>()), 1..40)
}

fn build_forest(shape: &[Option<prop::sample::Index>]) -> Vec<Comment> {
    let thread = ThreadId::stub();
    let mut comments: Vec<Comment> = Vec::with_capacity(shape.len());
    for (i, parent) in shape.iter().enumerate() {
        let parent = match (i, parent) {
            (0, _) | (_, None) => None,
            (_, Some(idx)) => Some(comments[idx.index(i)].id),
        };
        comments.push(Comment {
            id: CommentId(Uuid::from_u128(i as u128 + 1)),
            thread,
            parent,
            author: UserId::stub(),
            author_name: "gen".to_string(),
            content: format!("comment {i}"),
            created_at: Time::default(),
            likes: Vec::new(),
            dislikes: Vec::new(),
        });
    }
    comments
}

fn dump_of(comments: Vec<Comment>) -> ThreadDump {
    let mut dump = ThreadDump::stub();
    dump.reset(comments);
    dump
}

/// Walks the materialized tree from the roots down, collecting every id.
fn flatten(dump: &ThreadDump) -> Vec<CommentId> {
    let mut out = Vec::new();
    let mut stack: Vec<CommentId> = dump.children_of(None).iter().map(|c| c.id).collect();
    while let Some(id) = stack.pop() {
        out.push(id);
        stack.extend(dump.children_of(Some(&id)).iter().map(|c| c.id));
    }
    out
}

proptest! {
    /// Materializing children for every node and flattening recursively
    /// yields exactly the original comments, no duplicates, no omissions.
    #[test]
    fn tree_reconstruction_loses_nothing(shape in forest_shape()) {
        let comments = build_forest(&shape);
        let expected: HashSet<CommentId> = comments.iter().map(|c| c.id).collect();
        let dump = dump_of(comments);

        let flat = flatten(&dump);
        prop_assert_eq!(flat.len(), expected.len());
        let seen: HashSet<CommentId> = flat.into_iter().collect();
        prop_assert_eq!(seen, expected);
    }

    /// Removing a node's closure removes exactly the node and its
    /// descendants; everything else survives untouched.
    #[test]
    fn cascade_closure_is_exact(shape in forest_shape(), pick in any::<prop::sample::Index>()) {
        let comments = build_forest(&shape);
        let n = comments.len();
        let target = comments[pick.index(n)].id;
        let mut dump = dump_of(comments);

        let mut closure = dump.descendants_of(&target);
        closure.insert(target);
        let removed = dump.remove_all(&closure);

        prop_assert_eq!(removed, closure.len());
        prop_assert_eq!(dump.len(), n - removed);
        for c in dump.iter() {
            prop_assert!(!closure.contains(&c.id));
        }
        // no survivor may still hang off a removed ancestor
        for c in dump.iter() {
            if let Some(p) = c.parent {
                prop_assert!(!closure.contains(&p));
            }
        }
    }

    /// Over any toggle sequence by one user, the user is never in both
    /// lists at once and never in either list twice.
    #[test]
    fn reaction_lists_stay_mutually_exclusive(kinds in prop::collection::vec(any::<bool>(), 1..30)) {
        let user = UserId(Uuid::from_u128(42));
        let mut c = Comment {
            id: CommentId::stub(),
            thread: ThreadId::stub(),
            parent: None,
            author: UserId::stub(),
            author_name: "gen".to_string(),
            content: "x".to_string(),
            created_at: Time::default(),
            likes: Vec::new(),
            dislikes: Vec::new(),
        };
        for like in kinds {
            let kind = if like { ReactionKind::Like } else { ReactionKind::Dislike };
            let (likes, dislikes) = toggled(&c, user, kind);
            c.likes = likes;
            c.dislikes = dislikes;
            prop_assert!(!(c.likes.contains(&user) && c.dislikes.contains(&user)));
            prop_assert!(c.likes.iter().filter(|u| **u == user).count() <= 1);
            prop_assert!(c.dislikes.iter().filter(|u| **u == user).count() <= 1);
        }
    }

    /// Toggling the same kind twice is the identity.
    #[test]
    fn double_toggle_restores_the_ledger(like in any::<bool>(), others in prop::collection::vec(any::<u128>(), 0..5)) {
        let user = UserId(Uuid::from_u128(42));
        let mut c = Comment {
            id: CommentId::stub(),
            thread: ThreadId::stub(),
            parent: None,
            author: UserId::stub(),
            author_name: "gen".to_string(),
            content: "x".to_string(),
            created_at: Time::default(),
            likes: Vec::new(),
            dislikes: Vec::new(),
        };
        // seed reactions from other users; the toggle must not disturb them
        for (i, o) in others.iter().enumerate() {
            let other = UserId(Uuid::from_u128(o.wrapping_add(1000)));
            if other == user {
                continue;
            }
            match i % 2 {
                0 => c.likes.push(other),
                _ => c.dislikes.push(other),
            }
        }
        let before = (c.likes.clone(), c.dislikes.clone());
        let kind = if like { ReactionKind::Like } else { ReactionKind::Dislike };

        let (likes, dislikes) = toggled(&c, user, kind);
        c.likes = likes;
        c.dislikes = dislikes;
        let after = toggled(&c, user, kind);
        prop_assert_eq!(after, before);
    }
}
