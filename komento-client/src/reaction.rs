use crate::api::{Comment, ReactionKind, UserId};

/// Computes the like/dislike lists after `user` toggles `kind` on `c`.
///
/// Pure; the caller decides what to do with the result. A user already in the
/// target list is removed (un-react); otherwise they join the target list and
/// leave the opposite one, so membership in both at once cannot happen.
pub fn toggled(c: &Comment, user: UserId, kind: ReactionKind) -> (Vec<UserId>, Vec<UserId>) {
    let mut likes = c.likes.clone();
    let mut dislikes = c.dislikes.clone();
    let (target, opposite) = match kind {
        ReactionKind::Like => (&mut likes, &mut dislikes),
        ReactionKind::Dislike => (&mut dislikes, &mut likes),
    };
    if target.contains(&user) {
        target.retain(|u| *u != user);
    } else {
        opposite.retain(|u| *u != user);
        target.push(user);
    }
    (likes, dislikes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CommentId, ThreadId, Time, Uuid};

    fn comment() -> Comment {
        Comment {
            id: CommentId(Uuid::new_v4()),
            thread: ThreadId::stub(),
            parent: None,
            author: UserId(Uuid::new_v4()),
            author_name: "author".to_string(),
            content: "text".to_string(),
            created_at: Time::default(),
            likes: Vec::new(),
            dislikes: Vec::new(),
        }
    }

    #[test]
    fn like_then_dislike_switches_sides() {
        let mut c = comment();
        let u = UserId(Uuid::new_v4());

        let (likes, dislikes) = toggled(&c, u, ReactionKind::Like);
        assert_eq!(likes, vec![u]);
        assert!(dislikes.is_empty());
        c.likes = likes;
        c.dislikes = dislikes;

        let (likes, dislikes) = toggled(&c, u, ReactionKind::Dislike);
        assert!(likes.is_empty());
        assert_eq!(dislikes, vec![u]);
    }

    #[test]
    fn double_toggle_is_identity() {
        let mut c = comment();
        let u = UserId(Uuid::new_v4());
        let before = (c.likes.clone(), c.dislikes.clone());

        let (likes, dislikes) = toggled(&c, u, ReactionKind::Like);
        c.likes = likes;
        c.dislikes = dislikes;
        let after = toggled(&c, u, ReactionKind::Like);
        assert_eq!(after, before);
    }

    #[test]
    fn other_users_are_left_alone() {
        let mut c = comment();
        let other = UserId(Uuid::new_v4());
        c.likes.push(other);
        let u = UserId(Uuid::new_v4());

        let (likes, dislikes) = toggled(&c, u, ReactionKind::Dislike);
        assert_eq!(likes, vec![other]);
        assert_eq!(dislikes, vec![u]);
    }
}
