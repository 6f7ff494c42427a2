use chrono::{Duration, Utc};
use komento_api::{Comment, CommentId, NewComment, ThreadId, User, UserId, Uuid};
use rand::Rng;

const NUM_USERS: usize = 4;
const NUM_COMMENTS: usize = 40;
const COMMENT_WORD_COUNT: usize = 12;

// Chance that a comment is a reply rather than a root
const REPLY_PROBABILITY: f64 = 0.6;
// Chance that any given user reacted to any given comment
const REACTION_PROBABILITY: f64 = 0.3;

/// Prints a randomly generated comment forest for one article thread as
/// JSON, for seeding manual testing sessions.
fn main() {
    let mut rng = rand::thread_rng();

    let users: Vec<User> = (0..NUM_USERS)
        .map(|i| User {
            id: UserId(Uuid::new_v4()),
            name: format!("user-{i}"),
        })
        .collect();
    let thread = ThreadId::article(Uuid::new_v4());

    let mut comments: Vec<Comment> = Vec::with_capacity(NUM_COMMENTS);
    for i in 0..NUM_COMMENTS {
        let author = &users[rng.gen_range(0..users.len())];
        let parent = match !comments.is_empty() && rng.gen_bool(REPLY_PROBABILITY) {
            true => Some(comments[rng.gen_range(0..comments.len())].id),
            false => None,
        };
        let new = NewComment {
            thread,
            parent,
            author: author.id,
            author_name: author.name.clone(),
            content: lipsum::lipsum(COMMENT_WORD_COUNT),
        };
        new.validate().expect("generated an invalid comment");

        let mut likes = Vec::new();
        let mut dislikes = Vec::new();
        for u in &users {
            if rng.gen_bool(REACTION_PROBABILITY) {
                // a user lands in at most one of the two lists
                match rng.gen_bool(0.5) {
                    true => likes.push(u.id),
                    false => dislikes.push(u.id),
                }
            }
        }

        comments.push(Comment {
            id: CommentId(Uuid::new_v4()),
            thread: new.thread,
            parent: new.parent,
            author: new.author,
            author_name: new.author_name,
            content: new.content,
            created_at: Utc::now() - Duration::minutes((NUM_COMMENTS - i) as i64),
            likes,
            dislikes,
        });
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&comments).expect("serializing generated comments")
    );
}
