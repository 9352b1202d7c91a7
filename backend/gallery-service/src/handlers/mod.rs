/// HTTP handlers for gallery-service
///
/// Thin plumbing over the services layer: request validation, actor
/// extraction, and JSON projection. Status-code mapping lives on
/// `AppError`'s `ResponseError` impl, not here.
pub mod feed;
pub mod posts;
pub mod search;
pub mod tags;
pub mod users;

// Re-export handler functions at module level
pub use feed::get_feed;
pub use posts::{
    add_comment, attach_tags, create_post, delete_post, get_post, get_user_posts, toggle_like,
};
pub use search::search;
pub use tags::tag_feed;
pub use users::{
    get_followers, get_following, get_me, get_user, register, toggle_follow, update_me,
};
