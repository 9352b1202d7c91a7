/// Business logic layer for gallery-service
///
/// Relationship engine: follow, likes, tags and comments, the
/// bidirectional/derived relationships kept mutually consistent through
/// read-current-state-then-conditionally-write against the entity store.
/// Retrieval: feed assembly and search on top of the same store.
pub mod comments;
pub mod feed;
pub mod follow;
pub mod likes;
pub mod posts;
pub mod search;
pub mod tags;
pub mod users;

mod projection;

// Re-export commonly used services
pub use comments::CommentService;
pub use feed::{FeedPage, FeedService};
pub use follow::{FollowService, FollowToggle};
pub use likes::{LikeService, LikeToggle};
pub use posts::PostService;
pub use search::{SearchResults, SearchScope, SearchService, TagHit};
pub use tags::TagService;
pub use users::UserService;
