pub mod models;
pub mod projections;

pub use models::{Comment, Post, PostContent, Tag, User};
pub use projections::{
    CommentView, Pagination, PostDetail, PostSummary, UserProfile, UserSummary,
};
