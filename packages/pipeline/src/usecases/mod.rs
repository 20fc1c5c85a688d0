//! Orchestrating use cases.

pub mod generate_blog_posts;

pub use generate_blog_posts::{
    GenerateBlogPostsInput, GenerateBlogPostsResult, GenerateBlogPostsUseCase, RunSettings,
};
