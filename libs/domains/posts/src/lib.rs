//! Posts Domain
//!
//! Blog posts stored in MongoDB. Every route requires a session; deleting
//! additionally requires that the session's display name matches the post's
//! stored author.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← GET/POST/DELETE /posts, session gate
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← payload validation, ownership check
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← trait + MongoDB and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Post, storage document, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_posts::{handlers, MongoPostRepository, PostService};
//!
//! let repository = MongoPostRepository::new(Arc::clone(&mongo_cache));
//! let router = handlers::router(PostService::new(repository), session_resolver);
//! ```

pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use error::{PostError, PostResult};
pub use handlers::ApiDoc;
pub use memory::InMemoryPostRepository;
pub use models::{CreatePost, DeleteParams, DeleteResponse, Post, PostDocument};
pub use self::mongodb::MongoPostRepository;
pub use repository::PostRepository;
pub use service::PostService;
pub use validation::validate_payload;
