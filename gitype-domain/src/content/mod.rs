pub mod link;
pub mod tag;
pub mod post;
pub mod archive;

pub use link::{Author, Icon, Link};
pub use tag::Tag;
pub use post::{Post, PostMeta, PostState, Outdated};
pub use archive::Archive;
