pub mod error;
pub mod post;
pub mod slug;
pub mod topic;
