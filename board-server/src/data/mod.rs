pub mod memory_repository;
pub mod post_repository;
pub mod topic_repository;
