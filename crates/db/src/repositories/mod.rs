//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod group_approval_repo;
pub mod group_repo;
pub mod publication_file_repo;
pub mod publication_repo;

pub use group_approval_repo::GroupApprovalRepo;
pub use group_repo::GroupRepo;
pub use publication_file_repo::PublicationFileRepo;
pub use publication_repo::PublicationRepo;
