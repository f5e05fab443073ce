//! Domain logic of the publication activity: group approval aggregation,
//! the group files table and the restore task descriptor.

pub mod approval;
pub mod display;
pub mod error;
pub mod restore;
pub mod summary;
pub mod table;
pub mod tooltip;
pub mod types;
