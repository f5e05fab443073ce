//! Row structs for the publication tables.
//!
//! Each submodule holds `FromRow` structs matching query results and, where
//! rows are inserted, a `Deserialize` create DTO.

pub mod group;
pub mod group_approval;
pub mod publication;
pub mod publication_file;
