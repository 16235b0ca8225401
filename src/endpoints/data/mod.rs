//! Data API endpoints.
//!
//! - [`CustomObjects`]: Custom object CRUD
//! - [`CustomObjectsSearch`]: Paged custom object search
//! - [`CustomerLists`]: Paged customer search within a customer list
//! - [`Jobs`]: Job executions
//! - [`JobExecutionSearch`]: Paged job execution search
//! - [`GlobalJobs`]: System jobs for search indexes and site archives
//! - [`CodeVersions`]: Code version management
//! - [`Libraries`]: Content assets

mod code_versions;
mod custom_objects;
mod custom_objects_search;
mod customer_lists;
mod global_jobs;
mod job_execution_search;
mod jobs;
mod libraries;

pub use code_versions::CodeVersions;
pub use custom_objects::CustomObjects;
pub use custom_objects_search::CustomObjectsSearch;
pub use customer_lists::CustomerLists;
pub use global_jobs::GlobalJobs;
pub use job_execution_search::JobExecutionSearch;
pub use jobs::Jobs;
pub use libraries::Libraries;
