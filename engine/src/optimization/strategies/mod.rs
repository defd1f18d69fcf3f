//! Concrete search strategy implementations
//!
//! Each strategy follows the SearchStrategy trait.

pub mod local_search;

pub use local_search::LocalSearch;
