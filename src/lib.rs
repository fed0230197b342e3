pub mod config;
pub mod error;
pub mod filter;
pub mod output;
pub mod pager;
pub mod selection;
pub mod source;
pub mod stats;
pub mod store;
pub mod table;
