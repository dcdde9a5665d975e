pub mod get_filtered;
pub mod manage_blacklist;
pub mod serve;
