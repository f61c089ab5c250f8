pub mod collector;
pub mod errors;
pub mod hostlist;
pub mod models;
pub mod probe;
