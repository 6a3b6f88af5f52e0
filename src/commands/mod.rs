pub mod analyze;
pub mod chunk;
pub mod edit;
pub mod fix;
pub mod profile;
