pub mod notice;
pub mod ticker;
