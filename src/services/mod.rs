pub mod catalog;
pub mod filter;
pub mod storage;
pub mod theme;
