pub mod converter;
pub mod engine;
pub mod format;
pub mod loader;
pub mod parser;
pub mod trie;
pub mod types;
