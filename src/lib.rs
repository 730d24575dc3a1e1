// src/lib.rs
//! Chinese character to Hanyu Pinyin lookup with phrase-level heteronym
//! overrides and configurable output styles.

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod resource;

pub use crate::config::PinyinConfig;
pub use crate::core::engine::PinyinEngine;
pub use crate::core::parser::KeyRadix;
pub use crate::core::format::{format_reading, CaseStyle, OutputFormat, ToneStyle, VCharStyle};
pub use crate::core::types::{CodePoint, PhraseMatch, Reading, Segment};
pub use crate::error::{PinyinError, Result};
