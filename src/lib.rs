//! Weighted questionnaire scoring for the three FELKLA assessment phases,
//! with plain-text and PDF report rendering.

pub mod config;
pub mod core;
pub mod render;
pub mod utils;
