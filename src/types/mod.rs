// src/types/mod.rs

pub mod element;

pub use element::{Bounds, RawFeature, Tags};
