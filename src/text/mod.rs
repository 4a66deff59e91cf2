// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Cover-text primitives.
//!
//! Segmentation, lexical tables, invisible code point handling and the
//! content analyzer. This layer is std-only and knows nothing about bits;
//! the `stego` module builds the channels on top of it.

pub mod analysis;
pub mod hidden;
pub mod lexicon;
pub mod segment;

pub use analysis::{
    AnalyzerThresholds, ContentAnalysis, ContentAnalyzer, Dialectic, PointOfView,
    RhetoricalClose, Tense,
};
