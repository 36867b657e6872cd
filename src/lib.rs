//! TOPSIS Ranker - Multi-criteria ranking of alternatives.
//!
//! This crate ranks the rows of a CSV or spreadsheet table with the TOPSIS
//! method (Technique for Order of Preference by Similarity to Ideal Solution)
//! and serves the result over HTTP, by email, or from the command line.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
