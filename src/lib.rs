//! Core library for the republica-tools command line application.
//!
//! The library exposes the two batch jobs behind the CLI as well as the
//! pieces they are built from: CSV adapters live under
//! [`republica::tools::io`], the table representation inside
//! [`republica::tools::model`], the extract merger in
//! [`republica::tools::merge`], the column rules in
//! [`republica::tools::clean`], primary-key resolution in
//! [`republica::tools::dedup`], and file-to-file orchestration under
//! [`republica::tools::pipeline`].

pub mod republica;

pub use republica::tools::{Result, ToolError, clean, dedup, error, io, merge, model, pipeline};
