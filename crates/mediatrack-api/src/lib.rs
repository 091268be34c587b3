//! TMDB catalog client for mediatrack.
//!
//! Wraps the TMDB v3 API and normalizes its payloads into typed
//! catalog models (summaries, details, countries).

/// TMDB API client.
pub mod tmdb;
