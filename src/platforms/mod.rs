//! Platform-specific adapters for chat services

pub mod groupme;
