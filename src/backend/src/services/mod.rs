//! Business logic services
//!
//! This module contains business logic separated from HTTP concerns.

pub mod tracking;
