//! Consensus C# Compatibility Test Suite
//!
//! This module contains comprehensive tests that ensure full compatibility
//! with the C# Neo.Consensus implementation.
