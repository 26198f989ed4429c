//! Unit tests for the project registry.
