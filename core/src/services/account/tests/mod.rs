//! Unit tests for the account service
