//! Cross-module scenario tests

mod manipulation_properties;
