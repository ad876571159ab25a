//! XML text helpers shared by the writers and the inspector.

pub mod escape;

pub use escape::{escape_xml, is_restricted_char, push_entity};
