pub const DEFAULT_TARGET: &str = "thumbv7em-none-eabihf";

/// Crates that must build for the embedded target.
pub const LIBRARY_CRATES: &[&str] = &["bus-arbiter", "sh-dev", "hcbin"];
