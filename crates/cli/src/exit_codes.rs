//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! 0 = success, 1 = general error (bad input data, unreadable file).
//! Usage errors exit 2, which clap emits on its own.

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
