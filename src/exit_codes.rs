//! Exit codes used by the fillpara binary
//!
//! - 0: success, including "no paragraph at the caret"
//! - 1: `--check` found a paragraph that is not filled
//! - 2: tool error (I/O, configuration, invalid arguments)

pub const SUCCESS: i32 = 0;
pub const CHECK_FAILED: i32 = 1;
pub const TOOL_ERROR: i32 = 2;

pub mod exit {
    use super::*;

    pub fn success() -> ! {
        std::process::exit(SUCCESS)
    }

    pub fn check_failed() -> ! {
        std::process::exit(CHECK_FAILED)
    }

    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR)
    }
}
