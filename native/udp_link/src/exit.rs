use crate::error::LinkError;

// sysexits-style codes
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const USAGE: i32 = 64;
pub const UNAVAILABLE: i32 = 69;
pub const IO_ERROR: i32 = 74;

/// Process exit code for a failed run
pub fn code_for(err: &LinkError) -> i32 {
    match err {
        LinkError::Modem(_) | LinkError::InvalidConfig(_) => USAGE,
        LinkError::ConfigRead { .. } => FAILURE,
        LinkError::ResourceUnavailable { .. } => UNAVAILABLE,
        LinkError::TransmissionFailure { .. } | LinkError::ShortWrite { .. } => IO_ERROR,
    }
}
