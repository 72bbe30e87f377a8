//! Process exit codes. Library failures map through `KattisError::exit_code`.

pub const SUCCESS: i32 = 0;
pub const REJECTED: i32 = 1; // Judged, but not Accepted
pub const INTERNAL_ERROR: i32 = 5; // Anything that is not a KattisError
