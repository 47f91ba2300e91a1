//! Process exit codes, taken from BSD `sysexits.h`.
//!
//! Success is the plain `0` of a normal return from `main`.

/// Bad command line, e.g. an output path that would overwrite the input.
pub const USAGE: i32 = 64;

/// The CSV names an unknown division type, or a `derive` path does not fit its levels.
pub const DATAERR: i32 = 65;

/// The input CSV does not exist.
pub const NOINPUT: i32 = 66;

/// Reading, parsing or writing a file failed.
pub const IOERR: i32 = 74;

/// A config file or `DIVID_*` variable is invalid.
pub const CONFIG: i32 = 78;
