//! Path syntax, normalization, and resolution strategies.
//!
//! # Key Concepts
//!
//! ## Absolute entries
//!
//! An entry without a relative-to target stores a full path. Resolution
//! normalizes it: joining onto the working directory when the stored path
//! is not absolute, then collapsing `.` and `..` (a `..` at the root stays
//! there).
//!
//! ## Relative entries
//!
//! An entry with a relative-to target stores a fragment. Resolution appends
//! the fragment to the target's resolved path. A leading `/` on the fragment
//! is dropped, a bare `/` is rejected, and the Windows drive-letter form
//! (`X:\...`) is reserved for absolute entries.
//!
//! # Examples
//!
//! ```
//! use pathreg::path::resolver::{resolve_absolute, resolve_relative};
//!
//! # #[cfg(unix)]
//! # {
//! let data = resolve_absolute("/srv/app").unwrap();
//! assert_eq!(resolve_relative(&data, "log").unwrap(), "/srv/app/log");
//! # }
//! ```

pub mod normalize;
pub mod resolver;
pub mod syntax;

#[cfg(all(test, unix, feature = "property-tests"))]
mod proptests;

pub use resolver::Resolution;
