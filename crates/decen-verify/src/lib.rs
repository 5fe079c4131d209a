//! Content digests and identifier resolution.
//!
//! Every piece of mirrored content is addressed by the lowercase hex SHA-256
//! of its bytes. User input is either such a digest already, or text whose
//! digest is taken.
//!
//! # Example
//!
//! ```
//! use decen_verify::Digest;
//!
//! let digest = Digest::resolve("hello");
//! assert_eq!(
//!     digest.as_str(),
//!     "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
//! );
//! assert_eq!(Digest::resolve(digest.as_str()), digest);
//! ```

pub use self::digest::{Digest, is_digest, resolve};
pub use self::error::{ParseDigestError, Result};
pub use self::hasher::{Hasher, Sha256Hasher};

mod digest;
mod error;
mod hasher;
