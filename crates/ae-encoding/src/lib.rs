//! # ae-encoding
//!
//! Checksummed identifier encoding.
//!
//! Identifiers travel as `<prefix>_<payload>` where the payload is the data
//! followed by a four byte double-SHA-256 checksum, written in base58 or
//! base64 depending on the prefix. `id` fields on the wire prepend a one
//! byte tag to the 32-byte hash instead of the textual prefix.
//!
//! ```
//! use ae_encoding::{decode, encode};
//! use ae_primitives::Encoding;
//!
//! let bytes = decode("ba_AQIq9Y55kw==").unwrap();
//! assert_eq!(bytes, vec![1, 2, 42]);
//! assert_eq!(encode(&bytes, Encoding::Name).unwrap(), "nm_3DZUwMat2");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod codec;
mod error;
mod id;

pub use codec::{decode, decode_as, decode_with_prefix, encode};
pub use error::EncodingError;
pub use id::{read_id, write_id, ID_LEN};

pub use ae_primitives::{Encoding, IdTag};
