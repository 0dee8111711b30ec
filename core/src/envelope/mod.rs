//! envelope/mod.rs
//! MSSDK envelope: zlib, length prefix, checksum trailer, XTEA-CBC, AES-128-CBC.
//!
//! Industry notes:
//! - Layout before the inner cipher: `tag ‖ trailer ‖ len_le32 ‖ zlib (zero padded)`.
//! - The inner cipher's round count comes from the random IV; decode must derive it the same way.
//! - A missing zlib magic after decode is the usual symptom of a wrong key or round count.

pub mod types;
pub mod xtea;
pub mod trailer;
pub mod compress;
pub mod codec;

pub use types::*;
pub use xtea::*;
pub use trailer::*;
pub use compress::*;
pub use codec::*;
