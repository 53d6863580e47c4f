// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// modifications are permitted.

//! Extension traits for Neo blockchain types.

pub mod byte_extensions;
pub mod uint160_extensions;

pub use byte_extensions::ByteExtensions;
pub use uint160_extensions::UInt160Extensions;
