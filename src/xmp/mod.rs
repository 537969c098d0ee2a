//! XMP packet codec and namespace registry
//!
//! XMP is serialized RDF inside an xpacket wrapper. The codec decodes a
//! packet into the XmpData container and serializes a container back to
//! a packet; the registry maps namespace prefixes to URIs and records
//! which properties are arrays.

pub mod codec;
pub mod registry;
#[cfg(test)]
mod tests;

pub use codec::{decode, encode};
pub use registry::{namespace_uri, register_namespace, shutdown};
