// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the public-facing API of the plume library. It ties the pure
// engines together without adding behavior of its own.
//
// Data Flow (publication):
//
//   1. [Stateless API (encode_table)]       -> Receives `&Table`
//         |
//         `-> calls the encoder, which resolves temporal zones and the
//             text-coercion fallback, and returns the container bytes
//
//   2. [Stateless API (publish_bytes)]      -> Receives `&[u8]`
//         |
//         `-> hashes to the content key and publishes via temp-write + rename
//         |
//         `-> returns an `ArtifactRef` the client surface resolves out-of-band
//
// Independently, [RequestBridge] relays opaque request/response buffers
// between the client surface and the compute runtime (see `crate::runtime`).
//
// ====================================================================================

pub mod stateless_api;

pub use stateless_api::{encode_and_publish, encode_record_batch, encode_table, publish_bytes};

#[cfg(test)]
mod tests;
