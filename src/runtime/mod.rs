//! The request bridge between the client surface and the compute runtime.
//!
//! The runtime is an external collaborator behind the `ComputeRuntime` trait:
//! bytes in, bytes out, nothing interpreted. The bridge relays one buffer per
//! call, fully synchronously; the caller owns coalescing and debouncing. No
//! retries, no queuing, no backpressure.

use std::time::Instant;

use crate::error::PlumeError;

/// The error type a runtime implementation may surface. The bridge passes it
/// through opaquely without classification.
pub type RuntimeError = Box<dyn std::error::Error + Send + Sync>;

/// The compute runtime seam: one opaque request buffer in, one opaque
/// response buffer out.
pub trait ComputeRuntime {
    fn process_request(&mut self, request: &[u8]) -> Result<Vec<u8>, RuntimeError>;
}

/// Relays opaque request buffers to a compute runtime and reports timing.
pub struct RequestBridge<R: ComputeRuntime> {
    runtime: R,
    verbose: bool,
}

impl<R: ComputeRuntime> RequestBridge<R> {
    pub fn new(runtime: R, verbose: bool) -> Self {
        Self { runtime, verbose }
    }

    /// Passes the inbound buffer to the runtime unmodified and returns its
    /// output unmodified. The timing line is observability only.
    pub fn handle(&mut self, request: &[u8]) -> Result<Vec<u8>, PlumeError> {
        let start = Instant::now();

        let response = self
            .runtime
            .process_request(request)
            .map_err(|e| PlumeError::RuntimeFailure(e.to_string()))?;

        if self.verbose {
            log::info!(
                "relayed request: {} B in, {} B out in {:.1}ms",
                request.len(),
                response.len(),
                start.elapsed().as_secs_f64() * 1000.0
            );
        }

        Ok(response)
    }
}
