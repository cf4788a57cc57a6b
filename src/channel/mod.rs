// src/channel/mod.rs
// =============================================================================
// The bounded work channel that connects the producer to the workers.
//
// Submodules:
// - bounded: The blocking, fixed-capacity FIFO and its Sender/Receiver handles
//
// The capacity is the only backpressure in the program: a full channel puts
// the producer to sleep until a worker takes something out.
// =============================================================================

mod bounded;

pub use bounded::{bounded, Receiver, SendError, Sender};
