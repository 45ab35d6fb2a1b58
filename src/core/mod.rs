/*!
 * Core Types
 * Cross-cutting constants and error taxonomy
 */

pub mod errors;
pub mod limits;

pub use errors::{RingError, RingResult};
