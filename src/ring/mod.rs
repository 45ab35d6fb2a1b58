/*!
 * Ring Buffer
 * Bounded FIFO queue passing opaque handles between threads
 */

mod buffer;

pub use buffer::RingBuffer;
