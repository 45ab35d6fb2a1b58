/*!
 * Synchronization
 * Wait/notify primitive used to coordinate producers and consumers
 */

mod object;

pub use object::SyncObject;
