// Discovery: finds a catalog work the user has not decided on yet, and
// records accept/reject decisions.

pub mod engine;
pub mod handlers;
pub mod record;
pub mod sampler;

pub use sampler::{OffsetSampler, ThreadRngSampler};
