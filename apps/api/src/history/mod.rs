// Interaction history: the user's recorded accept/reject decisions.
// Uniqueness of (user_id, external_id) is enforced by the table constraint.

pub mod export;
pub mod handlers;
pub mod store;

pub use store::{InteractionStore, PgInteractionStore};
