//! Identity reconciliation for noisy attendance-device tokens.

mod reconcile;
mod token;

pub use reconcile::Reconciler;
pub use token::BioToken;
