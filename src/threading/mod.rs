//! Threading availability negotiation.
//!
//! A generator handle starts [`ThreadingState::Uninitialized`] and moves to
//! [`ThreadingState::Ready`] only through an explicit initialization. There
//! is no way back. Probing never changes state.

mod negotiator;

pub use negotiator::{ThreadingNegotiator, ThreadingState};
