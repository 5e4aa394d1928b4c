//! Move legality rules.
//!
//! Every kind of pile shares one `Pile` type; the per-kind rules are here,
//! selected by matching on the destination's `PileKind`.

pub mod validator;

pub use validator::{
    can_move_run, can_move_to_foundation, can_move_to_tableau, check_foundation, check_move,
    check_run, check_tableau,
};
