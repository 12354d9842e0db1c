//! Signal composition: combines indicator readings into a trade idea.
//!
//! The composer is a pure function of its input window and policy. It holds no
//! state between calls and never performs I/O, so it can be embedded in any
//! orchestration context (CLI, scheduled job, request handler) unchanged.

pub mod composer;
pub mod policy;

pub use composer::{generate_trade_idea, Evaluation, IndicatorSnapshot, PolicyChecks, SignalComposer};
pub use policy::{
    PolicyConfig, PolicyError, DEFAULT_RSI_OVERSOLD, DEFAULT_STOP_PCT, DEFAULT_TARGET_PCT,
    DEFAULT_WINDOW, MIN_WINDOW,
};
