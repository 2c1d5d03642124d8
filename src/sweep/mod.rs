//! Parameter sweeps: axes, file naming and record collection
//!
//! - [`axes`]: ordered, validated sweep axes ([`TolerancePlan`], [`StepPlan`])
//! - [`naming`]: pure `parameters → path` functions, the contract with the solver drivers
//! - [`collector`]: loads one [`ResultRecord`] per combination, missing files included

pub mod axes;
pub mod collector;
pub mod naming;

pub use axes::{order_series_name, powers_of_two, StepPlan, Tolerance, TolerancePlan};
pub use collector::{Collector, RecordGrid, RecordSlot, ResultRecord, SweepPoint, SweepWarning};
