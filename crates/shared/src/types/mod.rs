//! Common types used across the application.

pub mod money;

pub use money::{INNER_DP, MONEY_DP, one_cent, round_inner, round_money};
