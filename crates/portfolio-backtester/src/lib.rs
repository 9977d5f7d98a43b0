//! # Portfolio Backtester
//!
//! Evaluates a threshold long/short strategy built from model predictions.
//! Each period, assets whose long (short) confidence strictly exceeds the
//! threshold form an equally weighted long (short) sleeve; the strategy
//! return is the sum of both sleeves' returns.
//!
//! The backtester expects pre-trimmed, time-aligned inputs. The
//! `data_handler` module loads the array files and applies the trim; the
//! backtester itself only checks that the shapes agree.

pub mod backtester;
pub mod data_handler;
pub mod error;
pub mod weights;

pub use backtester::{BacktestInputs, BacktestResult, PortfolioBacktester};
pub use data_handler::{load_inputs, read_dates, trim_inputs};
pub use error::PortfolioError;
pub use weights::{side_returns, SideWeights};
