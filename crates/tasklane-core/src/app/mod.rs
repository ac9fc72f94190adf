//! App - アプリケーション層
//!
//! # 主要コンポーネント
//! - **ProcessBuilder**: タスク列の構築と起動時検証
//! - **Runner**: タスクを順番に実行し、結果を context に書き戻す
//! - **umbrella**: 天気と湿度から傘の要否を判定するシナリオ

pub mod builder;
pub mod runner;
pub mod umbrella;

pub use self::builder::{Process, ProcessBuilder};
pub use self::runner::Runner;
pub use self::umbrella::{UmbrellaDecider, UmbrellaError, UmbrellaOutcome, Validation};
