//! tasklane-core
//!
//! Sequential decision tasks over a shared context.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, label, context, task, outcome, decision, events, errors）
//! - **ports**: 抽象化レイヤー（Clock, IdGenerator, EventSink）
//! - **app**: アプリケーションロジック（builder, runner, umbrella）

pub mod app;
pub mod domain;
pub mod ports;
