//! Ports - 抽象化レイヤー
//!
//! 時刻・ID・イベント出力を trait で差し替え可能にする。
//! テストでは FixedClock / RecordingEventSink を使う。

pub mod clock;
pub mod event_sink;
pub mod id_generator;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::{EventSink, NoopEventSink, RecordingEventSink, TracingEventSink};
pub use self::id_generator::{IdGenerator, UlidGenerator};
