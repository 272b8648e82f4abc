//! RTT Log Stream
//!
//! Incremental processing of a live debug log: lines can be paused and
//! resumed without loss, filtered and highlighted by debounced substring
//! inputs, and every change is reduced to a single render directive that
//! either appends to or replaces what the display shows.
//!
//! # Example
//!
//! ```
//! use rtt_log_stream::{LogStreamController, RecordingSink, StreamOptions};
//! use std::time::{Duration, Instant};
//!
//! let mut controller = LogStreamController::new(StreamOptions::default());
//! let mut sink = RecordingSink::new();
//! let t0 = Instant::now();
//!
//! controller.drive("error: a\nwarning: b\nerror: c\n", t0, &mut sink)?;
//! controller.set_filter("error", t0);
//! controller.drive("", t0 + Duration::from_millis(600), &mut sink)?;
//!
//! assert_eq!(sink.texts(), vec!["error: a", "error: c"]);
//! # Ok::<(), rtt_log_stream::SinkError>(())
//! ```

mod controller;
mod debounce;
mod filter;
mod highlight;
mod line_buffer;
mod message;
mod pause_gate;
mod sink;
mod types;

pub use controller::{split_chunk, LogStreamController, StreamOptions, HEARTBEAT_INTERVAL};
pub use debounce::{DebouncedInput, DEBOUNCE_WINDOW};
pub use filter::FilterStage;
pub use highlight::HighlightStage;
pub use line_buffer::LineBuffer;
pub use message::ControlMessage;
pub use pause_gate::{GateState, PauseGate};
pub use sink::{render_directive, DisplaySink, RecordingSink, SinkError, SinkEvent};
pub use types::*;
