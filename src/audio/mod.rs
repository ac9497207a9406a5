//! Audio side of the device.
//!
//! - `monitor`: decimated tone tap and the sink it feeds (realtime)
//! - `codec`, `i2s`, `output`: headphone/microphone control (control plane)

pub mod codec;
pub mod i2s;
pub mod monitor;
pub mod output;

pub use codec::{Codec, CodecError, Volume, VolumeRange};
pub use i2s::{AudioRate, I2sBus, I2sConfig, I2sError, I2sRegisters};
pub use monitor::{AudioFrame, AudioMonitor, MonitorTap, NullMonitor};
#[cfg(feature = "rtrb")]
pub use monitor::RingMonitor;
pub use output::AudioControl;
