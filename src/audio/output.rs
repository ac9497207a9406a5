use super::codec::{Codec, CodecError, Volume, VolumeRange};
use super::i2s::{AudioRate, I2sBus, I2sConfig};

/// Headphone output and microphone input, driven through an injected codec
/// and I2S bus.
pub struct AudioControl<C: Codec, B: I2sBus> {
    codec: C,
    bus: B,
    i2s: I2sConfig,
}

impl<C: Codec, B: I2sBus> AudioControl<C, B> {
    pub fn new(codec: C, bus: B) -> Self {
        Self::with_config(codec, bus, I2sConfig::portapack_default())
    }

    pub fn with_config(codec: C, bus: B, i2s: I2sConfig) -> Self {
        Self { codec, bus, i2s }
    }

    /// Bring up the codec, then program I2S0. Output stays stopped and muted.
    pub fn init(&mut self) -> Result<(), CodecError> {
        let regs = self.i2s.registers()?;
        self.codec.init()?;
        self.bus.configure(&regs);
        log::info!("audio: {} initialised", self.codec.name());
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<(), CodecError> {
        self.codec.reset()?;
        self.output_stop();
        log::info!("audio: shut down");
        Ok(())
    }

    pub fn set_rate(&mut self, rate: AudioRate) {
        self.bus.set_audio_clock_divider(rate.divider());
    }

    pub fn output_start(&mut self) {
        self.bus.tx_start();
        self.output_unmute();
    }

    pub fn output_stop(&mut self) {
        self.output_mute();
        self.bus.tx_stop();
    }

    pub fn output_mute(&mut self) {
        self.bus.tx_mute();
        self.codec.headphone_disable();
    }

    pub fn output_unmute(&mut self) {
        self.bus.tx_unmute();
        self.codec.headphone_enable();
    }

    pub fn input_start(&mut self) {
        self.codec.microphone_enable();
        self.bus.rx_start();
    }

    pub fn input_stop(&mut self) {
        self.bus.rx_stop();
        self.codec.microphone_disable();
    }

    pub fn volume_range(&self) -> VolumeRange {
        self.codec.headphone_gain_range()
    }

    pub fn set_volume(&mut self, volume: Volume) -> Result<(), CodecError> {
        let range = self.volume_range();
        if !range.contains(volume) {
            return Err(CodecError::VolumeOutOfRange {
                requested: volume.centibels(),
                min: range.min.centibels(),
                max: range.max.centibels(),
            });
        }
        self.codec.set_headphone_volume(volume)
    }

    pub fn reg_count(&self) -> usize {
        self.codec.reg_count()
    }

    pub fn reg_read(&mut self, reg: usize) -> Result<u32, CodecError> {
        let count = self.codec.reg_count();
        if reg >= count {
            return Err(CodecError::RegisterOutOfRange { reg, count });
        }
        self.codec.reg_read(reg)
    }

    pub fn codec_name(&self) -> &str {
        self.codec.name()
    }

    pub fn reg_bits(&self) -> usize {
        self.codec.reg_bits()
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::i2s::I2sRegisters;

    #[derive(Default)]
    struct Log(Vec<&'static str>);

    #[derive(Default)]
    struct FakeCodec {
        log: Log,
        volume: Option<Volume>,
    }

    impl Codec for FakeCodec {
        fn name(&self) -> &str {
            "fake"
        }
        fn init(&mut self) -> Result<(), CodecError> {
            self.log.0.push("init");
            Ok(())
        }
        fn reset(&mut self) -> Result<(), CodecError> {
            self.log.0.push("reset");
            Ok(())
        }
        fn headphone_enable(&mut self) {
            self.log.0.push("hp on");
        }
        fn headphone_disable(&mut self) {
            self.log.0.push("hp off");
        }
        fn headphone_gain_range(&self) -> VolumeRange {
            VolumeRange {
                min: Volume::decibel(-60),
                max: Volume::decibel(0),
            }
        }
        fn set_headphone_volume(&mut self, volume: Volume) -> Result<(), CodecError> {
            self.volume = Some(volume);
            Ok(())
        }
        fn microphone_enable(&mut self) {
            self.log.0.push("mic on");
        }
        fn microphone_disable(&mut self) {
            self.log.0.push("mic off");
        }
        fn reg_count(&self) -> usize {
            4
        }
        fn reg_bits(&self) -> usize {
            9
        }
        fn reg_read(&mut self, reg: usize) -> Result<u32, CodecError> {
            Ok(reg as u32 * 0x11)
        }
    }

    #[derive(Default)]
    struct FakeBus {
        log: Log,
        regs: Option<I2sRegisters>,
    }

    impl I2sBus for FakeBus {
        fn configure(&mut self, regs: &I2sRegisters) {
            self.regs = Some(*regs);
        }
        fn set_audio_clock_divider(&mut self, _divider: u32) {}
        fn tx_start(&mut self) {
            self.log.0.push("tx start");
        }
        fn tx_stop(&mut self) {
            self.log.0.push("tx stop");
        }
        fn tx_mute(&mut self) {
            self.log.0.push("tx mute");
        }
        fn tx_unmute(&mut self) {
            self.log.0.push("tx unmute");
        }
        fn rx_start(&mut self) {
            self.log.0.push("rx start");
        }
        fn rx_stop(&mut self) {
            self.log.0.push("rx stop");
        }
    }

    fn control() -> AudioControl<FakeCodec, FakeBus> {
        AudioControl::new(FakeCodec::default(), FakeBus::default())
    }

    #[test]
    fn test_init_programs_bus() {
        let mut audio = control();
        audio.init().unwrap();
        assert_eq!(audio.codec().log.0, vec!["init"]);
        assert!(audio.bus().regs.is_some());
    }

    #[test]
    fn test_output_sequence() {
        let mut audio = control();
        audio.output_start();
        audio.output_stop();
        assert_eq!(audio.bus().log.0, vec!["tx start", "tx unmute", "tx mute", "tx stop"]);
        assert_eq!(audio.codec().log.0, vec!["hp on", "hp off"]);
    }

    #[test]
    fn test_input_sequence() {
        let mut audio = control();
        audio.input_start();
        audio.input_stop();
        assert_eq!(audio.bus().log.0, vec!["rx start", "rx stop"]);
        assert_eq!(audio.codec().log.0, vec!["mic on", "mic off"]);
    }

    #[test]
    fn test_volume_out_of_range_rejected() {
        let mut audio = control();
        assert!(matches!(
            audio.set_volume(Volume::decibel(3)),
            Err(CodecError::VolumeOutOfRange { requested: 30, .. })
        ));
        assert_eq!(audio.codec().volume, None);

        audio.set_volume(Volume::decibel(-20)).unwrap();
        assert_eq!(audio.codec().volume, Some(Volume::decibel(-20)));
    }

    #[test]
    fn test_reg_read_bounds() {
        let mut audio = control();
        assert_eq!(audio.reg_read(3).unwrap(), 0x33);
        assert_eq!(
            audio.reg_read(4),
            Err(CodecError::RegisterOutOfRange { reg: 4, count: 4 })
        );
        assert_eq!(audio.codec_name(), "fake");
        assert_eq!(audio.reg_bits(), 9);
    }
}
