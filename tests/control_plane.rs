//! Audio control and frequency database through the public API.

use std::sync::{Arc, Mutex};

use portatone::{
    audio::{AudioControl, AudioRate, Codec, CodecError, I2sBus, I2sConfig, I2sRegisters, Volume, VolumeRange},
    freqman::{FreqmanDb, FreqmanEntry, FreqmanError, FreqmanLibrary},
};

/// Records every call made on either collaborator, in order.
type Trace = Arc<Mutex<Vec<String>>>;

struct TraceCodec {
    trace: Trace,
    regs: [u32; 8],
}

impl TraceCodec {
    fn log(&self, call: &str) {
        self.trace.lock().unwrap().push(format!("codec {call}"));
    }
}

impl Codec for TraceCodec {
    fn name(&self) -> &str {
        "trace"
    }
    fn init(&mut self) -> Result<(), CodecError> {
        self.log("init");
        Ok(())
    }
    fn reset(&mut self) -> Result<(), CodecError> {
        self.log("reset");
        Ok(())
    }
    fn headphone_enable(&mut self) {
        self.log("hp on");
    }
    fn headphone_disable(&mut self) {
        self.log("hp off");
    }
    fn headphone_gain_range(&self) -> VolumeRange {
        VolumeRange {
            min: Volume::centibel(-735),
            max: Volume::centibel(60),
        }
    }
    fn set_headphone_volume(&mut self, volume: Volume) -> Result<(), CodecError> {
        self.log(&format!("volume {}", volume.centibels()));
        Ok(())
    }
    fn microphone_enable(&mut self) {
        self.log("mic on");
    }
    fn microphone_disable(&mut self) {
        self.log("mic off");
    }
    fn reg_count(&self) -> usize {
        self.regs.len()
    }
    fn reg_bits(&self) -> usize {
        9
    }
    fn reg_read(&mut self, reg: usize) -> Result<u32, CodecError> {
        Ok(self.regs[reg])
    }
}

struct TraceBus {
    trace: Trace,
}

impl TraceBus {
    fn log(&self, call: &str) {
        self.trace.lock().unwrap().push(format!("i2s {call}"));
    }
}

impl I2sBus for TraceBus {
    fn configure(&mut self, regs: &I2sRegisters) {
        self.log(&format!("configure dao={:#06x}", regs.dao));
    }
    fn set_audio_clock_divider(&mut self, divider: u32) {
        self.log(&format!("divider {divider}"));
    }
    fn tx_start(&mut self) {
        self.log("tx start");
    }
    fn tx_stop(&mut self) {
        self.log("tx stop");
    }
    fn tx_mute(&mut self) {
        self.log("tx mute");
    }
    fn tx_unmute(&mut self) {
        self.log("tx unmute");
    }
    fn rx_start(&mut self) {
        self.log("rx start");
    }
    fn rx_stop(&mut self) {
        self.log("rx stop");
    }
}

fn audio() -> (AudioControl<TraceCodec, TraceBus>, Trace) {
    let trace = Trace::default();
    let codec = TraceCodec {
        trace: trace.clone(),
        regs: [0, 1, 2, 3, 4, 5, 6, 0x1ff],
    };
    let bus = TraceBus { trace: trace.clone() };
    (AudioControl::new(codec, bus), trace)
}

#[test]
fn output_lifecycle_call_order() {
    let (mut audio, trace) = audio();
    audio.init().unwrap();
    audio.set_rate(AudioRate::Hz24000);
    audio.output_start();
    audio.set_volume(Volume::decibel(-20)).unwrap();
    audio.shutdown().unwrap();

    assert_eq!(
        *trace.lock().unwrap(),
        vec![
            "codec init",
            "i2s configure dao=0x83c9",
            "i2s divider 15",
            "i2s tx start",
            "i2s tx unmute",
            "codec hp on",
            "codec volume -200",
            "codec reset",
            "i2s tx mute",
            "codec hp off",
            "i2s tx stop",
        ]
    );
}

#[test]
fn rejected_requests_never_reach_the_codec() {
    let (mut audio, trace) = audio();

    assert!(matches!(
        audio.set_volume(Volume::centibel(61)),
        Err(CodecError::VolumeOutOfRange { requested: 61, min: -735, max: 60 })
    ));
    assert!(matches!(
        audio.reg_read(8),
        Err(CodecError::RegisterOutOfRange { reg: 8, count: 8 })
    ));
    assert!(trace.lock().unwrap().is_empty());

    assert_eq!(audio.reg_read(7), Ok(0x1ff));
    assert_eq!(audio.reg_count(), 8);
}

#[test]
fn invalid_i2s_config_fails_before_codec_init() {
    let trace = Trace::default();
    let mut config = I2sConfig::portapack_default();
    config.dma1.rx_depth = 20;
    let mut audio = AudioControl::with_config(
        TraceCodec {
            trace: trace.clone(),
            regs: [0; 8],
        },
        TraceBus { trace: trace.clone() },
        config,
    );

    assert!(matches!(audio.init(), Err(CodecError::I2s(_))));
    assert!(trace.lock().unwrap().is_empty());
}

#[test]
fn freqman_library_round_trip() {
    let mut library = FreqmanLibrary::new();
    assert!(matches!(library.stems(), Err(FreqmanError::NoFiles)));

    library
        .load("airband", "f=118100000,d=Tower\nf=121500000,d=Guard\n".as_bytes())
        .unwrap();
    library.load("marine", "f=156800000,d=Ch16\n".as_bytes()).unwrap();
    assert_eq!(library.stems().unwrap(), vec!["airband", "marine"]);

    let db = library.get_mut("airband").unwrap();
    db.insert(FreqmanEntry::new(119_100_000, "Approach")).unwrap();
    assert!(matches!(
        db.insert(FreqmanEntry::new(121_500_000, "Dup")),
        Err(FreqmanError::Duplicate(121_500_000))
    ));

    let mut saved = Vec::new();
    db.save(&mut saved).unwrap();
    let reloaded = FreqmanDb::load(saved.as_slice()).unwrap();
    let labels: Vec<String> = reloaded.entries.iter().map(|e| e.item_string(20)).collect();
    assert_eq!(labels, vec!["118.1000: Tower", "121.5000: Guard", "119.1000: Approach"]);
}
