//! I2S0 peripheral configuration.
//!
//! The settings are plain value objects. They become register words only in
//! [`I2sConfig::registers`], which is what an [`I2sBus`] writes.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum I2sError {
    #[error("ws_halfperiod {0} exceeds 0x1ff")]
    HalfPeriod(u16),

    #[error("bit rate divider {0} exceeds 63")]
    BitRate(u8),

    #[error("DMA depth {0} exceeds 15")]
    DmaDepth(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordWidth {
    Bits8 = 0,
    Bits16 = 1,
    Bits32 = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSelect {
    FractionalDivider = 0,
    BaseAudioClkOrExternalMclk = 1,
    OtherMclk = 2,
}

/// Transmit (digital audio output) control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaoConfig {
    pub word_width: WordWidth,
    pub mono: bool,
    pub stop: bool,
    pub reset: bool,
    /// Word select is driven by this peripheral when false.
    pub ws_slave: bool,
    pub ws_halfperiod: u16,
    pub mute: bool,
}

/// Receive (digital audio input) control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaiConfig {
    pub word_width: WordWidth,
    pub mono: bool,
    pub stop: bool,
    pub reset: bool,
    pub ws_slave: bool,
    pub ws_halfperiod: u16,
}

fn control_word(
    word_width: WordWidth,
    mono: bool,
    stop: bool,
    reset: bool,
    ws_slave: bool,
    ws_halfperiod: u16,
) -> Result<u32, I2sError> {
    if ws_halfperiod > 0x1ff {
        return Err(I2sError::HalfPeriod(ws_halfperiod));
    }
    Ok((word_width as u32)
        | (mono as u32) << 2
        | (stop as u32) << 3
        | (reset as u32) << 4
        | (ws_slave as u32) << 5
        | (ws_halfperiod as u32) << 6)
}

impl DaoConfig {
    pub fn register(&self) -> Result<u32, I2sError> {
        let word = control_word(
            self.word_width,
            self.mono,
            self.stop,
            self.reset,
            self.ws_slave,
            self.ws_halfperiod,
        )?;
        Ok(word | (self.mute as u32) << 15)
    }
}

impl DaiConfig {
    pub fn register(&self) -> Result<u32, I2sError> {
        control_word(
            self.word_width,
            self.mono,
            self.stop,
            self.reset,
            self.ws_slave,
            self.ws_halfperiod,
        )
    }
}

/// Fractional MCLK divider, `x / y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct McLkRate {
    pub x_divider: u8,
    pub y_divider: u8,
}

impl McLkRate {
    pub fn register(&self) -> u32 {
        (self.x_divider as u32) << 8 | self.y_divider as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRate(pub u8);

impl BitRate {
    pub fn register(&self) -> Result<u32, I2sError> {
        if self.0 > 63 {
            return Err(I2sError::BitRate(self.0));
        }
        Ok(self.0 as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeConfig {
    pub clksel: ClockSelect,
    pub four_pin: bool,
    pub mclk_out_en: bool,
}

impl ModeConfig {
    pub fn register(&self) -> u32 {
        (self.clksel as u32) | (self.four_pin as u32) << 2 | (self.mclk_out_en as u32) << 3
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DmaConfig {
    pub rx_enable: bool,
    pub tx_enable: bool,
    pub rx_depth: u8,
    pub tx_depth: u8,
}

impl DmaConfig {
    pub fn register(&self) -> Result<u32, I2sError> {
        for depth in [self.rx_depth, self.tx_depth] {
            if depth > 15 {
                return Err(I2sError::DmaDepth(depth));
            }
        }
        Ok((self.rx_enable as u32)
            | (self.tx_enable as u32) << 1
            | (self.rx_depth as u32) << 8
            | (self.tx_depth as u32) << 16)
    }
}

/// Complete I2S0 setup: transmit and receive sides plus both DMA channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2sConfig {
    pub dao: DaoConfig,
    pub tx_rate: McLkRate,
    pub tx_bitrate: BitRate,
    pub tx_mode: ModeConfig,
    pub dai: DaiConfig,
    pub rx_rate: McLkRate,
    pub rx_bitrate: BitRate,
    pub rx_mode: ModeConfig,
    pub dma1: DmaConfig,
    pub dma2: DmaConfig,
}

/// Register words in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2sRegisters {
    pub dao: u32,
    pub dai: u32,
    pub txrate: u32,
    pub rxrate: u32,
    pub txbitrate: u32,
    pub rxbitrate: u32,
    pub txmode: u32,
    pub rxmode: u32,
    pub dma1: u32,
    pub dma2: u32,
}

impl I2sConfig {
    /// 16-bit stereo, master on both sides, output and input DMA at depth 4.
    /// Both directions start stopped; output also starts muted.
    pub fn portapack_default() -> Self {
        Self {
            dao: DaoConfig {
                word_width: WordWidth::Bits16,
                mono: false,
                stop: true,
                reset: false,
                ws_slave: false,
                ws_halfperiod: 0x0f,
                mute: true,
            },
            tx_rate: McLkRate::default(),
            tx_bitrate: BitRate(7),
            tx_mode: ModeConfig {
                clksel: ClockSelect::BaseAudioClkOrExternalMclk,
                four_pin: false,
                mclk_out_en: true,
            },
            dai: DaiConfig {
                word_width: WordWidth::Bits16,
                mono: false,
                stop: true,
                reset: false,
                ws_slave: false,
                ws_halfperiod: 0x0f,
            },
            rx_rate: McLkRate::default(),
            rx_bitrate: BitRate(7),
            rx_mode: ModeConfig {
                clksel: ClockSelect::BaseAudioClkOrExternalMclk,
                four_pin: true,
                mclk_out_en: false,
            },
            dma1: DmaConfig {
                rx_enable: true,
                rx_depth: 4,
                ..DmaConfig::default()
            },
            dma2: DmaConfig {
                tx_enable: true,
                tx_depth: 4,
                ..DmaConfig::default()
            },
        }
    }

    pub fn registers(&self) -> Result<I2sRegisters, I2sError> {
        Ok(I2sRegisters {
            dao: self.dao.register()?,
            dai: self.dai.register()?,
            txrate: self.tx_rate.register(),
            rxrate: self.rx_rate.register(),
            txbitrate: self.tx_bitrate.register()?,
            rxbitrate: self.rx_bitrate.register()?,
            txmode: self.tx_mode.register(),
            rxmode: self.rx_mode.register(),
            dma1: self.dma1.register()?,
            dma2: self.dma2.register()?,
        })
    }
}

/// Audio base clock divider selecting the codec sample rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioRate {
    Hz12000 = 31,
    Hz24000 = 15,
    Hz48000 = 7,
}

impl AudioRate {
    pub fn divider(self) -> u32 {
        self as u32
    }
}

/// The I2S0 peripheral plus the audio clock it runs from.
pub trait I2sBus: Send {
    fn configure(&mut self, regs: &I2sRegisters);
    fn set_audio_clock_divider(&mut self, divider: u32);

    fn tx_start(&mut self);
    fn tx_stop(&mut self);
    fn tx_mute(&mut self);
    fn tx_unmute(&mut self);

    fn rx_start(&mut self);
    fn rx_stop(&mut self);
}
