//! Watch audio firmware entry point
//!
//! 1. Bring up I2C (codec + RTC), I2S TX with MCLK, log UART
//! 2. Initialize the ES8311 and play a start-up beep
//! 3. Loop: poll the alarm against the RTC, drain logs

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::PinDriver;
use esp_idf_svc::hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_svc::hal::i2s::config::{DataBitWidth, StdConfig};
use esp_idf_svc::hal::i2s::{I2sDriver, I2sTx};
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use watch_game_audio::hal::i2s_esp::EspI2sSink;
use watch_game_audio::hal::Pcf85063;
use watch_game_audio::logging::timestamp_us;
use watch_game_audio::uart_logger::{self, UartLoggerConfig};
use watch_game_audio::{
    audio_error, audio_info, AlarmConfig, AlarmTimer, AudioConfig, GameAudio, SoundEffect,
    AUDIO_LOG_STREAM,
};

/// Main loop period
const POLL_MS: u32 = 500;

fn main() -> Result<(), EspError> {
    esp_idf_svc::sys::link_patches();

    let peripherals = Peripherals::take()?;
    let pins = peripherals.pins;

    let mut log_out = uart_logger::init_uart_logger(
        peripherals.uart1,
        pins.gpio17,
        &UartLoggerConfig::default(),
    )?;

    let mut i2c = I2cDriver::new(
        peripherals.i2c0,
        pins.gpio15, // SDA
        pins.gpio14, // SCL
        &I2cConfig::new().baudrate(Hertz(400_000)),
    )?;

    let config = AudioConfig::default();

    // MCLK = 256 x fs
    let i2s_config = StdConfig::philips(config.sample_rate_hz, DataBitWidth::Bits16);
    let i2s = I2sDriver::<I2sTx>::new_std_tx(
        peripherals.i2s0,
        &i2s_config,
        pins.gpio9,        // BCLK
        pins.gpio8,        // DOUT
        Some(pins.gpio16), // MCLK
        pins.gpio45,       // WS
    )?;
    let sink = EspI2sSink::new(i2s)?;

    // Speaker amplifier enable
    let mut pa = PinDriver::output(pins.gpio46)?;
    pa.set_high()?;

    let mut audio = GameAudio::new(sink, FreeRtos, config);
    match audio.initialize_default(&mut i2c) {
        Ok(()) => {
            audio.play_effect(SoundEffect::Beep);
        }
        Err(e) => audio_error!("audio disabled: {}", e),
    }

    let rtc = Pcf85063::new();
    let mut alarm = AlarmTimer::new(AlarmConfig::default());
    alarm.set_alarm(7, 0, true);
    audio_info!("alarm armed for {}", alarm.target());

    loop {
        let now_ms = (timestamp_us() / 1000) as u64;
        alarm.poll(rtc.bind(&mut i2c), now_ms, &mut audio);

        uart_logger::drain_to(&AUDIO_LOG_STREAM, &mut log_out);

        // A ringing tick blocks for a full cycle; anything else sleeps
        if !(alarm.is_ringing() && audio.is_ready()) {
            FreeRtos::delay_ms(POLL_MS);
        }
    }
}
