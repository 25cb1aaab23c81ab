//! Draws graphical stuff on a 128x64 SH1106 OLED module over I2C
//! This example is for the Raspberry Pico with the rp2040 chip
//!
//! Pin layout and connection for this example
//!
//! display | Pico pin |  Pico function       | purpose
//!  1 GND     pin 8      GND                   Ground
//!  2 VCC     pin 36     3V3(OUT)              Power to the module
//!  3 SCL     pin 7      GP5 (gpio5)           I2C0 clock, up to 400kHz
//!  4 SDA     pin 6      GP4 (gpio4)           I2C0 data
//!
//! Most modules sold as "1.3 inch OLED" use the SH1106 and answer on address 0x3C.
//! Their 128 pixels are wired from DDRAM column 2, hence the column offset.

#![deny(unsafe_code)]
#![deny(warnings)]
#![no_std]
#![no_main]

use panic_halt as _;                        // well. halt on panic..
use defmt_rtt as _;                         // defmt logging over RTT
use cortex_m_rt::entry;                     // the macro for our startup function
use embedded_time::rate::*;                 // Embed the `kHz` function/trait
use embedded_time::fixed_point::FixedPoint; // for .integer() on the clock frequency
use rp_pico as bsp;                         // Provide an alias for our BSP so we can switch targets quickly.
use bsp::hal::{
    pac,                                    // Peripheral Access Crate; low-level registers
    sio::Sio,                               // the SIO manages al the pins and their modes
    watchdog::Watchdog,                     // we need to regularly call the watchdog or it shuts down our Pico
    I2C,
};

use embedded_graphics::{
    mono_font::{ascii::FONT_6X9, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Circle, PrimitiveStyle},
    text::Text,
};

use sh1106::{Color, DisplaySize, Sh1106, Sh1106I2cBackend};

const BALLSIZE: u32 = 12;

#[entry]
fn main() -> ! {

    // basic Raspberry Pico boiler plate setup stuff
    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    let clocks = bsp::hal::clocks::init_clocks_and_plls(
        bsp::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let sio = Sio::new(pac.SIO);
    let pins = bsp::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let sda = pins.gpio4.into_mode::<bsp::hal::gpio::FunctionI2C>();
    let scl = pins.gpio5.into_mode::<bsp::hal::gpio::FunctionI2C>();
    let i2c = I2C::i2c0(
        pac.I2C0,
        sda,
        scl,
        400.kHz(),
        &mut pac.RESETS,
        clocks.peripheral_clock,
    );

    let mut delay = cortex_m::delay::Delay::new(core.SYST, clocks.system_clock.freq().integer());

    // Setting up the OLED display
    let backend = Sh1106I2cBackend::new(i2c);
    let mut oled = Sh1106::new(backend, DisplaySize::Display128x64).with_column_offset(2);
    oled.init().unwrap();

    let text_style = MonoTextStyle::new(&FONT_6X9, BinaryColor::On);
    let ball_style = PrimitiveStyle::with_fill(BinaryColor::On);

    let mut x: i32 = 0;
    let mut step: i32 = 2;
    let mut inverted = false;

    loop {
        oled.fill(Color::Black);
        Text::new("SH1106 says hi", Point::new(0, 8), text_style)
            .draw(&mut oled)
            .unwrap();
        Circle::new(Point::new(x, 40), BALLSIZE)
            .into_styled(ball_style)
            .draw(&mut oled)
            .unwrap();

        // a single pixel marks the corner, no embedded_graphics needed
        oled.draw_pixel(127, 63, Color::White).unwrap();

        if let Err(e) = oled.update() {
            defmt::error!("update failed: {}", e);
        }

        x += step;
        if x <= 0 || x >= (128 - BALLSIZE) as i32 {
            step = -step;
            inverted = !inverted;
            oled.set_inverted(inverted).unwrap();
        }
        delay.delay_ms(20);
    }
}

// End of file
