//! Panel driver setup.
//!
//! The 850C build drives a 320x480 ILI9486 panel, the SW102 build the
//! 240x320 ST7789 of the Pimoroni PIM715 Display Pack 2.8". Both hang off
//! the same SPI0 pins:
//!
//! - DC: GPIO16
//! - CS: GPIO17
//! - CLK: GPIO18 (SPI0 CLK)
//! - MOSI: GPIO19 (SPI0 TX)
//! - Backlight: GPIO20
//! - Reset: Tied to RUN pin (resets with Pico)

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Config as SpiConfig, Spi};
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use mipidsi::interface::SpiInterface;
use mipidsi::options::ColorInversion;
use mipidsi::{Builder, NoResetPin};

#[cfg(not(feature = "sw102"))]
use mipidsi::models::ILI9486Rgb565 as PanelModel;
#[cfg(feature = "sw102")]
use mipidsi::models::ST7789 as PanelModel;

/// Native panel size, portrait.
#[cfg(not(feature = "sw102"))]
const PANEL_SIZE: (u16, u16) = (320, 480);
#[cfg(feature = "sw102")]
const PANEL_SIZE: (u16, u16) = (240, 320);

#[cfg(not(feature = "sw102"))]
const INVERSION: ColorInversion = ColorInversion::Normal;
#[cfg(feature = "sw102")]
const INVERSION: ColorInversion = ColorInversion::Inverted;

/// Bytes the SPI interface batches pixels into.
pub const SPI_BUFFER_LEN: usize = 512;

pub type PanelSpi<'d> = ExclusiveDevice<Spi<'d, SPI0, Blocking>, Output<'d>, NoDelay>;

pub type Panel<'d> = mipidsi::Display<SpiInterface<'d, PanelSpi<'d>, Output<'d>>, PanelModel, NoResetPin>;

/// Initialize the panel, ready for drawing.
pub fn init_panel<'d>(
    spi: Spi<'d, SPI0, Blocking>,
    cs: Output<'d>,
    dc: Output<'d>,
    buffer: &'d mut [u8],
) -> Panel<'d> {
    let spi_device = defmt::unwrap!(ExclusiveDevice::new_no_delay(spi, cs));
    let di = SpiInterface::new(spi_device, dc, buffer);

    let (width, height) = PANEL_SIZE;
    match Builder::new(PanelModel, di)
        .display_size(width, height)
        .invert_colors(INVERSION)
        .init(&mut embassy_time::Delay)
    {
        Ok(panel) => panel,
        Err(_) => defmt::panic!("panel init failed"),
    }
}

/// SPI configuration for the panel.
///
/// 40 MHz is within what both controllers accept for writes.
pub fn display_spi_config() -> SpiConfig {
    let mut config = SpiConfig::default();
    config.frequency = 40_000_000;
    config
}
