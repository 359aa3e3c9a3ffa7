//! Fields and screen layouts of the e-bike display.
//!
//! One set of layouts serves both panels: positions are given in eighths or
//! sixty-fourths of the panel height and fonts come from the profile.

use super::state::BikeState;
use super::warnings::WarningField;
use crate::config::DisplayProfile;
use crate::error::UiError;
use crate::field::{END, Field, FieldId, NumberFormat};
use crate::layout::{AlignX, AlignY, Border, FieldLayout};
use crate::screen::{Screen, ScreenHooks, ScreenId};
use crate::ui::Ui;

/// Version string on the boot and configuration screens.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const UNITS: &[&str] = &["metric", "imperial"];
const OFF_ON: &[&str] = &["off", "on"];

/// Handles of every application field.
#[derive(Clone, Copy, Debug)]
pub struct AppFields {
    pub soc: FieldId,
    pub clock: FieldId,
    pub assist: FieldId,
    pub speed: FieldId,
    pub warning: FieldId,
    pub trip_time: FieldId,
    pub trip_distance: FieldId,
    pub main_slot: FieldId,
    pub graph_slot: FieldId,
    pub info_slots: [FieldId; 2],
    pub boot_status: FieldId,
    pub config_root: FieldId,
    boot_heading: FieldId,
    boot_version: FieldId,
}

/// Handles of the application screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AppScreens {
    pub boot: ScreenId,
    pub main: ScreenId,
    pub info: ScreenId,
    pub config: ScreenId,
}

/// Which application screen a [`ScreenId`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Boot,
    Main,
    Info,
    Config,
}

impl AppScreens {
    pub fn classify(
        &self,
        id: ScreenId,
    ) -> Option<AppScreen> {
        [
            (self.boot, AppScreen::Boot),
            (self.main, AppScreen::Main),
            (self.info, AppScreen::Info),
            (self.config, AppScreen::Config),
        ]
        .into_iter()
        .find_map(|(screen, kind)| (screen == id).then_some(kind))
    }
}

// =============================================================================
// Fields
// =============================================================================

pub(super) fn add_fields<'a>(
    ui: &mut Ui<'a>,
    state: &'a BikeState,
    warning: &'a WarningField,
) -> Result<AppFields, UiError> {
    let small_panel = ui.profile().width < 128;

    // status and main screen
    let soc = ui.add_field(Field::text(""))?;
    let clock = ui.add_field(Field::text(""))?;
    let assist = ui.add_field(Field::readonly_number("assist", &state.assist_level, NumberFormat::new("")))?;
    let speed = ui.add_field(Field::readonly_number(
        "speed",
        &state.speed_x10,
        NumberFormat::new("kph").fixed(1).hide_fraction(),
    ))?;
    let warning = ui.add_field(Field::custom(warning))?;
    let trip_time = ui.add_field(Field::readonly_str("trip time", "0:00"))?;
    let trip_distance = ui.add_field(Field::readonly_number(
        "trip distance",
        &state.trip_x10,
        NumberFormat::new("km").fixed(1),
    ))?;

    // customizable choices, indexes are persisted so only append
    let motor_power = ui.add_field(Field::readonly_number("motor power", &state.motor_power, NumberFormat::new("W")))?;
    let human_power = ui.add_field(Field::readonly_number("human power", &state.human_power, NumberFormat::new("W")))?;
    let odometer = ui.add_field(Field::readonly_number(
        "odometer",
        &state.odometer_x10,
        NumberFormat::new("km").fixed(1),
    ))?;
    let motor_temp = ui.add_field(Field::readonly_number("motor temp", &state.motor_temp, NumberFormat::new("C")))?;
    let battery = ui.add_field(Field::readonly_number(
        "battery",
        &state.battery_voltage_x10,
        NumberFormat::new("V").fixed(1),
    ))?;
    let cadence = ui.add_field(Field::readonly_number("cadence", &state.cadence, NumberFormat::new("rpm")))?;
    let max_speed = ui.add_field(Field::readonly_number(
        "max speed",
        &state.max_speed_x10,
        NumberFormat::new("kph").fixed(1),
    ))?;
    let ride_distance = ui.add_field(Field::readonly_number(
        "ride distance",
        &state.distance_since_power_on_x10,
        NumberFormat::new("km").fixed(1),
    ))?;
    // trip time and distance already sit in the foot bar
    let choices = [
        motor_power,
        human_power,
        odometer,
        motor_temp,
        battery,
        cadence,
        ride_distance,
        max_speed,
    ];
    let main_slot = ui.add_field(Field::customizable(&state.selectors[3], &choices)?)?;
    let info_slots = [
        ui.add_field(Field::customizable(&state.selectors[1], &choices)?)?,
        ui.add_field(Field::customizable(&state.selectors[2], &choices)?)?,
    ];

    let graphs = [
        ui.add_field(Field::graph(speed, None, Some(300), 0))?,
        ui.add_field(Field::graph(motor_power, Some(350), Some(450), 0))?,
        ui.add_field(Field::graph(motor_temp, Some(75), Some(85), 20))?,
    ];
    let graph_slot = ui.add_field(Field::customizable(&state.selectors[0], &graphs)?)?;

    // boot
    let heading = if small_panel { "OS-EBike" } else { "OpenSource EBike" };
    let boot_heading = ui.add_field(Field::text_ptr(heading))?;
    let boot_version = ui.add_field(Field::text_ptr(VERSION))?;
    let boot_status = ui.add_field(Field::text("Booting..."))?;

    let config_root = add_config_menus(ui, state)?;

    Ok(AppFields {
        soc,
        clock,
        assist,
        speed,
        warning,
        trip_time,
        trip_distance,
        main_slot,
        graph_slot,
        info_slots,
        boot_status,
        config_root,
        boot_heading,
        boot_version,
    })
}

fn add_config_menus<'a>(
    ui: &mut Ui<'a>,
    state: &'a BikeState,
) -> Result<FieldId, UiError> {
    let max_current = ui.add_field(Field::number(
        "max current",
        &state.battery_max_current,
        NumberFormat::new("A").range(1, 20),
    ))?;
    let cutoff = ui.add_field(Field::number(
        "cut-off voltage",
        &state.battery_cutoff_x10,
        NumberFormat::new("V").fixed(1).range(290, 630),
    ))?;
    let battery = ui.add_field(Field::scrollable("Battery", &[max_current, cutoff, END])?)?;

    let assist_levels = ui.add_field(Field::number(
        "assist levels",
        &state.assist_levels,
        NumberFormat::new("").range(1, 9),
    ))?;
    let walk_assist = ui.add_field(Field::choice("walk assist", &state.walk_assist_enabled, OFF_ON))?;
    let temp_warn = ui.add_field(Field::number(
        "temp warning",
        &state.temp_warn,
        NumberFormat::new("C").range(30, 110),
    ))?;
    let temp_max = ui.add_field(Field::number(
        "temp shutdown",
        &state.temp_max,
        NumberFormat::new("C").range(30, 120),
    ))?;
    let motor = ui.add_field(Field::scrollable("Motor", &[assist_levels, walk_assist, temp_warn, temp_max])?)?;

    let perimeter = ui.add_field(Field::number(
        "perimeter",
        &state.wheel_perimeter_mm,
        NumberFormat::new("mm").range(750, 3000).step(10),
    ))?;
    let wheel = ui.add_field(Field::scrollable("Wheel", &[perimeter])?)?;

    let units = ui.add_field(Field::choice("units", &state.units_type, UNITS))?;
    let display = ui.add_field(Field::scrollable("Display", &[units])?)?;

    let odometer = ui.add_field(Field::number(
        "odometer",
        &state.odometer_x10,
        NumberFormat::new("km").fixed(1),
    ))?;
    let version = ui.add_field(Field::readonly_str("firmware", VERSION))?;
    let various = ui.add_field(Field::scrollable("Various", &[odometer, version])?)?;

    ui.add_field(Field::scrollable("Configurations", &[battery, motor, wheel, display, various])?)
}

// =============================================================================
// Screens
// =============================================================================

pub(super) fn add_screens<'a>(
    ui: &mut Ui<'a>,
    f: &AppFields,
    hooks: &'a dyn ScreenHooks<'a>,
) -> Result<AppScreens, UiError> {
    let p = ui.profile();
    let boot = ui.add_screen(Screen::new(&boot_layouts(p, f))?.with_hooks(hooks))?;
    let main = ui.add_screen(Screen::new(&main_layouts(p, f))?.with_hooks(hooks))?;
    let info = ui.add_screen(Screen::new(&info_layouts(p, f))?.with_hooks(hooks))?;
    let config = ui.add_screen(Screen::new(&[FieldLayout::new(f.config_root)])?.with_hooks(hooks))?;
    Ok(AppScreens {
        boot,
        main,
        info,
        config,
    })
}

fn boot_layouts(
    p: &DisplayProfile,
    f: &AppFields,
) -> [FieldLayout; 3] {
    [
        FieldLayout::new(f.boot_heading)
            .at(0, p.y_by_eighths(1))
            .size(0, -1)
            .font(p.fonts.regular),
        FieldLayout::new(f.boot_version).at(0, -8).size(0, -1).font(p.fonts.small),
        FieldLayout::new(f.boot_status)
            .at(0, p.y_by_eighths(6))
            .size(0, -1)
            .font(p.fonts.small),
    ]
}

/// Battery and clock along the top edge.
fn status_bar(
    p: &DisplayProfile,
    f: &AppFields,
) -> [FieldLayout; 2] {
    let half = p.width / 2;
    [
        FieldLayout::new(f.soc)
            .at(0, 0)
            .size(half, -1)
            .font(p.fonts.small)
            .align(AlignX::Left, AlignY::Top),
        FieldLayout::new(f.clock)
            .at(half, 0)
            .size(0, -1)
            .font(p.fonts.small)
            .align(AlignX::Right, AlignY::Top),
    ]
}

/// Warning line and trip counters along the bottom edge.
fn foot_bar(
    p: &DisplayProfile,
    f: &AppFields,
) -> [FieldLayout; 3] {
    let half = p.width / 2;
    [
        FieldLayout::new(f.warning)
            .at(0, p.y_by_64(51))
            .size(0, -1)
            .font(p.fonts.regular),
        FieldLayout::new(f.trip_time)
            .at(0, p.y_by_64(58))
            .size(half, -1)
            .font(p.fonts.small)
            .hide_label(),
        FieldLayout::new(f.trip_distance)
            .at(half, p.y_by_64(58))
            .size(0, -1)
            .font(p.fonts.small)
            .hide_label(),
    ]
}

fn main_layouts(
    p: &DisplayProfile,
    f: &AppFields,
) -> [FieldLayout; 8] {
    let [soc, clock] = status_bar(p, f);
    let [warning, trip_time, trip_distance] = foot_bar(p, f);
    [
        soc,
        clock,
        FieldLayout::new(f.speed)
            .at(0, p.y_by_eighths(1))
            .size(0, -1)
            .font(p.fonts.big)
            .hide_label()
            .border(Border::BOTTOM),
        FieldLayout::new(f.assist)
            .at(0, -3)
            .size(0, -1)
            .font(p.fonts.big)
            .hide_label()
            .border(Border::BOTTOM),
        FieldLayout::new(f.main_slot)
            .at(0, -3)
            .size(0, -1)
            .font(p.fonts.regular)
            .label_align(AlignX::Left, AlignY::Top),
        warning,
        trip_time,
        trip_distance,
    ]
}

fn info_layouts(
    p: &DisplayProfile,
    f: &AppFields,
) -> [FieldLayout; 8] {
    let [soc, clock] = status_bar(p, f);
    let [warning, trip_time, trip_distance] = foot_bar(p, f);
    let [slot1, slot2] = f.info_slots;
    [
        soc,
        clock,
        FieldLayout::new(f.graph_slot)
            .at(0, p.y_by_eighths(1))
            .size(0, p.y_by_eighths(2)),
        FieldLayout::new(slot1)
            .at(0, -3)
            .size(0, -1)
            .font(p.fonts.value)
            .label_align(AlignX::Center, AlignY::Top)
            .border(Border::TOP | Border::BOTTOM),
        FieldLayout::new(slot2)
            .at(0, -3)
            .size(0, -1)
            .font(p.fonts.value)
            .label_align(AlignX::Center, AlignY::Top)
            .border(Border::BOTTOM),
        warning,
        trip_time,
        trip_distance,
    ]
}
