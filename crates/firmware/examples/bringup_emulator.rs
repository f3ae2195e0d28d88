//! Badge Bring-up Emulator
//!
//! Runs the full bring-up and demo render against the simulated board, with
//! driver failures injected from the command line.
//!
//! Run with: cargo run --example bringup_emulator --features emulator
//!
//! ```text
//! --fail spi-initialize            fatal: aborts at "SPI bus"
//! --no-card                        tolerated: storage absent
//! --store version-mismatch         store erased and reopened once
//! --store no-free-pages --store no-free-pages   recovery fails
//! --tolerate haptic --fail haptic-init          haptic absent
//! ```

#![allow(clippy::print_stdout, clippy::use_debug)] // desktop tool

use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use firmware::bringup::{DeviceStep, Fatality};
use firmware::{BringupConfig, GraphicsSurface, TriColor};
use platform::mocks::{Call, FaultPoint, SimBoard};
use platform::{config, DriverError, StoreOpenError};

#[derive(Parser)]
#[command(name = "bringup_emulator")]
#[command(about = "Run badge bring-up against a simulated board", long_about = None)]
struct Cli {
    /// Make a driver call fail (repeatable), e.g. `spi-initialize`
    #[arg(long, value_parser = parse_fault)]
    fail: Vec<FaultPoint>,

    /// Script one config store open result (repeatable)
    #[arg(long, value_enum)]
    store: Vec<StoreCondition>,

    /// Leave the SD slot empty
    #[arg(long)]
    no_card: bool,

    /// Treat a device failure as non-fatal (repeatable)
    #[arg(long, value_enum)]
    tolerate: Vec<Device>,

    /// Treat a missing SD card as fatal
    #[arg(long)]
    require_card: bool,

    /// Print the rendered frame as ASCII art
    #[arg(long)]
    ascii: bool,

    /// Print every driver call the board saw
    #[arg(long)]
    calls: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum StoreCondition {
    NoFreePages,
    VersionMismatch,
    Broken,
}

impl From<StoreCondition> for StoreOpenError {
    fn from(condition: StoreCondition) -> Self {
        match condition {
            StoreCondition::NoFreePages => Self::NoFreePages,
            StoreCondition::VersionMismatch => Self::VersionMismatch,
            StoreCondition::Broken => Self::Other(DriverError::Fail),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Device {
    Display,
    Haptic,
    Storage,
    AudioEmulator,
}

impl From<Device> for DeviceStep {
    fn from(device: Device) -> Self {
        match device {
            Device::Display => Self::Display,
            Device::Haptic => Self::Haptic,
            Device::Storage => Self::Storage,
            Device::AudioEmulator => Self::AudioEmulator,
        }
    }
}

fn parse_fault(name: &str) -> Result<FaultPoint, String> {
    FaultPoint::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = FaultPoint::ALL.iter().map(|p| p.name()).collect();
        format!("unknown fault point `{name}` (expected one of: {})", known.join(", "))
    })
}

fn board_from(cli: &Cli) -> SimBoard {
    let mut board = SimBoard::new()
        .with_store_open_results(cli.store.iter().map(|c| Err(StoreOpenError::from(*c))));
    for point in &cli.fail {
        board = board.with_fault(*point, DriverError::Fail);
    }
    if cli.no_card {
        board = board.without_card();
    }
    board
}

fn config_from(cli: &Cli) -> BringupConfig {
    let mut policy = BringupConfig::badge().policy;
    if cli.require_card {
        policy = policy.with(DeviceStep::Storage, Fatality::Fatal);
    }
    for device in &cli.tolerate {
        policy = policy.with((*device).into(), Fatality::Tolerable);
    }
    BringupConfig::badge().with_policy(policy)
}

fn print_ascii(surface: &GraphicsSurface) {
    use embedded_graphics::prelude::*;

    // Every other column and row: 76 × 76 characters.
    for y in (0..152).step_by(2) {
        let line: String = (0..152)
            .step_by(2)
            .map(|x| match surface.pixel(Point::new(x, y)) {
                Some(TriColor::White) | None => ' ',
                Some(TriColor::Red) => '+',
                Some(TriColor::Black) => '#',
            })
            .collect();
        println!("{}", line.trim_end());
    }
}

fn print_calls(calls: &[Call]) {
    println!("\nDriver calls:");
    for (i, call) in calls.iter().enumerate() {
        println!("  {i:>2}  {call:?}");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "firmware=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    println!("{} v{}\n", config::emulator_banner(), config::APP_VERSION);

    let mut board = board_from(&cli);
    let bringup_config = config_from(&cli);
    let result = firmware::start(&mut board, &bringup_config);

    if cli.calls {
        print_calls(board.calls());
    }

    let ctx = result?;

    println!();
    if ctx.is_pristine() {
        println!("Bring-up complete, no degradations");
    } else {
        println!("Bring-up complete with degradations:");
        for degradation in ctx.degradations() {
            println!("  - {degradation:?}");
        }
    }
    match ctx.card_info() {
        Some(info) => println!(
            "SD card {} ({} MiB) at {}",
            info.name,
            info.capacity_mib(),
            info.mount_point
        ),
        None => println!("No SD card"),
    }
    println!("Frames written: {}", board.frames().len());

    if cli.ascii {
        println!();
        print_ascii(&ctx.graphics);
    }

    Ok(())
}
