use std::process::ExitCode;

use volsample_engine::device::GpuInit;
use volsample_engine::logging::{init_logging, LoggingConfig};
use volsample_engine::window::{Runtime, RuntimeConfig};

mod demo;

use demo::VolumeDemo;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    println!();
    println!("  volsample: 3D texture sampling demo");
    println!("  Esc or close the window to quit.");
    println!();

    match Runtime::run(RuntimeConfig::default(), GpuInit::default(), VolumeDemo::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("volsample terminated: {e:#}");
            ExitCode::FAILURE
        }
    }
}
