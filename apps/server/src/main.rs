use agrisk::domain::config::{DashboardConfig, LogRotation};
use agrisk::kernel::config::{CONFIG_PATH_ENV, load_config};
use agrisk_logger::{Logger, Rotation, parse_level};
use agrisk_server::Server;
use anyhow::Context;

#[agrisk_runtime::main(single_threaded)]
async fn main() -> anyhow::Result<()> {
    // `AGRISK_CONFIG` must point at an existing file; `dashboard.toml` is optional.
    let cfg: DashboardConfig = load_config(std::env::var_os(CONFIG_PATH_ENV))
        .context("Critical: Configuration is malformed")?;

    let _log = init_logger(&cfg)?;

    Server::builder().config(cfg).build()?.run().await
}

fn init_logger(cfg: &DashboardConfig) -> anyhow::Result<Logger> {
    let logging = &cfg.logging;
    let mut builder =
        Logger::builder().name(env!("CARGO_PKG_NAME")).level(parse_level(&logging.level)?);
    if let Some(directives) = &logging.filter {
        builder = builder.directives(directives.as_str());
    }

    let logger = match &logging.directory {
        Some(directory) => builder
            .path(directory.clone())
            .rotation(rotation(logging.rotation))
            .max_files(logging.max_files)
            .json(logging.json)
            .init()?,
        None => builder.init()?,
    };
    Ok(logger)
}

const fn rotation(rotation: LogRotation) -> Rotation {
    match rotation {
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    }
}
