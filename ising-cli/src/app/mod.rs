mod host;
mod report;
mod schedule;

pub use host::{run_host, HostSummary};
pub use schedule::TemperatureSchedule;

use self::report::report_summary;
use crate::config::{Args, Config};
use crate::io::{open_frames, setup_output, TextRenderer};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::fs;
use std::io::Write;
use tracing::info;

pub struct IsingApplication {
    args: Args,
    config: Config,
}

impl IsingApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.log_file.as_ref(), self.args.verbose);
        info!("Configuration loaded:\n{:?}", self.config);

        let summary = if self.config.is_render_enabled() {
            let (up, down) = self.config.render_chars();
            let writer = open_frames(self.config.render.frames.as_ref())?;
            let mut renderer = TextRenderer::new(writer, up, down);
            let summary = run_host(&self.config, Some(&mut renderer))?;
            info!("Rendered {} frames", renderer.frames());
            renderer
                .into_inner()
                .flush()
                .wrap_err("Unable to flush rendered frames")?;
            summary
        } else {
            info!("Rendering disabled");
            run_host(&self.config, None)?
        };

        report_summary(&summary);
        Ok(())
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let config = match &args.config_file {
        Some(path) => {
            let config_content = fs::read_to_string(path)
                .wrap_err_with(|| format!("Unable to read configuration file: {}", path))?;
            serde_yml::from_str::<Config>(&config_content)
                .wrap_err("Failed to parse configuration file")?
        }
        None => Config::default(),
    };

    Ok(config.with_defaults().apply_args(args))
}
