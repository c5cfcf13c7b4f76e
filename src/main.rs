use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use codec_bench::{
    BenchConfig, BenchmarkRunner, DEFAULT_CONTAINER_EXT, SystemCommandRunner, probe_encoder,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(about = "Compare ffmpeg codecs by encode time and output size")]
struct Args {
    #[arg(default_value = "input.mp4")]
    input: PathBuf,
    #[arg(long, default_value_t = false)]
    save: bool,
    #[arg(long, default_value = "results.json")]
    results: PathBuf,
    #[arg(long, env = "CODEC_BENCH_FFMPEG", default_value = "ffmpeg")]
    ffmpeg: String,
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

impl Args {
    fn into_config(self) -> BenchConfig {
        BenchConfig {
            encoder: self.ffmpeg,
            input: self.input,
            output_dir: self.output_dir,
            container_ext: DEFAULT_CONTAINER_EXT.to_string(),
            results_path: self.results,
        }
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let save = args.save;
    let config = args.into_config();

    if let Err(err) = probe_encoder(&SystemCommandRunner, &config.encoder) {
        tracing::error!("{err}");
        println!("FFmpeg not found");
        return Ok(ExitCode::FAILURE);
    }

    let mut runner = BenchmarkRunner::new(config, SystemCommandRunner);
    runner.run_all();
    runner.print_summary();

    if save {
        runner
            .save_results_default()
            .context("failed to save benchmark results")?;
    }

    Ok(ExitCode::SUCCESS)
}
