mod config;
mod contract;
mod process;
mod report;
mod runner;

pub use config::{
    BenchConfig, DEFAULT_CONTAINER_EXT, DEFAULT_ENCODER, DEFAULT_INPUT, DEFAULT_RESULTS_PATH,
};
pub use contract::{
    BenchError, Codec, CodecSpec, CommandOutput, CommandRunner, EncodeMetrics, EncodeResult,
    Result, bytes_to_mb, compression_ratio, default_codecs,
};
pub use process::{SystemCommandRunner, probe_encoder};
pub use report::{
    Leaders, Report, ReportEntry, ResultSet, leaders, load_report, render_summary, save_report,
    write_summary,
};
pub use runner::{BenchmarkRunner, measure_file_size};
