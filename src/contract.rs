use std::io;
use std::path::PathBuf;
use std::{fmt, fmt::Display};

/// Built-in encoder configurations, in the order they are benchmarked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    H264,
    H265,
    Av1,
}

impl Codec {
    pub const ALL: [Codec; 3] = [Codec::H264, Codec::H265, Codec::Av1];

    #[must_use]
    pub fn as_cli(self) -> &'static str {
        match self {
            Self::H264 => "h264",
            Self::H265 => "h265",
            Self::Av1 => "av1",
        }
    }

    /// Arguments placed after `-c:v`: the ffmpeg encoder name followed by its tuning flags.
    #[must_use]
    pub fn ffmpeg_encode_args(self) -> &'static [&'static str] {
        match self {
            Self::H264 => &["libx264", "-preset", "medium", "-crf", "23"],
            Self::H265 => &["libx265", "-preset", "medium", "-crf", "28"],
            Self::Av1 => &["libaom-av1", "-cpu-used", "4", "-crf", "30", "-b:v", "0"],
        }
    }
}

impl Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cli())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecSpec {
    pub name: String,
    pub args: Vec<String>,
}

impl CodecSpec {
    #[must_use]
    pub fn new<N, I, A>(name: N, args: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Codec> for CodecSpec {
    fn from(codec: Codec) -> Self {
        Self::new(codec.as_cli(), codec.ffmpeg_encode_args().iter().copied())
    }
}

impl Display for CodecSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodecSpec(name={}, args=[{}])", self.name, self.args.join(" "))
    }
}

/// The fixed codec table used when no explicit list is given.
#[must_use]
pub fn default_codecs() -> Vec<CodecSpec> {
    Codec::ALL.into_iter().map(CodecSpec::from).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeMetrics {
    pub seconds: f64,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub ratio: f64,
}

impl EncodeMetrics {
    #[must_use]
    pub fn new(seconds: f64, input_bytes: u64, output_bytes: u64) -> Self {
        Self {
            seconds,
            input_bytes,
            output_bytes,
            ratio: compression_ratio(input_bytes, output_bytes),
        }
    }

    #[must_use]
    pub fn input_mb(&self) -> f64 {
        bytes_to_mb(self.input_bytes)
    }

    #[must_use]
    pub fn output_mb(&self) -> f64 {
        bytes_to_mb(self.output_bytes)
    }
}

impl Display for EncodeMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}s, {:.1}MB, {:.2}x compression",
            self.seconds,
            self.output_mb(),
            self.ratio
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EncodeResult {
    Success(EncodeMetrics),
    Failure { error: String },
}

impl EncodeResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub fn metrics(&self) -> Option<&EncodeMetrics> {
        match self {
            Self::Success(metrics) => Some(metrics),
            Self::Failure { .. } => None,
        }
    }
}

/// Input size over output size; 0 when either side is empty.
#[must_use]
pub fn compression_ratio(input_bytes: u64, output_bytes: u64) -> f64 {
    if input_bytes == 0 || output_bytes == 0 {
        return 0.0;
    }
    input_bytes as f64 / output_bytes as f64
}

#[must_use]
pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Captured result of one finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CommandOutput(success={}, code={:?}, stdout_len={}, stderr_len={})",
            self.success,
            self.code,
            self.stdout.len(),
            self.stderr.len()
        )
    }
}

/// Runs an external program to completion and captures its streams.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CommandOutput> {
        (**self).run(program, args)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("encoder unavailable: {program}: {reason}")]
    EncoderUnavailable { program: String, reason: String },
    #[error("failed to write report: {path}")]
    WriteReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read report: {path}")]
    ReadReport {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("report serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;
