use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::config::BenchConfig;
use crate::contract::{CodecSpec, CommandRunner, EncodeMetrics, EncodeResult, Result, default_codecs};
use crate::report::{self, ResultSet};

/// Size in bytes, or 0 when the file cannot be stat'ed.
#[must_use]
pub fn measure_file_size(path: &Path) -> u64 {
    match fs::metadata(path) {
        Ok(meta) => meta.len(),
        Err(err) => {
            tracing::debug!("stat {} failed: {err}", path.display());
            0
        }
    }
}

/// Runs every configured codec once against a single input file.
pub struct BenchmarkRunner<R> {
    config: BenchConfig,
    codecs: Vec<CodecSpec>,
    commands: R,
    results: ResultSet,
}

impl<R: CommandRunner> BenchmarkRunner<R> {
    #[must_use]
    pub fn new(config: BenchConfig, commands: R) -> Self {
        Self::with_codecs(config, commands, default_codecs())
    }

    #[must_use]
    pub fn with_codecs(config: BenchConfig, commands: R, codecs: Vec<CodecSpec>) -> Self {
        Self {
            config,
            codecs,
            commands,
            results: ResultSet::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    #[must_use]
    pub fn codecs(&self) -> &[CodecSpec] {
        &self.codecs
    }

    #[must_use]
    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    #[must_use]
    pub fn encode_args(&self, codec: &CodecSpec) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-i".to_string(),
            self.config.input.to_string_lossy().into_owned(),
            "-c:v".to_string(),
        ];
        args.extend(codec.args.iter().cloned());
        args.push(
            self.config
                .output_path(&codec.name)
                .to_string_lossy()
                .into_owned(),
        );
        args
    }

    /// Encodes the input with one codec. Failures are returned as data, never as `Err`.
    pub fn encode_one(&self, codec: &CodecSpec) -> EncodeResult {
        let args = self.encode_args(codec);

        let start = Instant::now();
        let outcome = self.commands.run(&self.config.encoder, &args);
        let seconds = start.elapsed().as_secs_f64();

        let output = match outcome {
            Ok(output) => output,
            Err(err) => {
                tracing::warn!("{}: failed to spawn {}: {err}", codec.name, self.config.encoder);
                return EncodeResult::Failure {
                    error: err.to_string(),
                };
            }
        };

        if !output.success {
            tracing::warn!("{}: encoder exited with status {:?}", codec.name, output.code);
            return EncodeResult::Failure {
                error: output.stderr,
            };
        }

        let input_bytes = measure_file_size(&self.config.input);
        let output_bytes = measure_file_size(&self.config.output_path(&codec.name));
        tracing::debug!(
            "{}: input={}B output={}B elapsed={seconds:.3}s",
            codec.name,
            input_bytes,
            output_bytes
        );

        EncodeResult::Success(EncodeMetrics::new(seconds, input_bytes, output_bytes))
    }

    /// Runs all codecs in declared order. A missing input file yields an empty result set.
    pub fn run_all(&mut self) -> &ResultSet {
        if !self.config.input.exists() {
            println!("Input file not found: {}", self.config.input.display());
            return &self.results;
        }

        for codec in &self.codecs {
            println!("Testing {}...", codec.name);
            let result = self.encode_one(codec);

            match &result {
                EncodeResult::Success(metrics) => {
                    tracing::info!("{} finished in {:.3}s", codec.name, metrics.seconds);
                    println!("{}: {}", codec.name, metrics);
                }
                EncodeResult::Failure { .. } => println!("{}: failed", codec.name),
            }

            self.results.insert(codec.name.clone(), result);
        }

        &self.results
    }

    pub fn print_summary(&self) {
        print!("{}", report::render_summary(&self.results));
    }

    pub fn save_results(&self, path: &Path) -> Result<()> {
        report::save_report(&self.results.to_report(), path)?;
        println!("Results saved to {}", path.display());
        Ok(())
    }

    /// Saves to the configured results path (`results.json` by default).
    pub fn save_results_default(&self) -> Result<()> {
        self.save_results(&self.config.results_path)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::path::PathBuf;

    use super::*;
    use crate::contract::CommandOutput;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl CommandRunner for Recorder {
        fn run(&self, _program: &str, args: &[String]) -> io::Result<CommandOutput> {
            self.calls.borrow_mut().push(args.to_vec());
            Ok(CommandOutput {
                success: false,
                code: Some(1),
                stdout: String::new(),
                stderr: "unsupported profile".to_string(),
            })
        }
    }

    #[test]
    fn encode_args_follow_subprocess_contract() {
        let config = BenchConfig {
            output_dir: PathBuf::from("out"),
            ..BenchConfig::new("in.mp4")
        };
        let runner = BenchmarkRunner::with_codecs(
            config,
            Recorder::default(),
            vec![CodecSpec::new("x", ["enc", "-crf", "1"])],
        );
        let expected_output = Path::new("out").join("output_x.mp4");
        assert_eq!(
            runner.encode_args(&runner.codecs()[0]),
            [
                "-y",
                "-i",
                "in.mp4",
                "-c:v",
                "enc",
                "-crf",
                "1",
                &*expected_output.to_string_lossy(),
            ]
        );
    }

    #[test]
    fn failed_encode_keeps_stderr_verbatim() {
        let runner = BenchmarkRunner::new(BenchConfig::default(), Recorder::default());
        let result = runner.encode_one(&runner.codecs()[0]);
        assert_eq!(
            result,
            EncodeResult::Failure {
                error: "unsupported profile".to_string()
            }
        );
    }

    #[test]
    fn missing_file_measures_zero() {
        let size = measure_file_size(Path::new("definitely/not/here"));
        assert_eq!(size, 0);
    }

    #[test]
    fn missing_input_skips_every_codec() {
        let recorder = Recorder::default();
        let mut runner = BenchmarkRunner::new(BenchConfig::new("definitely/not/here.mp4"), &recorder);
        assert!(runner.run_all().is_empty());
        assert!(recorder.calls.borrow().is_empty());
    }
}
