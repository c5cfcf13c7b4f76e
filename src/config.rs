use std::path::{Path, PathBuf};

pub const DEFAULT_ENCODER: &str = "ffmpeg";
pub const DEFAULT_INPUT: &str = "input.mp4";
pub const DEFAULT_RESULTS_PATH: &str = "results.json";
pub const DEFAULT_CONTAINER_EXT: &str = "mp4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub encoder: String,
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub container_ext: String,
    pub results_path: PathBuf,
}

impl BenchConfig {
    #[must_use]
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// `<output_dir>/output_<codec>.<ext>`
    #[must_use]
    pub fn output_path(&self, codec_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("output_{codec_name}.{}", self.container_ext))
    }

    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            encoder: DEFAULT_ENCODER.to_string(),
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            container_ext: DEFAULT_CONTAINER_EXT.to_string(),
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_is_derived_from_codec_name() {
        let config = BenchConfig {
            output_dir: PathBuf::from("out"),
            ..BenchConfig::new("clip.mov")
        };
        assert_eq!(config.output_path("av1"), Path::new("out").join("output_av1.mp4"));
        assert_eq!(config.input(), Path::new("clip.mov"));
    }

    #[test]
    fn defaults_match_cli_defaults() {
        let config = BenchConfig::default();
        assert_eq!(config.encoder, "ffmpeg");
        assert_eq!(config.input, PathBuf::from("input.mp4"));
        assert_eq!(config.results_path, PathBuf::from("results.json"));
    }
}
