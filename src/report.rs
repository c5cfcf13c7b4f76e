use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::contract::{BenchError, EncodeMetrics, EncodeResult, Result};

/// Per-codec outcomes in declared codec order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    entries: Vec<(String, EncodeResult)>,
}

impl ResultSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces an existing entry in place, otherwise appends.
    pub fn insert(&mut self, name: impl Into<String>, result: EncodeResult) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = result,
            None => self.entries.push((name, result)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EncodeResult> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, result)| result)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &EncodeResult)> {
        self.entries
            .iter()
            .map(|(name, result)| (name.as_str(), result))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn successes(&self) -> impl Iterator<Item = (&str, &EncodeMetrics)> {
        self.iter()
            .filter_map(|(name, result)| result.metrics().map(|metrics| (name, metrics)))
    }

    #[must_use]
    pub fn to_report(&self) -> Report {
        Report {
            entries: self
                .iter()
                .map(|(name, result)| (name.to_string(), ReportEntry::from(result)))
                .collect(),
        }
    }
}

/// One codec in the persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_mb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_mb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&EncodeResult> for ReportEntry {
    fn from(result: &EncodeResult) -> Self {
        match result {
            EncodeResult::Success(metrics) => Self {
                time: Some(metrics.seconds),
                input_mb: Some(metrics.input_mb()),
                output_mb: Some(metrics.output_mb()),
                ratio: Some(metrics.ratio),
                success: true,
                error: None,
            },
            EncodeResult::Failure { error } => Self {
                time: None,
                input_mb: None,
                output_mb: None,
                ratio: None,
                success: false,
                error: Some(error.clone()),
            },
        }
    }
}

/// Persisted form of a [`ResultSet`]: a JSON object keyed by codec name, key order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: Vec<(String, ReportEntry)>,
}

impl Report {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ReportEntry> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, entry)| entry)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Report {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ReportVisitor;

        impl<'de> Visitor<'de> for ReportVisitor {
            type Value = Report;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of codec name to encode result")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Report, A::Error> {
                let mut entries: Vec<(String, ReportEntry)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, entry)) = access.next_entry::<String, ReportEntry>()? {
                    match entries.iter_mut().find(|(key, _)| *key == name) {
                        Some((_, slot)) => *slot = entry,
                        None => entries.push((name, entry)),
                    }
                }
                Ok(Report { entries })
            }
        }

        deserializer.deserialize_map(ReportVisitor)
    }
}

/// Writes `report` as two-space indented JSON, replacing any existing file.
pub fn save_report(report: &Report, path: &Path) -> Result<()> {
    let json = report.to_json_pretty()?;
    fs::write(path, json).map_err(|source| BenchError::WriteReport {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_report(path: &Path) -> Result<Report> {
    let text = fs::read_to_string(path).map_err(|source| BenchError::ReadReport {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leaders<'a> {
    pub fastest: &'a str,
    pub smallest: &'a str,
    pub best_compression: &'a str,
}

/// Picks the fastest, smallest and best-compressing successful codecs.
/// Ties go to the codec declared first.
#[must_use]
pub fn leaders(results: &ResultSet) -> Option<Leaders<'_>> {
    Some(Leaders {
        fastest: first_best(results, |a, b| a.seconds < b.seconds)?,
        smallest: first_best(results, |a, b| a.output_bytes < b.output_bytes)?,
        best_compression: first_best(results, |a, b| a.ratio > b.ratio)?,
    })
}

fn first_best<F>(results: &ResultSet, better: F) -> Option<&str>
where
    F: Fn(&EncodeMetrics, &EncodeMetrics) -> bool,
{
    let mut best: Option<(&str, &EncodeMetrics)> = None;
    for (name, metrics) in results.successes() {
        match best {
            Some((_, current)) if !better(metrics, current) => {}
            _ => best = Some((name, metrics)),
        }
    }
    best.map(|(name, _)| name)
}

pub fn write_summary<W: fmt::Write>(out: &mut W, results: &ResultSet) -> fmt::Result {
    let Some(leaders) = leaders(results) else {
        return writeln!(out, "No successful encodings");
    };

    writeln!(out)?;
    writeln!(out, "Summary:")?;
    writeln!(out, "{:<8} {:<8} {:<10} {:<6}", "Codec", "Time(s)", "Size(MB)", "Ratio")?;
    writeln!(out, "{}", "-".repeat(40))?;
    for (name, metrics) in results.successes() {
        writeln!(
            out,
            "{:<8} {:<8.1} {:<10.1} {:<6.2}",
            name,
            metrics.seconds,
            metrics.output_mb(),
            metrics.ratio
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Fastest: {}", leaders.fastest)?;
    writeln!(out, "Smallest: {}", leaders.smallest)?;
    writeln!(out, "Best compression: {}", leaders.best_compression)
}

#[must_use]
pub fn render_summary(results: &ResultSet) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails.
    let _ = write_summary(&mut out, results);
    out
}
