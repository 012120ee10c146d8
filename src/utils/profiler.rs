use crate::error::Result;
use pprof::{ProfilerGuard, ProfilerGuardBuilder};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Samples per second of CPU time.
const SAMPLE_FREQUENCY: i32 = 1000;

/// Sampling CPU profiler that writes a flamegraph SVG when finished.
///
/// Only one profiler can run per process.
pub struct CpuProfiler {
    guard: ProfilerGuard<'static>,
    path: PathBuf,
}

impl CpuProfiler {
    pub fn start(path: &Path) -> Result<Self> {
        let guard = ProfilerGuardBuilder::default()
            .frequency(SAMPLE_FREQUENCY)
            .blocklist(&["libc", "libgcc", "pthread", "vdso"])
            .build()?;

        info!(path = %path.display(), "cpu profiling started");

        Ok(Self {
            guard,
            path: path.to_path_buf(),
        })
    }

    /// Stop sampling and write the flamegraph.
    pub fn finish(self) -> Result<PathBuf> {
        let report = self.guard.report().build()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let writer = BufWriter::new(File::create(&self.path)?);
        report.flamegraph(writer)?;

        info!(
            path = %self.path.display(),
            stacks = report.data.len(),
            "cpu profile written"
        );
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processors::ParallelProcessor;
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    #[test]
    fn test_profile_written_as_flamegraph() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("profiles").join("cpu.svg");

        let input: Vec<u8> = (0..20_000)
            .map(|i| format!("S{};{}.{}\n", i % 97, i % 100, i % 10))
            .collect::<String>()
            .into_bytes();

        let profiler = CpuProfiler::start(&path).unwrap();
        let started = Instant::now();
        while started.elapsed() < Duration::from_millis(500) {
            ParallelProcessor::new(2).process(&input, None).unwrap();
        }
        let written = profiler.finish().unwrap();

        assert_eq!(written, path);
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }
}
