//! Flat per-step energy log, one `<step>,<energy>` line per Monte Carlo step.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::IsingError;
use crate::sampling::Algorithm;

pub struct EnergyLog<W: Write> {
    writer: W,
    lines: usize,
}

impl EnergyLog<BufWriter<File>> {
    /// Create (or truncate) the log for `algorithm` inside `dir`.
    pub fn create(dir: &Path, algorithm: Algorithm) -> Result<Self, IsingError> {
        let file = File::create(Self::path_for(dir, algorithm))?;
        Ok(Self::new(BufWriter::new(file)))
    }

    pub fn path_for(dir: &Path, algorithm: Algorithm) -> PathBuf {
        dir.join(algorithm.log_file_name())
    }
}

impl EnergyLog<io::Sink> {
    /// A log that discards every record.
    pub fn discard() -> Self {
        Self::new(io::sink())
    }
}

impl<W: Write> EnergyLog<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    pub fn record(&mut self, step: usize, energy: f64) -> io::Result<()> {
        writeln!(self.writer, "{step},{energy}")?;
        self.lines += 1;
        Ok(())
    }

    /// Number of records written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let mut log = EnergyLog::new(Vec::new());
        log.record(0, -8.0).unwrap();
        log.record(1, -7.5).unwrap();
        log.record(2, 0.0).unwrap();
        assert_eq!(log.lines(), 3);
        let text = String::from_utf8(log.into_inner()).unwrap();
        assert_eq!(text, "0,-8\n1,-7.5\n2,0\n");
    }

    #[test]
    fn test_path_per_algorithm() {
        let dir = Path::new("runs");
        assert_eq!(EnergyLog::path_for(dir, Algorithm::Wolff), Path::new("runs/wolff_energy"));
        assert_eq!(
            EnergyLog::path_for(dir, Algorithm::Metropolis),
            Path::new("runs/metropolis_energy")
        );
    }

    #[test]
    fn test_create_truncates() {
        let dir = std::env::temp_dir().join(format!("ising_mc_log_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut log = EnergyLog::create(&dir, Algorithm::Metropolis).unwrap();
        log.record(0, 1.0).unwrap();
        log.record(1, 2.0).unwrap();
        log.flush().unwrap();
        drop(log);

        let mut log = EnergyLog::create(&dir, Algorithm::Metropolis).unwrap();
        log.record(0, 3.0).unwrap();
        log.flush().unwrap();
        drop(log);

        let path = EnergyLog::path_for(&dir, Algorithm::Metropolis);
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text, "0,3\n");
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
