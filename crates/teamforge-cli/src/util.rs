use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;
use teamforge_formation::FormationConfig;
use teamforge_model::Player;

/// Destination of machine-readable output: stdout, or a file given by `--output`.
pub struct Output {
    writer: Box<dyn io::Write>,
    label: String,
}

impl Output {
    pub fn create(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self {
                writer: Box::new(io::stdout().lock()),
                label: "stdout".to_owned(),
            });
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            label: path.display().to_string(),
        })
    }

    /// Writes `value` as pretty JSON followed by a newline.
    pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        Self::create(path)?.write_json(value)
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.label))?;
        writeln!(self.writer)
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("Failed to flush output to {}", self.label))?;
        Ok(())
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Read candidate players from a JSON array file
///
/// Accepts both the canonical field names and the upstream ones
/// (`user_id`, `role`, `wr`, ...).
pub fn read_players_file<P>(path: P) -> anyhow::Result<Vec<Player>>
where
    P: AsRef<Path>,
{
    read_json_file("players", path)
}

/// Read formation settings from a JSON file
///
/// Missing fields take their default values.
pub fn read_config_file<P>(path: P) -> anyhow::Result<FormationConfig>
where
    P: AsRef<Path>,
{
    read_json_file("formation config", path)
}
