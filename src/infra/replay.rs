use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use time::macros::format_description;
use time::OffsetDateTime;

use crate::infra::protocol::{GameSettings, TurnInput};

/// Verbatim copy of the session input; can be fed back with `RICKBOT_INPUT`.
pub struct ReplayFile {
    path: PathBuf,
    file: File,
}

impl ReplayFile {
    pub fn new(replays_folder: &str, settings: &GameSettings) -> io::Result<Self> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let date_time_str = now
            .format(format_description!("[year][month][day]-[hour][minute][second]"))
            .map_err(io::Error::other)?;

        let path = Path::new(replays_folder).join(format!(
            "rickbot - {} - {}x{}.txt",
            date_time_str, settings.rows, settings.columns
        ));

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;
        let mut replay_file = ReplayFile { path, file };
        replay_file.write_record(&settings.to_string())?;
        Ok(replay_file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, turn: &TurnInput) -> io::Result<()> {
        self.write_record(&turn.to_string())
    }

    fn write_record(&mut self, record: &str) -> io::Result<()> {
        writeln!(self.file, "{}", record)?;
        self.file.flush()
    }
}
