use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Local, SecondsFormat};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use serde::Serialize;

use crate::config::Settings;
use crate::error::Error;
use crate::git::{GitRunner, commit_dated, push_head, stage};
use crate::sampler::DateSampler;
use crate::system::Clock;

#[derive(Serialize)]
struct Marker<'a> {
    date: &'a str,
}

/// Creates backdated commits that each rewrite the marker file.
pub struct CommitWriter<'a, R> {
    settings: &'a Settings,
    git: &'a dyn GitRunner,
    clock: &'a dyn Clock,
    sampler: DateSampler<R>,
    progress: bool,
}

impl<'a, R: Rng> CommitWriter<'a, R> {
    pub fn new(
        settings: &'a Settings,
        git: &'a dyn GitRunner,
        clock: &'a dyn Clock,
        sampler: DateSampler<R>,
    ) -> Self {
        Self {
            settings,
            git,
            clock,
            sampler,
            progress: true,
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Create `count` commits one after another, then push the branch.
    ///
    /// A failure stops the run; commits made before it are kept.
    ///
    /// # Errors
    /// Returns an error when the marker cannot be written or any git step fails.
    pub fn run(&mut self, count: u64) -> Result<(), Error> {
        let progress = if self.progress && count > 0 {
            let bar = ProgressBar::new(count);
            let style = ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style);
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        } else {
            ProgressBar::hidden()
        };

        for _ in 0..count {
            let date = self.sampler.sample(self.clock.now_local());
            if let Err(err) = self.commit_once(date) {
                progress.abandon_with_message("commit run failed");
                return Err(err);
            }
            progress.inc(1);
        }
        progress.finish_with_message("commits created");

        tracing::info!(remote = %self.settings.remote, "pushing");
        push_head(&self.settings.repo, self.git, &self.settings.remote)
    }

    fn commit_once(&mut self, date: DateTime<Local>) -> Result<(), Error> {
        let stamp = date.to_rfc3339_opts(SecondsFormat::Secs, false);
        tracing::info!("creating commit for date {stamp}");
        write_marker(&self.settings.marker_path(), &stamp)?;
        stage(&self.settings.repo, self.git, &self.settings.marker_file)?;
        commit_dated(&self.settings.repo, self.git, &stamp, &stamp)
    }
}

fn write_marker(path: &Path, stamp: &str) -> Result<(), Error> {
    let map_err = |source: std::io::Error| Error::MarkerWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(map_err)?;
    }
    let mut body = serde_json::to_string(&Marker { date: stamp })
        .map_err(|e| map_err(std::io::Error::other(e)))?;
    body.push('\n');
    std::fs::write(path, body).map_err(map_err)
}
