use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

pub trait FsOps {
    fn expand_tilde(&self, p: &Path) -> PathBuf;
}

pub struct DefaultFsOps;
impl FsOps for DefaultFsOps {
    fn expand_tilde(&self, p: &Path) -> PathBuf {
        if let Some(home) = std::env::var_os("HOME") {
            let home = PathBuf::from(home);
            if p.starts_with("~")
                && let Ok(rest) = p.strip_prefix("~")
            {
                return home.join(rest);
            }
        }
        p.to_path_buf()
    }
}

pub trait Clock {
    fn now(&self) -> SystemTime;

    fn now_local(&self) -> DateTime<Local> {
        self.now().into()
    }
}

pub struct DefaultClock;
impl Clock for DefaultClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}
