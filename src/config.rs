use std::path::{Path, PathBuf};

pub const HOSTS_FILE: &str = "rootnet_hosts.txt";
pub const DEFAULT_TITLE: &str = "Rootnet Projects";
pub const DEFAULT_SSH_PROGRAM: &str = "ssh";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub hosts_file: PathBuf,
    pub title: String,
    pub ssh_program: String,
}

impl Config {
    pub fn new<P: AsRef<Path>>(hosts_file: P) -> Self {
        Self {
            hosts_file: hosts_file.as_ref().to_path_buf(),
            title: DEFAULT_TITLE.to_string(),
            ssh_program: DEFAULT_SSH_PROGRAM.to_string(),
        }
    }

    pub fn with_ssh_program(mut self, program: impl Into<String>) -> Self {
        self.ssh_program = program.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// `~/rootnet_hosts.txt`, relative to the working directory when there is
    /// no home directory.
    pub fn default_hosts_file() -> PathBuf {
        dirs::home_dir().unwrap_or_default().join(HOSTS_FILE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::default_hosts_file())
    }
}
