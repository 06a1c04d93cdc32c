use std::process::ExitStatus;

use crossterm::event;

use crate::{
    config::Config,
    hosts::{load_records, Record},
    matcher::{resolve, MatchOutcome},
    select_box::{SelectBox, SelectionResult},
    session,
    terminal::Terminal,
};

pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        App { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolves `query` to a host, opening the select box only when the
    /// query does not pick out a single record.
    pub fn resolve(&self, query: &str) -> SelectionResult {
        self.resolve_with(query, |candidates| self.select(candidates))
    }

    /// Same as [`App::resolve`] with a custom selector. Selector errors count
    /// as a cancelled selection.
    pub fn resolve_with<F>(&self, query: &str, select: F) -> SelectionResult
    where
        F: FnOnce(Vec<Record>) -> anyhow::Result<SelectionResult>,
    {
        let records = self.load();

        match resolve(query, &records) {
            MatchOutcome::Auto(host) => {
                log::debug!("{:?} resolved to {}", query, host);
                SelectionResult::Chosen(host)
            }
            MatchOutcome::Ambiguous(candidates) => {
                log::debug!("{:?} left {} candidates", query, candidates.len());
                select(candidates).unwrap_or_else(|err| {
                    log::info!("no selection made: {:#}", err);
                    SelectionResult::Cancelled
                })
            }
        }
    }

    /// Resolved host, or an empty string when nothing was chosen.
    pub fn get(&self, query: &str) -> String {
        self.get_with(query, |candidates| self.select(candidates))
    }

    pub fn get_with<F>(&self, query: &str, select: F) -> String
    where
        F: FnOnce(Vec<Record>) -> anyhow::Result<SelectionResult>,
    {
        match self.resolve_with(query, select) {
            SelectionResult::Chosen(host) => host,
            SelectionResult::Cancelled => String::new(),
        }
    }

    /// Opens a session to the resolved host. Returns the session's exit
    /// status, or `None` when no session ran.
    pub fn connect(&self, query: &str) -> Option<ExitStatus> {
        self.connect_with(query, |candidates| self.select(candidates))
    }

    pub fn connect_with<F>(&self, query: &str, select: F) -> Option<ExitStatus>
    where
        F: FnOnce(Vec<Record>) -> anyhow::Result<SelectionResult>,
    {
        let host = match self.resolve_with(query, select) {
            SelectionResult::Chosen(host) if !host.is_empty() => host,
            _ => {
                log::debug!("nothing selected, skipping session");
                return None;
            }
        };

        match session::connect(&self.config.ssh_program, &host) {
            Ok(status) => Some(status),
            Err(err) => {
                log::warn!("{:#}", err);
                None
            }
        }
    }

    fn load(&self) -> Vec<Record> {
        match load_records(&self.config.hosts_file) {
            Ok(records) => records,
            Err(err) => {
                log::debug!("using an empty host list: {:#}", err);
                Vec::new()
            }
        }
    }

    fn select(&self, candidates: Vec<Record>) -> anyhow::Result<SelectionResult> {
        let mut select_box = SelectBox::new(self.config.title.clone(), candidates);
        // dropping the terminal restores the screen on every return path
        let mut terminal = Terminal::new()?;
        let selected = select_box.select(&mut *terminal, event::read)?;
        Result::Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn hosts_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn app(file: &NamedTempFile) -> App {
        App::new(Config::new(file.path()))
    }

    const HOSTS: &str = "prod-db | 10.0.0.1\nprod-web | 10.0.0.2\n";

    #[test]
    fn test_unique_match_skips_selector() {
        let file = hosts_file(HOSTS);

        let result = app(&file).resolve_with("db", |_| panic!("selector should not run"));

        assert_eq!(result, SelectionResult::Chosen("10.0.0.1".to_string()));
    }

    #[test]
    fn test_ambiguous_query_passes_matches_to_selector() {
        let file = hosts_file(HOSTS);

        let result = app(&file).resolve_with("prod", |candidates| {
            let names: Vec<_> = candidates.iter().map(|r| r.name()).collect();
            assert_eq!(names, vec!["prod-db", "prod-web"]);
            Ok(SelectionResult::Chosen(candidates[1].host().to_string()))
        });

        assert_eq!(result, SelectionResult::Chosen("10.0.0.2".to_string()));
    }

    #[test]
    fn test_selector_error_is_cancel() {
        let file = hosts_file(HOSTS);

        let result = app(&file).resolve_with("", |_| Err(anyhow::anyhow!("no terminal")));

        assert_eq!(result, SelectionResult::Cancelled);
    }

    #[test]
    fn test_missing_hosts_file_is_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(Config::new(dir.path().join("missing.txt")));

        let result = app.resolve_with("anything", |candidates| {
            assert!(candidates.is_empty());
            Ok(SelectionResult::Cancelled)
        });

        assert_eq!(result, SelectionResult::Cancelled);
    }

    #[test]
    fn test_get_returns_host() {
        let file = hosts_file(HOSTS);

        let host = app(&file).get_with("db", |_| panic!("selector should not run"));

        assert_eq!(host, "10.0.0.1");
    }

    #[test]
    fn test_get_cancelled_is_empty() {
        let file = hosts_file(HOSTS);

        let host = app(&file).get_with("prod", |_| Ok(SelectionResult::Cancelled));

        assert_eq!(host, "");
    }

    #[cfg(unix)]
    #[test]
    fn test_connect_runs_session_for_chosen_host() {
        let file = hosts_file(HOSTS);
        let app = App::new(Config::new(file.path()).with_ssh_program("true"));

        let status = app.connect_with("db", |_| panic!("selector should not run"));

        assert!(status.unwrap().success());
    }

    #[cfg(unix)]
    #[test]
    fn test_connect_ignores_session_exit_code() {
        let file = hosts_file(HOSTS);
        let app = App::new(Config::new(file.path()).with_ssh_program("false"));

        let status = app.connect_with("db", |_| panic!("selector should not run"));

        assert!(!status.unwrap().success());
    }

    #[cfg(unix)]
    #[test]
    fn test_connect_skips_session_when_cancelled() {
        let file = hosts_file(HOSTS);
        let app = App::new(Config::new(file.path()).with_ssh_program("true"));

        let status = app.connect_with("prod", |_| Ok(SelectionResult::Cancelled));

        assert!(status.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_connect_skips_session_for_empty_host() {
        let file = hosts_file("orphan |\n");
        let app = App::new(Config::new(file.path()).with_ssh_program("true"));

        let status = app.connect_with("orphan", |_| panic!("selector should not run"));

        assert!(status.is_none());
    }

    #[test]
    fn test_connect_with_missing_program_is_silent() {
        let file = hosts_file(HOSTS);
        let config = Config::new(file.path()).with_ssh_program("rootnet-no-such-program");
        let app = App::new(config);

        let status = app.connect_with("db", |_| panic!("selector should not run"));

        assert!(status.is_none());
    }
}
