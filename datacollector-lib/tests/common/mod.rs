//! Shared fixtures for the integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use camino::Utf8PathBuf;
use datacollector_lib::cli::{CliCommand, CliOption, Invocation};
use datacollector_lib::model::{DataCollection, Recommendation, Report};
use datacollector_lib::plugin::{Provider, StaticRegistry};
use datacollector_lib::{Config, Host, LogLevel, Result};
use flate2::read::GzDecoder;
use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::rc::Rc;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const MIDDLEWARE: &str = "test";

/// Test host that captures output to in-memory buffers.
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
}

impl TestHost {
    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }
}

type CollectionsFn = Box<dyn Fn() -> Vec<DataCollection>>;

/// Provider whose documents are scripted by the test.
pub struct TestProvider {
    collections: CollectionsFn,
    recommendations: Vec<Recommendation>,
    report_sets: RefCell<VecDeque<Vec<Report>>>,
    reported: Rc<RefCell<Vec<String>>>,
}

impl core::fmt::Debug for TestProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TestProvider").finish_non_exhaustive()
    }
}

impl TestProvider {
    pub fn new(collections: impl Fn() -> Vec<DataCollection> + 'static) -> Self {
        Self {
            collections: Box::new(collections),
            recommendations: Vec::new(),
            report_sets: RefCell::new(VecDeque::new()),
            reported: Rc::default(),
        }
    }

    pub fn with_recommendations(mut self, recommendations: Vec<Recommendation>) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Assessment names passed to `reports`, in call order.
    pub fn reported(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.reported)
    }

    /// Each report stage consumes the next set; once exhausted no reports are produced.
    pub fn with_report_set(self, reports: Vec<Report>) -> Self {
        self.report_sets.borrow_mut().push_back(reports);
        self
    }
}

impl Provider for TestProvider {
    fn middleware(&self) -> &str {
        MIDDLEWARE
    }

    fn collect_command(&self) -> CliCommand {
        let server = CliCommand::new(
            "server",
            "Collect a single server",
            vec![CliOption::new(Some('p'), Some("profile"), "Profile to read")],
            vec![],
            vec!["SERVER".to_string()],
        );
        CliCommand::collect(vec![CliOption::new(Some('a'), Some("all"), "Collect everything")], vec![server], vec![])
    }

    fn assess_command(&self) -> CliCommand {
        CliCommand::assess(vec![], vec![], vec![])
    }

    fn report_command(&self) -> CliCommand {
        CliCommand::report(vec![], vec![], vec![])
    }

    fn collections(&self, _invocation: &Invocation) -> Result<Vec<DataCollection>> {
        Ok((self.collections)())
    }

    fn recommendations(&self, _invocation: &Invocation) -> Result<Vec<Recommendation>> {
        Ok(self.recommendations.clone())
    }

    fn reports(&self, assessment_name: &str, _assessment_dir: &Path, _invocation: &Invocation) -> Result<Vec<Report>> {
        self.reported.borrow_mut().push(assessment_name.to_string());
        Ok(self.report_sets.borrow_mut().pop_front().unwrap_or_default())
    }
}

pub fn config(output_dir: &Path) -> Config {
    Config {
        output_dir: Utf8PathBuf::from_path_buf(output_dir.to_path_buf()).unwrap(),
        log_level: LogLevel::None,
    }
}

pub fn registry(provider: TestProvider) -> StaticRegistry {
    StaticRegistry::new().with_provider(provider)
}

pub fn args(line: &[&str]) -> Vec<String> {
    let mut args = vec!["datacollector".to_string()];
    args.extend(line.iter().map(ToString::to_string));
    args
}

/// Every file under `root`, as `/` separated paths relative to it.
pub fn files_under(root: &Path) -> BTreeSet<String> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .map(core::result::Result::unwrap)
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

/// File members of a `.tar.gz` archive.
pub fn archive_files(path: &Path) -> BTreeSet<String> {
    let mut archive = tar::Archive::new(GzDecoder::new(File::open(path).unwrap()));
    archive
        .entries()
        .unwrap()
        .map(core::result::Result::unwrap)
        .filter(|e| e.header().entry_type().is_file())
        .map(|e| e.path().unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}
