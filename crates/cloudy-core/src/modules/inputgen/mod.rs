mod model;

pub use model::InputDeckTemplate;

use super::ModuleExecutor;
use super::centers::read_centers;
use crate::domain::{
    ComputeModule, ComputeRequest, ComputeResult, GridError, ParameterPoint, RunPaths,
};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

const PROGRESS_INTERVAL: usize = 10_000;

/// What happened to one point's run directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Directory created and input deck written.
    Created,
    /// Directory already existed without an input deck; deck written.
    WrittenIntoExisting,
    /// Directory and input deck both present; nothing touched.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputGenSummary {
    pub created: usize,
    pub written_into_existing: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl InputGenSummary {
    pub fn total(&self) -> usize {
        self.created + self.written_into_existing + self.skipped + self.failed
    }

    fn record(&mut self, action: InputAction) {
        match action {
            InputAction::Created => self.created += 1,
            InputAction::WrittenIntoExisting => self.written_into_existing += 1,
            InputAction::Skipped => self.skipped += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputGenModule {
    pub template: InputDeckTemplate,
}

impl InputGenModule {
    pub fn new(template: InputDeckTemplate) -> Self {
        Self { template }
    }
}

impl ModuleExecutor for InputGenModule {
    type Output = InputGenSummary;

    fn execute(&self, request: &ComputeRequest) -> ComputeResult<InputGenSummary> {
        request.expect_module(ComputeModule::InputGen)?;
        let points = read_centers(&request.centers_path, request.skip_rows)?;
        generate_inputs(&request.grid_root, &points, &self.template)
    }
}

/// Creates one run directory and input deck per point. Existing decks are
/// never rewritten, so re-running over a grid only fills in what is
/// missing. Per-point failures are logged and counted, not returned.
pub fn generate_inputs(
    grid_root: &Path,
    points: &[ParameterPoint],
    template: &InputDeckTemplate,
) -> ComputeResult<InputGenSummary> {
    fs::create_dir_all(grid_root).map_err(|source| {
        GridError::io_system(
            "IO.GRID_ROOT",
            format!(
                "failed to create grid root '{}': {}",
                grid_root.display(),
                source
            ),
        )
    })?;

    let mut summary = InputGenSummary::default();
    for (row, point) in points.iter().enumerate() {
        let paths = RunPaths::new(grid_root, point);
        match prepare_run(&paths, point, template) {
            Ok(action) => {
                if action == InputAction::Skipped {
                    tracing::debug!(run = %paths.name, "input deck exists, skipping");
                } else if action == InputAction::WrittenIntoExisting {
                    tracing::debug!(run = %paths.name, "directory exists, wrote missing input deck");
                }
                summary.record(action);
            }
            Err(error) => {
                tracing::warn!(run = %paths.name, error = %error, "unable to prepare run directory");
                summary.failed += 1;
            }
        }

        if row % PROGRESS_INTERVAL == 1 {
            tracing::info!(
                done = row,
                remaining = points.len() - row,
                "input generation progress"
            );
        }
    }

    tracing::info!(
        created = summary.created,
        written_into_existing = summary.written_into_existing,
        skipped = summary.skipped,
        failed = summary.failed,
        "input generation finished"
    );
    Ok(summary)
}

pub fn prepare_run(
    paths: &RunPaths,
    point: &ParameterPoint,
    template: &InputDeckTemplate,
) -> ComputeResult<InputAction> {
    match create_run_directory(&paths.directory) {
        Ok(()) => {
            write_input_deck(paths, point, template)?;
            Ok(InputAction::Created)
        }
        Err(source) if source.kind() == ErrorKind::AlreadyExists => {
            if paths.input_file().is_file() {
                return Ok(InputAction::Skipped);
            }
            write_input_deck(paths, point, template)?;
            Ok(InputAction::WrittenIntoExisting)
        }
        Err(source) => Err(GridError::io_system(
            "IO.RUN_DIRECTORY",
            format!(
                "failed to create run directory '{}': {}",
                paths.directory.display(),
                source
            ),
        )),
    }
}

#[cfg_attr(not(unix), allow(unused_mut))]
fn create_run_directory(directory: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder.create(directory)
}

fn write_input_deck(
    paths: &RunPaths,
    point: &ParameterPoint,
    template: &InputDeckTemplate,
) -> ComputeResult<()> {
    let input_file = paths.input_file();
    fs::write(&input_file, template.render(point)).map_err(|source| {
        GridError::io_system(
            "IO.INPUT_DECK_WRITE",
            format!(
                "failed to write input deck '{}': {}",
                input_file.display(),
                source
            ),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{
        InputAction, InputDeckTemplate, InputGenModule, InputGenSummary, generate_inputs,
        prepare_run,
    };
    use crate::domain::{ComputeModule, ComputeRequest, ParameterPoint, RunPaths};
    use crate::modules::ModuleExecutor;
    use std::fs;
    use tempfile::TempDir;

    fn grid_points() -> Vec<ParameterPoint> {
        vec![
            ParameterPoint::new(-1.0, 1.0, 0.0, 0.5, -1.0),
            ParameterPoint::new(0.0, 2.0, 0.3, 1.0, 0.0),
            ParameterPoint::new(0.5, 3.0, 0.6, 1.5, 1.0),
        ]
    }

    #[test]
    fn first_run_creates_every_directory_and_deck() {
        let temp = TempDir::new().expect("tempdir should be created");
        let template = InputDeckTemplate::default();
        let points = grid_points();

        let summary = generate_inputs(temp.path(), &points, &template).expect("generate");
        assert_eq!(
            summary,
            InputGenSummary {
                created: 3,
                ..InputGenSummary::default()
            }
        );

        for point in &points {
            let paths = RunPaths::new(temp.path(), point);
            let deck = fs::read_to_string(paths.input_file()).expect("deck should exist");
            assert_eq!(deck, template.render(point));
        }
    }

    #[test]
    fn second_run_is_idempotent() {
        let temp = TempDir::new().expect("tempdir should be created");
        let template = InputDeckTemplate::default();
        let points = grid_points();
        generate_inputs(temp.path(), &points, &template).expect("first generate");

        let paths = RunPaths::new(temp.path(), &points[0]);
        fs::write(paths.input_file(), "hand edited\n").expect("edit deck");

        let summary = generate_inputs(temp.path(), &points, &template).expect("second generate");
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.total(), 3);
        assert_eq!(
            fs::read_to_string(paths.input_file()).expect("deck"),
            "hand edited\n"
        );
    }

    #[test]
    fn existing_directory_without_deck_gets_one() {
        let temp = TempDir::new().expect("tempdir should be created");
        let point = grid_points()[1];
        let paths = RunPaths::new(temp.path(), &point);
        fs::create_dir_all(&paths.directory).expect("pre-create run directory");

        let action =
            prepare_run(&paths, &point, &InputDeckTemplate::default()).expect("prepare run");
        assert_eq!(action, InputAction::WrittenIntoExisting);
        assert!(paths.input_file().is_file());
    }

    #[test]
    fn failures_are_counted_and_do_not_stop_the_batch() {
        let temp = TempDir::new().expect("tempdir should be created");
        let points = grid_points();
        // A plain file where the run directory should be blocks deck writing.
        let blocked = RunPaths::new(temp.path(), &points[0]);
        fs::write(&blocked.directory, "not a directory").expect("blocking file");

        let summary = generate_inputs(temp.path(), &points, &InputDeckTemplate::default())
            .expect("generate");
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.created, 2);
    }

    #[test]
    fn module_reads_centers_from_request() {
        let temp = TempDir::new().expect("tempdir should be created");
        let centers = temp.path().join("centers.txt");
        fs::write(&centers, "log_metallicity log_hden ...\n-1 1 0 0.5 -1\n").expect("centers");

        let request = ComputeRequest::new(ComputeModule::InputGen, temp.path(), &centers)
            .with_skip_rows(1);
        let summary = InputGenModule::default()
            .execute(&request)
            .expect("module should run");
        assert_eq!(summary.created, 1);

        let wrong = ComputeRequest::new(ComputeModule::Scan, temp.path(), &centers);
        let error = InputGenModule::default()
            .execute(&wrong)
            .expect_err("wrong module should fail");
        assert_eq!(error.placeholder(), "INPUT.REQUEST_MODULE");
    }
}
