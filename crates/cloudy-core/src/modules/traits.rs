use crate::domain::{ComputeRequest, ComputeResult};

/// A pipeline stage driven by a [`ComputeRequest`]: each one reads the
/// centers table named in the request and works over the grid root.
pub trait ModuleExecutor {
    type Output;

    fn execute(&self, request: &ComputeRequest) -> ComputeResult<Self::Output>;
}

#[cfg(test)]
mod tests {
    use super::ModuleExecutor;
    use crate::domain::{ComputeModule, ComputeRequest};
    use crate::modules::emission::IntegrateModule;
    use crate::modules::inputgen::InputGenModule;
    use crate::modules::scan::ScanModule;
    use tempfile::TempDir;

    fn missing_centers_placeholder<E: ModuleExecutor>(
        executor: &E,
        module: ComputeModule,
    ) -> &'static str {
        let temp = TempDir::new().expect("tempdir should be created");
        let request = ComputeRequest::new(module, temp.path(), temp.path().join("centers.txt"));
        match executor.execute(&request) {
            Ok(_) => panic!("{module} should fail without a centers table"),
            Err(error) => {
                assert_eq!(error.exit_code(), 3);
                error.placeholder()
            }
        }
    }

    #[test]
    fn every_stage_reports_a_missing_centers_table_the_same_way() {
        assert_eq!(
            missing_centers_placeholder(&InputGenModule::default(), ComputeModule::InputGen),
            "IO.CENTERS_READ"
        );
        assert_eq!(
            missing_centers_placeholder(&ScanModule::default(), ComputeModule::Scan),
            "IO.CENTERS_READ"
        );
        assert_eq!(
            missing_centers_placeholder(&IntegrateModule::default(), ComputeModule::Integrate),
            "IO.CENTERS_READ"
        );
    }
}
