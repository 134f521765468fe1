use std::path::{Path, PathBuf};

use crate::cli::DatasetArgs;

const DATASET_FILE: &str = "hospital_data.csv";

#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub data_dir: PathBuf,
    pub dataset_path: PathBuf,
}

impl StoragePaths {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir: PathBuf = data_dir.into();
        let dataset_path = data_dir.join(DATASET_FILE);

        Self {
            data_dir,
            dataset_path,
        }
    }

    pub fn from_args(args: &DatasetArgs) -> Self {
        let mut paths = Self::new(&args.data_dir);
        if let Some(p) = args.dataset.as_ref() {
            paths.dataset_path = PathBuf::from(p);
        }
        paths
    }
}

pub fn file_present_nonempty(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(m) => m.is_file() && m.len() > 0,
        Err(_) => false,
    }
}
