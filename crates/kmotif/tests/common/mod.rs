use std::path::PathBuf;

use graph_rs::input::ParseMode;
use kmotif::LoadedGraph;

pub fn resource(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("resources")
        .join(name)
}

pub fn setup(name: &str) -> LoadedGraph {
    LoadedGraph::from_path(resource(name), ParseMode::Strict, None).unwrap()
}

/// Fresh path under the system temp dir, unique per test and process.
pub fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("kmotif-{}-{}", std::process::id(), name))
}
