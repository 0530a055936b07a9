//! Host data source: a JSON snapshot of the host collection.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use fleet_engine::HostRecord;
use fleet_logging::fleet_info;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("cannot read host snapshot {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid host snapshot {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Accepts the API's paged envelope as well as a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Page { objects: Vec<HostRecord> },
    Bare(Vec<HostRecord>),
}

pub(crate) fn parse_hosts(text: &str) -> Result<Vec<HostRecord>, serde_json::Error> {
    let hosts = match serde_json::from_str(text)? {
        SnapshotFile::Page { objects } => objects,
        SnapshotFile::Bare(hosts) => hosts,
    };
    Ok(hosts)
}

pub(crate) fn load_hosts(path: &Path) -> Result<Vec<HostRecord>, SnapshotError> {
    let text = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let hosts = parse_hosts(&text).map_err(|source| SnapshotError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fleet_info!("Loaded {} hosts from {:?}", hosts.len(), path);
    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use fleet_engine::InstallMethod;
    use tempfile::TempDir;

    use super::*;

    const HOST: &str = r#"{
        "id": 1,
        "fqdn": "oss1.lab",
        "address": "oss1",
        "nodename": "oss1",
        "state": "undeployed",
        "install_method": "existing_keys_choice",
        "server_profile": {"name": "base_managed", "initial_state": "unconfigured"},
        "needs_update": true
    }"#;

    #[test]
    fn parses_paged_envelope_and_bare_array() {
        let paged = parse_hosts(&format!(r#"{{"meta": {{}}, "objects": [{HOST}]}}"#)).unwrap();
        let bare = parse_hosts(&format!("[{HOST}]")).unwrap();

        assert_eq!(paged, bare);
        assert_eq!(paged[0].install_method, InstallMethod::ExistingKeysChoice);
        assert!(paged[0].profile_unconfigured());
    }

    #[test]
    fn load_reports_missing_file_and_bad_json() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.json");
        assert!(matches!(load_hosts(&missing), Err(SnapshotError::Io { .. })));

        let broken = temp.path().join("broken.json");
        fs::write(&broken, "{\"objects\": [").unwrap();
        assert!(matches!(load_hosts(&broken), Err(SnapshotError::Json { .. })));
    }
}
