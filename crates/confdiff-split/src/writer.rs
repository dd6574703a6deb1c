use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{SplitError, SplitResult};
use crate::manifest::Manifest;

/// Write each manifest to its own file under `dir`.
///
/// The directory is created if missing. When two manifests map to the same
/// file name within one call, the later ones get the first free `-2`, `-3`,
/// ... suffix before the extension, skipping names already used by other
/// manifests in the same call. Existing files from earlier runs are
/// overwritten.
/// Returns the written paths in manifest order.
pub fn write_manifests(
    dir: &Path,
    manifests: &[Manifest],
    project: Option<&str>,
) -> SplitResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| SplitError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut used: HashSet<String> = HashSet::with_capacity(manifests.len());
    let mut written = Vec::with_capacity(manifests.len());

    for manifest in manifests {
        let file_name = unique_name(manifest.file_name(project), &used);
        used.insert(file_name.clone());

        let path = dir.join(file_name);
        std::fs::write(&path, manifest.to_yaml()?).map_err(|source| SplitError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), kind = %manifest.kind, "wrote manifest");
        written.push(path);
    }

    Ok(written)
}

/// `base` itself if unused, otherwise the first `{stem}-{n}.yaml` with
/// `n >= 2` that is not in `used`.
fn unique_name(base: String, used: &HashSet<String>) -> String {
    if !used.contains(&base) {
        return base;
    }
    let stem = base.trim_end_matches(".yaml");
    let mut n = 2usize;
    loop {
        let candidate = format!("{stem}-{n}.yaml");
        if !used.contains(&candidate) {
            debug!(file = %base, renamed = %candidate, "file name collision");
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::split_stream;

    #[test]
    fn writes_one_file_per_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("base");
        let manifests = split_stream(
            "kind: Service\nmetadata:\n  name: web\n---\n\
             kind: Deployment\nmetadata:\n  name: web\n",
        )
        .unwrap();

        let paths = write_manifests(&out, &manifests, Some("shop")).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["shop-web-service.yaml", "shop-web-deployment.yaml"]);

        let text = std::fs::read_to_string(&paths[0]).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(value, manifests[0].document);
    }

    #[test]
    fn collisions_get_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let manifests = split_stream(
            "kind: ConfigMap\nmetadata:\n  name: cfg\n  namespace: a\n---\n\
             kind: ConfigMap\nmetadata:\n  name: cfg\n  namespace: b\n---\n\
             kind: configmap\nmetadata:\n  name: CFG\n",
        )
        .unwrap();

        let paths = write_manifests(dir.path(), &manifests, None).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec!["cfg-configmap.yaml", "cfg-configmap-2.yaml", "cfg-configmap-3.yaml"]
        );
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[test]
    fn numbered_names_never_overwrite_natural_names() {
        let dir = tempfile::tempdir().unwrap();
        let manifests = split_stream(
            "kind: ConfigMap-2\nmetadata:\n  name: cfg\n---\n\
             kind: ConfigMap\nmetadata:\n  name: cfg\n---\n\
             kind: ConfigMap\nmetadata:\n  name: cfg\n---\n\
             kind: ConfigMap-2\nmetadata:\n  name: cfg\n",
        )
        .unwrap();

        let paths = write_manifests(dir.path(), &manifests, None).unwrap();
        let names: Vec<String> = paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "cfg-configmap-2.yaml",
                "cfg-configmap.yaml",
                "cfg-configmap-3.yaml",
                "cfg-configmap-2-2.yaml",
            ]
        );
        for (path, manifest) in paths.iter().zip(&manifests) {
            let text = std::fs::read_to_string(path).unwrap();
            let value: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
            assert_eq!(value, manifest.document);
        }
    }

    #[test]
    fn unique_name_skips_taken_suffixes() {
        let used: HashSet<String> = ["a.yaml", "a-2.yaml", "a-3.yaml"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(unique_name("a.yaml".into(), &used), "a-4.yaml");
        assert_eq!(unique_name("b.yaml".into(), &used), "b.yaml");
    }

    #[test]
    fn empty_stream_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_manifests(dir.path(), &[], None).unwrap();
        assert!(paths.is_empty());
    }
}
