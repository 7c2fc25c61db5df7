//! Copying static assets into the output directory.

use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Errors that can occur while copying static assets.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Static directory not found: {0}")]
    NotFound(String),

    #[error("Failed to list static directory")]
    List(#[from] walkdir::Error),

    #[error("Failed to copy {path}")]
    Copy {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Copy every regular file directly inside `static_dir` into `output_dir`.
///
/// Subdirectories are skipped. Same-named files already in `output_dir` are
/// overwritten. Returns the names of the copied files in the order they were
/// copied.
pub fn copy_static_files(static_dir: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, AssetError> {
    tracing::info!(
        "Copying static files from {} to {}...",
        static_dir.display(),
        output_dir.display()
    );

    if !static_dir.is_dir() {
        return Err(AssetError::NotFound(static_dir.display().to_string()));
    }

    let mut copied = Vec::new();

    for entry in WalkDir::new(static_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        let source = entry.path();

        // Symlinks count when they point at a regular file
        let is_file = fs::metadata(source).map(|m| m.is_file()).unwrap_or(false);
        if !is_file {
            tracing::debug!("Skipping {}", source.display());
            continue;
        }

        let name = PathBuf::from(entry.file_name());
        let destination = output_dir.join(&name);

        copy_file(source, &destination).map_err(|e| AssetError::Copy {
            path: source.display().to_string(),
            source: e,
        })?;

        tracing::debug!("Copied {}", name.display());
        copied.push(name);
    }

    tracing::info!("Static files copied.");
    Ok(copied)
}

/// Copy file contents, then timestamps, then permissions.
fn copy_file(source: &Path, destination: &Path) -> io::Result<()> {
    let metadata = fs::metadata(source)?;

    let mut reader = File::open(source)?;
    let mut writer = File::create(destination)?;
    io::copy(&mut reader, &mut writer)?;

    let times = FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    writer.set_times(times)?;
    drop(writer);

    fs::set_permissions(destination, metadata.permissions())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::{Duration, SystemTime};
    use tempfile::tempdir;

    #[test]
    fn copies_flat_files_in_name_order() {
        let temp = tempdir().unwrap();
        let static_dir = temp.path().join("static");
        let out = temp.path().join("dist");
        fs::create_dir_all(&static_dir).unwrap();
        fs::create_dir_all(&out).unwrap();
        fs::write(static_dir.join("b.gif"), b"GIF89a").unwrap();
        fs::write(static_dir.join("a.png"), [0x89, b'P', b'N', b'G', 0, 0xff]).unwrap();

        let copied = copy_static_files(&static_dir, &out).unwrap();

        assert_eq!(copied, vec![PathBuf::from("a.png"), PathBuf::from("b.gif")]);
        assert_eq!(
            fs::read(out.join("a.png")).unwrap(),
            vec![0x89, b'P', b'N', b'G', 0, 0xff]
        );
        assert_eq!(fs::read(out.join("b.gif")).unwrap(), b"GIF89a".to_vec());
    }

    #[test]
    fn skips_subdirectories() {
        let temp = tempdir().unwrap();
        let static_dir = temp.path().join("static");
        let out = temp.path().join("dist");
        fs::create_dir_all(static_dir.join("icons")).unwrap();
        fs::create_dir_all(&out).unwrap();
        fs::write(static_dir.join("icons").join("wand.svg"), "<svg/>").unwrap();
        fs::write(static_dir.join("logo.png"), "png").unwrap();

        let copied = copy_static_files(&static_dir, &out).unwrap();

        assert_eq!(copied, vec![PathBuf::from("logo.png")]);
        assert!(!out.join("icons").exists());
        assert!(!out.join("wand.svg").exists());
    }

    #[test]
    fn overwrites_existing_files() {
        let temp = tempdir().unwrap();
        let static_dir = temp.path().join("static");
        let out = temp.path().join("dist");
        fs::create_dir_all(&static_dir).unwrap();
        fs::create_dir_all(&out).unwrap();
        fs::write(static_dir.join("index.html"), "from static").unwrap();
        fs::write(out.join("index.html"), "rendered").unwrap();

        copy_static_files(&static_dir, &out).unwrap();

        assert_eq!(
            fs::read_to_string(out.join("index.html")).unwrap(),
            "from static"
        );
    }

    #[test]
    fn preserves_modification_time() {
        let temp = tempdir().unwrap();
        let static_dir = temp.path().join("static");
        let out = temp.path().join("dist");
        fs::create_dir_all(&static_dir).unwrap();
        fs::create_dir_all(&out).unwrap();

        let source = static_dir.join("avengers.gif");
        fs::write(&source, "gif").unwrap();
        let past = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        File::options()
            .write(true)
            .open(&source)
            .unwrap()
            .set_modified(past)
            .unwrap();

        copy_static_files(&static_dir, &out).unwrap();

        let copied = fs::metadata(out.join("avengers.gif")).unwrap();
        assert_eq!(copied.modified().unwrap(), past);
    }

    #[test]
    fn empty_static_dir_copies_nothing() {
        let temp = tempdir().unwrap();
        let static_dir = temp.path().join("static");
        let out = temp.path().join("dist");
        fs::create_dir_all(&static_dir).unwrap();
        fs::create_dir_all(&out).unwrap();

        let copied = copy_static_files(&static_dir, &out).unwrap();

        assert!(copied.is_empty());
    }

    #[test]
    fn missing_static_dir_is_fatal() {
        let temp = tempdir().unwrap();

        let err = copy_static_files(&temp.path().join("static"), temp.path()).unwrap_err();

        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use pretty_assertions::assert_eq;
        use std::os::unix::fs::{symlink, PermissionsExt};

        fn dirs(root: &Path) -> (PathBuf, PathBuf) {
            let static_dir = root.join("static");
            let out = root.join("dist");
            fs::create_dir_all(&static_dir).unwrap();
            fs::create_dir_all(&out).unwrap();
            (static_dir, out)
        }

        #[test]
        fn follows_symlink_to_file() {
            let temp = tempdir().unwrap();
            let (static_dir, out) = dirs(temp.path());
            let target = temp.path().join("shared.png");
            fs::write(&target, "shared image").unwrap();
            symlink(&target, static_dir.join("logo.png")).unwrap();

            let copied = copy_static_files(&static_dir, &out).unwrap();

            assert_eq!(copied, vec![PathBuf::from("logo.png")]);
            let meta = fs::symlink_metadata(out.join("logo.png")).unwrap();
            assert!(meta.file_type().is_file());
            assert_eq!(
                fs::read_to_string(out.join("logo.png")).unwrap(),
                "shared image"
            );
        }

        #[test]
        fn skips_broken_symlink() {
            let temp = tempdir().unwrap();
            let (static_dir, out) = dirs(temp.path());
            symlink(temp.path().join("gone.png"), static_dir.join("gone.png")).unwrap();
            fs::write(static_dir.join("here.png"), "png").unwrap();

            let copied = copy_static_files(&static_dir, &out).unwrap();

            assert_eq!(copied, vec![PathBuf::from("here.png")]);
            assert!(fs::symlink_metadata(out.join("gone.png")).is_err());
        }

        #[test]
        fn skips_symlink_to_directory() {
            let temp = tempdir().unwrap();
            let (static_dir, out) = dirs(temp.path());
            let target = temp.path().join("sprites");
            fs::create_dir_all(&target).unwrap();
            fs::write(target.join("owl.png"), "owl").unwrap();
            symlink(&target, static_dir.join("sprites")).unwrap();

            let copied = copy_static_files(&static_dir, &out).unwrap();

            assert!(copied.is_empty());
            assert!(fs::symlink_metadata(out.join("sprites")).is_err());
            assert!(!out.join("owl.png").exists());
        }

        #[test]
        fn preserves_permissions() {
            let temp = tempdir().unwrap();
            let (static_dir, out) = dirs(temp.path());
            let source = static_dir.join("notes.txt");
            fs::write(&source, "alohomora").unwrap();
            fs::set_permissions(&source, fs::Permissions::from_mode(0o640)).unwrap();

            copy_static_files(&static_dir, &out).unwrap();

            let mode = fs::metadata(out.join("notes.txt")).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o640);
        }
    }
}
