//! Library directory management

use super::{LibraryConfig, LibraryError};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions accepted into the library (compared case-insensitively)
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["mp3", "flac", "wav", "m4a", "ogg"];

/// Handle on the audio library and its config file
#[derive(Debug, Clone)]
pub struct Library {
    config_path: PathBuf,
    config: LibraryConfig,
}

impl Library {
    /// Open the library described by `config_path`
    ///
    /// A missing config file is created pointing at the platform default library
    /// directory, which is created too.
    pub fn open(config_path: &Path) -> Result<Self, LibraryError> {
        let config = if config_path.exists() {
            LibraryConfig::load(config_path)?
        } else {
            let config = LibraryConfig {
                library_path: LibraryConfig::default_library_path()?,
            };
            fs::create_dir_all(&config.library_path)?;
            config.save(config_path)?;
            log::info!(
                "Created library config {} -> {}",
                config_path.display(),
                config.library_path.display()
            );
            config
        };
        Ok(Self {
            config_path: config_path.to_path_buf(),
            config,
        })
    }

    /// Open the library through the config file in the platform config directory
    pub fn open_default() -> Result<Self, LibraryError> {
        Self::open(&LibraryConfig::default_location()?)
    }

    /// Library directory
    pub fn path(&self) -> &Path {
        &self.config.library_path
    }

    /// Location of the config file
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Names of the files in the library, sorted
    pub fn contents(&self) -> Result<Vec<String>, LibraryError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.path())? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// True when `name` is a plain file name present in the library
    pub fn exists(&self, name: &str) -> bool {
        is_plain_name(name) && self.path().join(name).exists()
    }

    /// True when the extension of `name` is a supported audio format
    pub fn is_supported(name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(OsStr::to_str)
            .map(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|s| s.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Copy an audio file into the library
    ///
    /// # Errors
    ///
    /// Fails for unsupported extensions, for names already in the library, and
    /// when the copy itself fails.
    pub fn add(&self, source: &Path) -> Result<PathBuf, LibraryError> {
        let name = source
            .file_name()
            .and_then(OsStr::to_str)
            .ok_or_else(|| LibraryError::NotFound(source.display().to_string()))?;
        if !Self::is_supported(name) {
            return Err(LibraryError::UnsupportedFileType(name.to_string()));
        }
        if self.exists(name) {
            return Err(LibraryError::AlreadyExists(name.to_string()));
        }

        let target = self.path().join(name);
        fs::copy(source, &target)?;
        log::info!("Added {} to library", name);
        Ok(target)
    }

    /// Remove a file from the library
    pub fn delete(&self, name: &str) -> Result<(), LibraryError> {
        if !self.exists(name) {
            return Err(LibraryError::NotFound(name.to_string()));
        }
        fs::remove_file(self.path().join(name))?;
        log::info!("Removed {} from library", name);
        Ok(())
    }

    /// Point the library at another existing directory and persist the change
    pub fn set_path(&mut self, dir: &Path) -> Result<(), LibraryError> {
        if !dir.is_dir() {
            return Err(LibraryError::NotADirectory(dir.to_path_buf()));
        }
        let config = LibraryConfig {
            library_path: dir.to_path_buf(),
        };
        config.save(&self.config_path)?;
        self.config = config;
        Ok(())
    }

    /// Full path of a supported file in the library
    pub fn resolve(&self, name: &str) -> Result<PathBuf, LibraryError> {
        if !Self::is_supported(name) {
            return Err(LibraryError::UnsupportedFileType(name.to_string()));
        }
        if !self.exists(name) {
            return Err(LibraryError::NotFound(name.to_string()));
        }
        Ok(self.path().join(name))
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && Path::new(name).file_name() == Some(OsStr::new(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn library() -> (TempDir, Library) {
        let dir = tempfile::tempdir().unwrap();
        let music = dir.path().join("music");
        fs::create_dir(&music).unwrap();
        let config_path = dir.path().join("library.json");
        LibraryConfig {
            library_path: music,
        }
        .save(&config_path)
        .unwrap();
        let library = Library::open(&config_path).unwrap();
        (dir, library)
    }

    #[test]
    fn test_is_supported() {
        assert!(Library::is_supported("song.mp3"));
        assert!(Library::is_supported("SONG.FLAC"));
        assert!(Library::is_supported("a.b.m4a"));
        assert!(!Library::is_supported("notes.txt"));
        assert!(!Library::is_supported("wav"));
    }

    #[test]
    fn test_add_list_delete() {
        let (dir, library) = library();
        let source = dir.path().join("track.wav");
        fs::write(&source, b"RIFF").unwrap();

        library.add(&source).unwrap();
        assert!(library.exists("track.wav"));
        assert_eq!(library.contents().unwrap(), vec!["track.wav".to_string()]);
        assert!(matches!(
            library.add(&source),
            Err(LibraryError::AlreadyExists(name)) if name == "track.wav"
        ));

        library.delete("track.wav").unwrap();
        assert!(!library.exists("track.wav"));
        assert!(matches!(
            library.delete("track.wav"),
            Err(LibraryError::NotFound(_))
        ));
    }

    #[test]
    fn test_add_rejects_unsupported() {
        let (dir, library) = library();
        let source = dir.path().join("notes.txt");
        fs::write(&source, b"hello").unwrap();
        assert!(matches!(
            library.add(&source),
            Err(LibraryError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn test_names_with_separators_are_not_in_library() {
        let (_dir, library) = library();
        assert!(!library.exists("../library.json"));
        assert!(!library.exists(""));
    }

    #[test]
    fn test_resolve() {
        let (_dir, library) = library();
        fs::write(library.path().join("a.ogg"), b"OggS").unwrap();
        fs::write(library.path().join("b.txt"), b"").unwrap();
        assert_eq!(library.resolve("a.ogg").unwrap(), library.path().join("a.ogg"));
        assert!(matches!(
            library.resolve("b.txt"),
            Err(LibraryError::UnsupportedFileType(_))
        ));
        assert!(matches!(
            library.resolve("c.mp3"),
            Err(LibraryError::NotFound(_))
        ));
    }

    #[test]
    fn test_set_path_persists() {
        let (dir, mut library) = library();
        let other = dir.path().join("other");
        fs::create_dir(&other).unwrap();

        library.set_path(&other).unwrap();
        assert_eq!(library.path(), other.as_path());

        let reopened = Library::open(library.config_path()).unwrap();
        assert_eq!(reopened.path(), other.as_path());
    }

    #[test]
    fn test_set_path_rejects_missing_directory() {
        let (dir, mut library) = library();
        let before = library.path().to_path_buf();
        let missing = dir.path().join("missing");
        assert!(matches!(
            library.set_path(&missing),
            Err(LibraryError::NotADirectory(path)) if path == missing
        ));
        assert_eq!(library.path(), before.as_path());
    }
}
