use std::fs;
use std::path::{Path, PathBuf};

use catmatrix_core::source::{FetchError, ImageSource};
use log::info;

/// Cycles through the JPEG files of a directory in name order. The
/// offline stand-in for the network source.
pub struct FileSource {
    files: Vec<PathBuf>,
    next: usize,
}

impl FileSource {
    pub fn new(dir: &Path) -> std::io::Result<Self> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                matches!(
                    path.extension().and_then(|ext| ext.to_str()),
                    Some("jpg") | Some("jpeg")
                )
            })
            .collect();
        files.sort();
        info!("file source: {} JPEG files in {:?}", files.len(), dir);
        Ok(FileSource { files, next: 0 })
    }
}

impl ImageSource for FileSource {
    fn fetch(&mut self, _width: usize, _height: usize) -> Result<Vec<u8>, FetchError> {
        if self.files.is_empty() {
            return Err(FetchError::Connection);
        }
        let path = &self.files[self.next % self.files.len()];
        self.next += 1;
        fs::read(path).map_err(|_| FetchError::Connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn cycles_through_files_in_order() {
        let dir = std::env::temp_dir().join("catmatrix-file-source-test");
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).unwrap();
        for (name, byte) in [("a.jpg", 1u8), ("b.jpeg", 2), ("skip.txt", 3)] {
            let mut file = fs::File::create(dir.join(name)).unwrap();
            file.write_all(&[byte]).unwrap();
        }

        let mut source = FileSource::new(&dir).unwrap();
        assert_eq!(source.fetch(64, 32).unwrap(), [1]);
        assert_eq!(source.fetch(64, 32).unwrap(), [2]);
        assert_eq!(source.fetch(64, 32).unwrap(), [1]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_directory_reports_transport_failure() {
        let dir = std::env::temp_dir().join("catmatrix-file-source-empty");
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).unwrap();
        let mut source = FileSource::new(&dir).unwrap();
        assert_eq!(source.fetch(64, 32), Err(FetchError::Connection));
        fs::remove_dir_all(&dir).ok();
    }
}
