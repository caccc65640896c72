use crate::io::error::Error;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

pub fn read<R: Read, T: DeserializeOwned>(reader: R) -> Result<T, Error> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn write<W: Write, T: Serialize>(mut writer: W, value: &T) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Reads a JSON document from disk.
pub fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let file = File::open(path)?;
    read(BufReader::new(file))
}

/// Writes a JSON document to disk, creating missing parent directories.
pub fn write_file<T: Serialize>(path: &Path, value: &T) -> Result<(), Error> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{atom::Atom, types::Element};
    use std::io::Cursor;

    #[test]
    fn writes_and_reads_roundtrip() {
        let atoms = vec![
            Atom::new(Element::H, [0.0, 0.0, 0.0]),
            Atom::new(Element::Li, [0.0, 0.0, 1.6]),
        ];
        let mut buffer = Vec::new();
        write(&mut buffer, &atoms).expect("write json");
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.contains("\"Li\""));

        let restored: Vec<Atom> = read(Cursor::new(buffer)).expect("read json");
        assert_eq!(restored, atoms);
    }

    #[test]
    fn file_helpers_create_parent_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("atoms.json");
        let atoms = vec![Atom::new(Element::He, [0.0, 0.0, 0.0])];
        write_file(&path, &atoms).expect("write file");
        let restored: Vec<Atom> = read_file(&path).expect("read file");
        assert_eq!(restored, atoms);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result: Result<Vec<Atom>, _> = read_file(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn malformed_document_is_reported() {
        let result: Result<Vec<Atom>, _> = read(Cursor::new("[{\"element\": "));
        assert!(matches!(result, Err(Error::Json { .. })));
    }
}
