use std::collections::BTreeMap;
use std::env;
use std::path::Path;
use std::sync::OnceLock;

use log::debug;
use parking_lot::Mutex;
use url::Url;
use vortex_dtype::DType;
use vortex_error::{VortexResult, vortex_bail, vortex_err};

use crate::ToDuckDBType;
use crate::duckdb::LogicalType;
use crate::engine::{FileOpenOptions, LayoutReaderRef, VortexFileOpener};

/// Turn a path as written in a query into a URL.
///
/// Anything of the form `scheme://...` is taken as is. Other paths are local files, made
/// absolute against the working directory.
pub fn ensure_file_protocol(path: &str) -> VortexResult<Url> {
    if path
        .find("://")
        .is_some_and(|idx| idx > 0 && !path[..idx].contains('/'))
    {
        return Ok(Url::parse(path)?);
    }

    let path = Path::new(path);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };
    Url::from_file_path(&absolute)
        .map_err(|_| vortex_err!("cannot convert {} to a file URL", absolute.display()))
}

/// The column names and host types of a file whose top-level dtype is a struct.
pub fn table_schema(dtype: &DType) -> VortexResult<(Vec<String>, Vec<LogicalType>)> {
    let Some(struct_) = dtype.as_struct() else {
        vortex_bail!(InvalidSchema: "Vortex file does not contain a struct array as a top-level dtype");
    };
    Ok(struct_
        .names()
        .iter()
        .zip(struct_.fields())
        .map(|(name, field)| (name.to_string(), field.to_duckdb_type()))
        .unzip())
}

pub(super) fn open_file(
    opener: &dyn VortexFileOpener,
    uri: &Url,
    properties: &BTreeMap<String, String>,
) -> VortexResult<LayoutReaderRef> {
    debug!("opening {uri}");
    opener
        .open(&FileOpenOptions::new(uri.clone()).with_properties(properties.clone()))
        .map_err(|e| e.with_context(format!("Failed to open Vortex file: {uri}")))
}

/// Check a file's schema against the schema of the first file of the scan.
pub(super) fn verify_schema(
    expected_names: &[String],
    expected_types: &[LogicalType],
    dtype: &DType,
) -> VortexResult<()> {
    let (names, types) = table_schema(dtype)?;
    if names.len() != expected_names.len() {
        vortex_bail!(
            SchemaMismatch: "Vortex file does not contain the same number of columns as the first ({} vs {})",
            names.len(),
            expected_names.len()
        );
    }
    for (idx, (name, expected)) in names.iter().zip(expected_names).enumerate() {
        if name != expected {
            vortex_bail!(
                SchemaMismatch: "Vortex file contains a column with a different name to the first: column {} is {}, expected {}",
                idx,
                name,
                expected
            );
        }
    }
    for ((name, type_), expected) in names.iter().zip(&types).zip(expected_types) {
        if type_ != expected {
            vortex_bail!(
                SchemaMismatch: "Vortex file contains a column with a different type to the first: {} is {}, expected {}",
                name,
                type_,
                expected
            );
        }
    }
    Ok(())
}

#[derive(Default)]
struct ReaderSlot {
    reader: OnceLock<LayoutReaderRef>,
    // Serializes the first open of the file.
    lock: Mutex<()>,
}

/// One lazily opened reader per file of the scan.
///
/// The first caller for a file opens it while holding that file's lock; once set, a reader is
/// read without locking.
pub(super) struct ReaderCache {
    slots: Box<[ReaderSlot]>,
}

impl ReaderCache {
    pub fn new(num_files: usize) -> Self {
        Self {
            slots: (0..num_files).map(|_| ReaderSlot::default()).collect(),
        }
    }

    /// Install an already opened reader. Does nothing if the file has a reader.
    pub fn seed(&self, file_idx: usize, reader: LayoutReaderRef) -> VortexResult<()> {
        self.slot(file_idx)?.reader.get_or_init(|| reader);
        Ok(())
    }

    pub fn get_or_open(
        &self,
        file_idx: usize,
        open: impl FnOnce() -> VortexResult<LayoutReaderRef>,
    ) -> VortexResult<LayoutReaderRef> {
        let slot = self.slot(file_idx)?;
        if let Some(reader) = slot.reader.get() {
            return Ok(reader.clone());
        }

        let _guard = slot.lock.lock();
        if let Some(reader) = slot.reader.get() {
            return Ok(reader.clone());
        }
        let reader = open()?;
        Ok(slot.reader.get_or_init(|| reader).clone())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    fn slot(&self, file_idx: usize) -> VortexResult<&ReaderSlot> {
        self.slots
            .get(file_idx)
            .ok_or_else(|| vortex_err!(OutOfBounds: file_idx, 0, self.slots.len()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use vortex_dtype::Nullability::{NonNullable, Nullable};
    use vortex_dtype::{PType, StructDType};
    use vortex_error::VortexError;

    use super::*;

    #[rstest]
    #[case("s3://bucket/data.vortex")]
    #[case("file:///tmp/data.vortex")]
    #[case("https://example.com/a/b.vortex")]
    fn urls_are_kept(#[case] path: &str) {
        assert_eq!(ensure_file_protocol(path).unwrap().as_str(), path);
    }

    #[test]
    fn absolute_path() {
        assert_eq!(
            ensure_file_protocol("/data/part-0.vortex").unwrap().as_str(),
            "file:///data/part-0.vortex"
        );
    }

    #[test]
    fn relative_path() {
        let url = ensure_file_protocol("data/part-0.vortex").unwrap();
        assert_eq!(
            url.to_file_path().unwrap(),
            env::current_dir().unwrap().join("data/part-0.vortex")
        );
    }

    #[test]
    fn scheme_marker_after_a_slash_is_a_path() {
        let url = ensure_file_protocol("/odd/dir://name.vortex").unwrap();
        assert_eq!(url.scheme(), "file");
    }

    fn people() -> DType {
        DType::Struct(
            StructDType::from_iter([
                ("age", DType::Primitive(PType::I32, Nullable)),
                ("country", DType::Utf8(Nullable)),
            ]),
            NonNullable,
        )
    }

    #[test]
    fn schema_of_struct() {
        let (names, types) = table_schema(&people()).unwrap();
        assert_eq!(names, vec!["age", "country"]);
        assert_eq!(types, vec![LogicalType::Integer, LogicalType::Varchar]);
    }

    #[test]
    fn schema_of_non_struct() {
        let err = table_schema(&DType::Primitive(PType::I32, NonNullable)).unwrap_err();
        assert!(matches!(err, VortexError::InvalidSchema(..)));
    }

    #[rstest]
    #[case(
        DType::Struct(StructDType::from_iter([("age", DType::Primitive(PType::I32, Nullable))]), NonNullable),
        "same number of columns"
    )]
    #[case(
        DType::Struct(
            StructDType::from_iter([
                ("age", DType::Primitive(PType::I32, Nullable)),
                ("nation", DType::Utf8(Nullable)),
            ]),
            NonNullable
        ),
        "different name"
    )]
    #[case(
        DType::Struct(
            StructDType::from_iter([
                ("age", DType::Primitive(PType::I64, Nullable)),
                ("country", DType::Utf8(Nullable)),
            ]),
            NonNullable
        ),
        "different type"
    )]
    fn mismatched_schema(#[case] dtype: DType, #[case] message: &str) {
        let (names, types) = table_schema(&people()).unwrap();
        let err = verify_schema(&names, &types, &dtype).unwrap_err();
        assert!(matches!(err, VortexError::SchemaMismatch(..)));
        assert!(err.to_string().contains(message), "{err}");
    }

    #[test]
    fn nullability_is_not_part_of_the_schema() {
        let (names, types) = table_schema(&people()).unwrap();
        let dtype = DType::Struct(
            StructDType::from_iter([
                ("age", DType::Primitive(PType::I32, NonNullable)),
                ("country", DType::Utf8(NonNullable)),
            ]),
            Nullable,
        );
        verify_schema(&names, &types, &dtype).unwrap();
    }
}
