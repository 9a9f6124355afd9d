use std::sync::Arc;

use itertools::Itertools;
use vortex_error::{VortexExpect, VortexResult, vortex_bail};

use crate::{DType, FieldName, FieldNames};

/// Type information for a struct column.
///
/// Field order is significant: it is the column order of the rows the struct describes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Hash)]
pub struct StructDType {
    names: FieldNames,
    dtypes: Arc<[DType]>,
}

impl StructDType {
    /// Create a new [`StructDType`] from a list of names and a list of DTypes.
    ///
    /// # Panics
    ///
    /// Panics if the two lists have different lengths.
    pub fn new(names: FieldNames, dtypes: Vec<DType>) -> Self {
        Self::try_new(names, dtypes).vortex_expect("StructDType names and dtypes must align")
    }

    /// Create a new [`StructDType`], failing if `names` and `dtypes` have different lengths.
    pub fn try_new(names: FieldNames, dtypes: Vec<DType>) -> VortexResult<Self> {
        if names.len() != dtypes.len() {
            vortex_bail!(
                "length mismatch between names ({}) and dtypes ({})",
                names.len(),
                dtypes.len()
            );
        }
        Ok(Self {
            names,
            dtypes: dtypes.into(),
        })
    }

    /// Create an empty struct with no fields.
    pub fn empty() -> Self {
        Self {
            names: Arc::new([]),
            dtypes: Arc::new([]),
        }
    }

    /// The field names, in order.
    pub fn names(&self) -> &FieldNames {
        &self.names
    }

    /// The number of fields.
    pub fn nfields(&self) -> usize {
        self.names.len()
    }

    /// Iterate the field DTypes, in order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &DType> + '_ {
        self.dtypes.iter()
    }

    /// Find the index of the field with the given name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.as_ref() == name)
    }

    /// The DType of the field with the given name.
    pub fn field(&self, name: &str) -> Option<&DType> {
        self.find(name).and_then(|idx| self.dtypes.get(idx))
    }

    /// The DType of the field at the given index.
    pub fn field_by_index(&self, index: usize) -> Option<&DType> {
        self.dtypes.get(index)
    }

    /// Project the struct onto the named fields, in the order given.
    pub fn project(&self, projection: &[FieldName]) -> VortexResult<Self> {
        let dtypes = projection
            .iter()
            .map(|name| match self.field(name) {
                Some(dtype) => Ok(dtype.clone()),
                None => vortex_bail!("field {} not found in struct {}", name, self.names.iter().join(", ")),
            })
            .collect::<VortexResult<Vec<_>>>()?;
        Self::try_new(projection.iter().cloned().collect(), dtypes)
    }
}

impl<N: Into<FieldName>> FromIterator<(N, DType)> for StructDType {
    fn from_iter<T: IntoIterator<Item = (N, DType)>>(iter: T) -> Self {
        let (names, dtypes): (Vec<FieldName>, Vec<DType>) =
            iter.into_iter().map(|(n, d)| (n.into(), d)).unzip();
        Self {
            names: names.into(),
            dtypes: dtypes.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Nullability::{NonNullable, Nullable};
    use crate::PType;

    fn people() -> StructDType {
        StructDType::from_iter([
            ("age", DType::Primitive(PType::I32, NonNullable)),
            ("country", DType::Utf8(Nullable)),
            ("photo", DType::Binary(Nullable)),
        ])
    }

    #[test]
    fn field_order_is_preserved() {
        let st = people();
        assert_eq!(st.nfields(), 3);
        assert_eq!(
            st.names().iter().map(|n| n.as_ref()).collect::<Vec<_>>(),
            vec!["age", "country", "photo"]
        );
        assert_eq!(st.find("country"), Some(1));
        assert_eq!(st.field("photo"), Some(&DType::Binary(Nullable)));
        assert_eq!(st.field("missing"), None);
    }

    #[test]
    fn project_reorders() {
        let projected = people().project(&["photo".into(), "age".into()]).unwrap();
        assert_eq!(
            projected.fields().cloned().collect::<Vec<_>>(),
            vec![
                DType::Binary(Nullable),
                DType::Primitive(PType::I32, NonNullable)
            ]
        );
        assert!(people().project(&["nope".into()]).is_err());
    }

    #[test]
    fn mismatched_lengths() {
        assert!(StructDType::try_new(["a".into()].into(), vec![]).is_err());
    }
}
