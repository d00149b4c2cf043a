//! Defines the `Dataset`, the immutable matrix of binary samples a model is
//! learned from, and the `Observation` type used to pose queries against a
//! learned model.

use util::{CltError, Result};

use bidir_map::BidirMap;
use ndarray::Array2;

/// A single query entry: a variable is either observed to a binary value or
/// left unobserved, in which case it is marginalized away during inference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {

    /// The variable was observed to take the given value
    Observed(bool),

    /// The variable was not observed
    Missing

}

impl Observation {

    /// The table index of the observed value, or `None` when missing.
    pub fn index(&self) -> Option<usize> {
        match *self {
            Observation::Observed(value) => Some(value as usize),
            Observation::Missing => None
        }
    }

    /// Check if this entry is unobserved.
    pub fn is_missing(&self) -> bool {
        match *self {
            Observation::Missing => true,
            _ => false
        }
    }

}


/// View a matrix of binary samples as a batch of fully observed queries.
///
/// # Errors
/// * `CltError::InvalidDatum`, if an entry is neither 0 nor 1
pub fn fully_observed(samples: &Array2<u8>) -> Result<Array2<Observation>> {
    for ((row, column), &value) in samples.indexed_iter() {
        if value > 1 {
            return Err(CltError::InvalidDatum { row, column, value });
        }
    }

    Ok(samples.mapv(|value| Observation::Observed(value == 1)))
}


/// An immutable N×D matrix of binary samples, one sample per row and one
/// variable per column.
///
/// Entries are validated to be 0 or 1 at construction; afterwards the matrix
/// is never mutated. Columns may optionally carry user-defined names with a
/// two way lookup `(index -> name)` and `(name -> index)`.
#[derive(Debug)]
pub struct Dataset {

    /// The sample matrix
    data: Array2<u8>,

    /// The user-defined names of each column
    names: BidirMap<usize, String>

}

impl Dataset {

    /// Construct a `Dataset` from a matrix of binary samples.
    ///
    /// # Errors
    /// * `CltError::EmptyDataset`, if the matrix has no rows or no columns
    /// * `CltError::InvalidDatum`, if an entry is neither 0 nor 1
    pub fn new(data: Array2<u8>) -> Result<Self> {
        if data.rows() == 0 || data.cols() == 0 {
            return Err(CltError::EmptyDataset);
        }

        for ((row, column), &value) in data.indexed_iter() {
            if value > 1 {
                return Err(CltError::InvalidDatum { row, column, value });
            }
        }

        Ok(Dataset { data, names: BidirMap::new() })
    }

    /// Construct a `Dataset` with a name for each column.
    ///
    /// # Errors
    /// * everything `Dataset::new` reports
    /// * `CltError::DimensionMismatch`, if the name count differs from the column count
    pub fn with_names(data: Array2<u8>, names: Vec<String>) -> Result<Self> {
        let mut dataset = Dataset::new(data)?;

        if names.len() != dataset.d() {
            return Err(CltError::DimensionMismatch {
                expected: dataset.d(),
                actual: names.len()
            });
        }

        for (index, name) in names.into_iter().enumerate() {
            dataset.names.insert(index, name);
        }

        Ok(dataset)
    }

    /// The number of samples.
    pub fn n(&self) -> usize {
        self.data.rows()
    }

    /// The number of variables.
    pub fn d(&self) -> usize {
        self.data.cols()
    }

    /// The underlying sample matrix.
    pub fn values(&self) -> &Array2<u8> {
        &self.data
    }

    /// Lookup a column's name based on its index.
    pub fn name_of(&self, index: usize) -> Option<&String> {
        self.names.get_by_first(&index)
    }

    /// Lookup a column's index based on its name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get_by_second(&String::from(name)).cloned()
    }

    /// The samples as a batch of fully observed queries, e.g. for computing
    /// the model's likelihood on its own training data.
    pub fn to_queries(&self) -> Array2<Observation> {
        self.data.mapv(|value| Observation::Observed(value == 1))
    }

}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn valid_construction() {
        let data = array![[0, 1, 1], [1, 0, 0]];
        let dataset = Dataset::new(data).unwrap();

        assert_eq!(2, dataset.n());
        assert_eq!(3, dataset.d());
        assert_eq!(1, dataset.values()[[0, 1]]);
    }

    #[test]
    fn rejects_nonbinary_entries() {
        let data = array![[0, 1], [1, 2]];

        match Dataset::new(data).expect_err("missing error") {
            CltError::InvalidDatum { row, column, value } => {
                assert_eq!((1, 1, 2), (row, column, value));
            },
            _ => panic!("wrong error type")
        };
    }

    #[test]
    fn rejects_empty_matrix() {
        let data = Array2::<u8>::zeros((0, 4));
        match Dataset::new(data).expect_err("missing error") {
            CltError::EmptyDataset => (),
            _ => panic!("wrong error type")
        };

        let data = Array2::<u8>::zeros((4, 0));
        assert!(Dataset::new(data).is_err());
    }

    #[test]
    fn name_lookup() {
        let data = array![[0, 1], [1, 0]];
        let names = vec![String::from("rain"), String::from("sprinkler")];
        let dataset = Dataset::with_names(data, names).unwrap();

        assert_eq!("rain", dataset.name_of(0).unwrap());
        assert_eq!(Some(1), dataset.index_of("sprinkler"));
        assert_eq!(None, dataset.index_of("wet"));
        assert_eq!(None, dataset.name_of(7));
    }

    #[test]
    fn rejects_wrong_name_count() {
        let data = array![[0, 1], [1, 0]];
        let names = vec![String::from("rain")];

        match Dataset::with_names(data, names).expect_err("missing error") {
            CltError::DimensionMismatch { expected, actual } => {
                assert_eq!((2, 1), (expected, actual));
            },
            _ => panic!("wrong error type")
        };
    }

    #[test]
    fn queries_from_samples() {
        let data = array![[0, 1], [1, 0]];
        let dataset = Dataset::new(data).unwrap();

        let queries = dataset.to_queries();
        assert_eq!(Observation::Observed(false), queries[[0, 0]]);
        assert_eq!(Observation::Observed(true), queries[[0, 1]]);
        assert_eq!(Some(1), queries[[1, 0]].index());
        assert!(! queries[[1, 0]].is_missing());
    }

    #[test]
    fn fully_observed_validates() {
        let samples = array![[0u8, 3]];
        assert!(fully_observed(&samples).is_err());

        let samples = array![[0u8, 1]];
        let queries = fully_observed(&samples).unwrap();
        assert_eq!(Some(0), queries[[0, 0]].index());
        assert_eq!(Some(1), queries[[0, 1]].index());
    }

}
