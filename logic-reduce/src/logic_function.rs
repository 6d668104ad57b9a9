// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    combine::{CombineStrategy, TermCombiner},
    cost::CircuitCost,
    cover::{Cover, ExpressionDisplay},
    cube::{Cube, Form, MAX_INPUTS},
    errors::MinimizeError,
    karnaugh::KarnaughMap,
    minterms::MintermSet,
    select::select_cover,
};
use log::debug;
use std::{collections::BTreeSet, fmt};

/// The fewest variables a function can have.
pub const MIN_VARIABLES: usize = 2;

/// Variable names used when none are given.
pub const DEFAULT_VARIABLES: [&str; MAX_INPUTS] = ["a", "b", "c", "d", "e"];

/// A completely specified Boolean function of 2 to 5 variables.
///
/// The function is stored as the set of truth-table rows on which it is 1. Row indexes treat
/// variable 0 as the most significant bit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicFunction {
    variables: Vec<String>,
    on_set: MintermSet,
}

impl LogicFunction {
    /// Creates a function over `variables` that is 1 exactly on the rows in `minterms`.
    pub fn new<S: AsRef<str>>(
        variables: impl IntoIterator<Item = S>,
        minterms: impl IntoIterator<Item = usize>,
    ) -> Result<Self, MinimizeError> {
        let variables = check_variables(variables)?;
        let row_count = 1 << variables.len();

        let mut on_set = MintermSet::new();
        for minterm in minterms {
            if minterm >= row_count {
                return Err(MinimizeError::MintermOutOfRange {
                    minterm,
                    variable_count: variables.len(),
                });
            }
            on_set.insert(minterm);
        }
        Ok(Self { variables, on_set })
    }

    /// Creates a function from its truth-table column, one value per row in row order.
    pub fn from_truth_values<S: AsRef<str>>(
        variables: impl IntoIterator<Item = S>,
        values: &[bool],
    ) -> Result<Self, MinimizeError> {
        let variables = check_variables(variables)?;
        let row_count = 1 << variables.len();
        if values.len() != row_count {
            return Err(MinimizeError::LengthMismatch {
                left: row_count,
                right: values.len(),
            });
        }

        let on_set = values
            .iter()
            .enumerate()
            .filter_map(|(row, &value)| value.then(|| row))
            .collect();
        Ok(Self { variables, on_set })
    }

    /// Creates a function by evaluating `f` on every row's variable values.
    pub fn from_fn<S: AsRef<str>>(
        variables: impl IntoIterator<Item = S>,
        mut f: impl FnMut(&[bool]) -> bool,
    ) -> Result<Self, MinimizeError> {
        let variables = check_variables(variables)?;
        let variable_count = variables.len();
        let on_set = (0..(1 << variable_count))
            .filter(|&row| f(&row_values(row, variable_count)))
            .collect();
        Ok(Self { variables, on_set })
    }

    #[inline]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    #[inline]
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        1 << self.variable_count()
    }

    /// The rows on which the function is 1.
    #[inline]
    pub fn on_set(&self) -> &MintermSet {
        &self.on_set
    }

    /// The rows on which the function is 0.
    pub fn off_set(&self) -> MintermSet {
        self.on_set.complement(self.variable_count())
    }

    /// The rows grouped by `form`: the on-set for DNF, the off-set for CNF.
    pub fn target_rows(&self, form: Form) -> MintermSet {
        match form {
            Form::Dnf => self.on_set,
            Form::Cnf => self.off_set(),
        }
    }

    /// One fully specified cube per row on which the function is 1.
    pub fn minterm_cover(&self) -> Result<Cover, MinimizeError> {
        Cover::from_minterms(&self.on_set, self.variable_count())
    }

    /// One fully specified cube per row on which the function is 0.
    pub fn maxterm_cover(&self) -> Result<Cover, MinimizeError> {
        Cover::from_minterms(&self.off_set(), self.variable_count())
    }

    /// Evaluates the function for the given variable values.
    pub fn evaluate(&self, values: &[bool]) -> Result<bool, MinimizeError> {
        if values.len() != self.variable_count() {
            return Err(MinimizeError::LengthMismatch {
                left: self.variable_count(),
                right: values.len(),
            });
        }
        let row = values
            .iter()
            .fold(0_usize, |acc, &value| (acc << 1) | usize::from(value));
        Ok(self.on_set.contains(row))
    }

    /// Lays the function out on a Karnaugh map. Only 4-variable functions are supported.
    pub fn karnaugh_map(&self) -> Result<KarnaughMap, MinimizeError> {
        KarnaughMap::from_minterms(&self.on_set, self.variable_count())
    }

    /// Minimizes this function with the default pairing strategy.
    pub fn minimize(&self, form: Form, method: Method) -> Result<Minimized, MinimizeError> {
        Minimizer::new().with_method(method).minimize(self, form)
    }
}

/// Returns the variable values of truth-table row `row`.
pub fn row_values(row: usize, variable_count: usize) -> Vec<bool> {
    (0..variable_count)
        .map(|ix| (row >> (variable_count - 1 - ix)) & 1 == 1)
        .collect()
}

fn check_variables<S: AsRef<str>>(
    variables: impl IntoIterator<Item = S>,
) -> Result<Vec<String>, MinimizeError> {
    let variables: Vec<String> = variables
        .into_iter()
        .map(|v| v.as_ref().to_owned())
        .collect();
    if !(MIN_VARIABLES..=MAX_INPUTS).contains(&variables.len()) {
        return Err(MinimizeError::UnsupportedVariableCount {
            count: variables.len(),
            supported: MIN_VARIABLES..=MAX_INPUTS,
        });
    }

    let mut seen = BTreeSet::new();
    for name in &variables {
        if !seen.insert(name.as_str()) {
            return Err(MinimizeError::DuplicateVariable { name: name.clone() });
        }
    }
    Ok(variables)
}

/// How prime implicants are generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    /// Repeated merging of adjacent cubes. Supports 2 to 5 variables.
    Algebraic,
    /// Prime groups on a toroidal Karnaugh map. Supports exactly 4 variables.
    Karnaugh,
}

impl Default for Method {
    fn default() -> Self {
        Self::Algebraic
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Algebraic => write!(f, "algebraic"),
            Self::Karnaugh => write!(f, "karnaugh"),
        }
    }
}

/// Minimization settings.
#[derive(Clone, Debug, Default)]
pub struct Minimizer {
    method: Method,
    strategy: CombineStrategy,
}

impl Minimizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the pairing strategy of the algebraic method. Ignored by the Karnaugh method.
    pub fn with_strategy(mut self, strategy: CombineStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    #[inline]
    pub fn method(&self) -> Method {
        self.method
    }

    /// Computes a minimal `form` of `function`.
    ///
    /// Prime implicants are generated for the rows selected by `form`, then essential
    /// implicants plus the smallest covering subset of the rest are selected.
    pub fn minimize(
        &self,
        function: &LogicFunction,
        form: Form,
    ) -> Result<Minimized, MinimizeError> {
        let variable_count = function.variable_count();
        let targets = function.target_rows(form);
        debug!(
            "minimizing {} ({} method) over {} variables, {} target rows",
            form,
            self.method,
            variable_count,
            targets.len()
        );

        let (primes, karnaugh_map) = match self.method {
            Method::Algebraic => {
                let cubes = targets
                    .iter()
                    .map(|minterm| Cube::from_minterm(minterm, variable_count))
                    .collect::<Result<Vec<_>, _>>()?;
                let primes = TermCombiner::new(cubes)
                    .with_strategy(self.strategy)
                    .run()?;
                (primes, None)
            }
            Method::Karnaugh => {
                let map = function.karnaugh_map()?;
                (map.prime_implicants(form), Some(map))
            }
        };

        let selection = select_cover(&primes, &targets)?;
        let essential = selection.essential.clone();
        let implicants = selection.into_cover();
        debug!(
            "{} primes, {} selected ({} essential)",
            primes.cube_count(),
            implicants.cube_count(),
            essential.cube_count()
        );

        Ok(Minimized {
            form,
            variables: function.variables().to_vec(),
            primes,
            essential,
            implicants,
            karnaugh_map,
        })
    }
}

/// The result of minimizing a function.
#[derive(Clone, Debug)]
pub struct Minimized {
    form: Form,
    variables: Vec<String>,
    primes: Cover,
    essential: Cover,
    implicants: Cover,
    karnaugh_map: Option<KarnaughMap>,
}

impl Minimized {
    #[inline]
    pub fn form(&self) -> Form {
        self.form
    }

    #[inline]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Every prime implicant that was generated.
    #[inline]
    pub fn primes(&self) -> &Cover {
        &self.primes
    }

    /// The selected implicants that are the sole cover of some row.
    #[inline]
    pub fn essential(&self) -> &Cover {
        &self.essential
    }

    /// The selected implicants: the terms (DNF) or clauses (CNF) of the minimized form.
    #[inline]
    pub fn implicants(&self) -> &Cover {
        &self.implicants
    }

    /// The Karnaugh map the implicants were read from, if the Karnaugh method was used.
    #[inline]
    pub fn karnaugh_map(&self) -> Option<&KarnaughMap> {
        self.karnaugh_map.as_ref()
    }

    /// Evaluates the minimized form for the given variable values.
    pub fn evaluate(&self, values: &[bool]) -> bool {
        match self.form {
            Form::Dnf => self.implicants.evaluate(values),
            // A clause is false exactly on the rows its cube covers.
            Form::Cnf => !self.implicants.evaluate(values),
        }
    }

    /// Checks that the minimized form agrees with `function` on every row.
    ///
    /// Returns [`MinimizeError::NotEquivalent`] with the variable values of the first row on
    /// which they differ.
    pub fn check_equivalent(&self, function: &LogicFunction) -> Result<(), MinimizeError> {
        let expected = match self.form {
            Form::Dnf => function.minterm_cover()?,
            Form::Cnf => function.maxterm_cover()?,
        };
        self.implicants
            .check_logically_equivalent(&expected, function.variable_count())
            .map_err(|values| MinimizeError::NotEquivalent { values })
    }

    #[inline]
    pub fn expression_display(&self) -> ExpressionDisplay<'_, String> {
        self.implicants.expression_display(&self.variables, self.form)
    }

    /// Gate counts for a two-level circuit implementing this form.
    pub fn cost(&self) -> CircuitCost {
        CircuitCost::of_outputs(self.variables.len(), [&self.implicants])
    }
}

impl fmt::Display for Minimized {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expression_display())
    }
}
