// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use logic_reduce::{
    cube::MatrixDisplayFormat, karnaugh::GRID_VARIABLES, Form, LogicFunction, Method, Minimized,
};
use std::fmt::Write;

/// A named reference function with its known minimal forms.
#[derive(Clone, Debug)]
pub struct FixtureDetails {
    pub name: &'static str,
    pub description: &'static str,
    pub function: LogicFunction,
    pub expected_dnf: Option<&'static str>,
    pub expected_cnf: Option<&'static str>,
}

impl FixtureDetails {
    pub fn new(name: &'static str, description: &'static str, function: LogicFunction) -> Self {
        Self {
            name,
            description,
            function,
            expected_dnf: None,
            expected_cnf: None,
        }
    }

    pub fn with_dnf(mut self, expected: &'static str) -> Self {
        self.expected_dnf = Some(expected);
        self
    }

    pub fn with_cnf(mut self, expected: &'static str) -> Self {
        self.expected_cnf = Some(expected);
        self
    }

    pub fn expected(&self, form: Form) -> Option<&'static str> {
        match form {
            Form::Dnf => self.expected_dnf,
            Form::Cnf => self.expected_cnf,
        }
    }

    /// The methods that support this function's variable count.
    pub fn methods(&self) -> Vec<Method> {
        if self.function.variable_count() == GRID_VARIABLES {
            vec![Method::Algebraic, Method::Karnaugh]
        } else {
            vec![Method::Algebraic]
        }
    }

    pub fn minimize(&self, form: Form, method: Method) -> Result<Minimized> {
        self.function
            .minimize(form, method)
            .wrap_err_with(|| format!("{}: {} minimization with {} method", self.name, form, method))
    }

    /// Minimizes with every supported method into both forms and compares the results with
    /// the function and the expected expressions.
    pub fn check(&self) -> Result<()> {
        for method in self.methods() {
            for form in [Form::Dnf, Form::Cnf] {
                let minimized = self.minimize(form, method)?;
                minimized
                    .check_equivalent(&self.function)
                    .wrap_err_with(|| format!("{}: {} ({} method)", self.name, form, method))?;
                if !minimized.primes().is_irredundant_by_containment() {
                    bail!(
                        "{}: {} ({} method) has a prime contained in another: {:?}",
                        self.name,
                        form,
                        method,
                        minimized.primes()
                    );
                }

                let actual = minimized.to_string();
                if let Some(expected) = self.expected(form) {
                    if actual != expected {
                        bail!(
                            "{}: {} ({} method) is {}, expected {}",
                            self.name,
                            form,
                            method,
                            actual,
                            expected
                        );
                    }
                }
                log::debug!("{}: {} ({} method) = {}", self.name, form, method, actual);
            }
        }
        Ok(())
    }

    /// Renders the function and its minimized forms as text.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "# {}: {}", self.name, self.description)?;
        writeln!(out, "variables: {}", self.function.variables().join(", "))?;
        writeln!(out, "on-set: {:?}", self.function.on_set())?;

        for method in self.methods() {
            writeln!(out)?;
            writeln!(out, "## {} method", method)?;
            for form in [Form::Dnf, Form::Cnf] {
                let minimized = self.minimize(form, method)?;
                writeln!(out, "{}: {}", form, minimized)?;
                writeln!(
                    out,
                    "  {} primes, {} selected ({} essential)",
                    minimized.primes().cube_count(),
                    minimized.implicants().cube_count(),
                    minimized.essential().cube_count()
                )?;
                writeln!(
                    out,
                    "  matrix: {}",
                    minimized
                        .implicants()
                        .matrix_display()
                        .with_format(MatrixDisplayFormat::Dashes)
                        .with_internal_separator(" ")
                        .with_cube_separator(", ", false)
                )?;
                writeln!(out, "  cost: {}", minimized.cost())?;
                if form == Form::Dnf {
                    if let Some(map) = minimized.karnaugh_map() {
                        write!(out, "{}", map.display(minimized.variables()))?;
                    }
                }
            }
        }
        Ok(out)
    }
}
