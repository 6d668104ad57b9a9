// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    cover::Cover,
    cube::{Cube, Form, MatrixDisplayFormat},
};
use itertools::{Itertools, Position};
use std::{borrow::Cow, fmt};

impl fmt::Debug for Cover {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cover")
            .field(&format_args!(
                "{}",
                self.matrix_display().with_cube_separator(", ", false)
            ))
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct CoverMatrixDisplay<'a> {
    cover: &'a Cover,
    format: MatrixDisplayFormat,
    internal_separator: Cow<'a, str>,
    cube_separator: (Cow<'a, str>, bool),
}

impl<'a> CoverMatrixDisplay<'a> {
    pub fn new(cover: &'a Cover) -> Self {
        Self {
            cover,
            format: MatrixDisplayFormat::default(),
            internal_separator: Cow::Borrowed(""),
            cube_separator: (Cow::Borrowed("\n"), true),
        }
    }

    pub fn with_format(mut self, format: MatrixDisplayFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_internal_separator(mut self, separator: impl Into<Cow<'a, str>>) -> Self {
        self.internal_separator = separator.into();
        self
    }

    pub fn with_cube_separator(
        mut self,
        separator: impl Into<Cow<'a, str>>,
        print_last: bool,
    ) -> Self {
        self.cube_separator = (separator.into(), print_last);
        self
    }
}

impl<'a> fmt::Display for CoverMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cube_count = self.cover.cube_count();
        for (elem_ix, elem) in self.cover.iter().enumerate() {
            let cube_display = elem
                .matrix_display()
                .with_format(self.format)
                .with_separator(&*self.internal_separator);
            write!(f, "{}", cube_display)?;

            let (cube_separator, print_last) = &self.cube_separator;
            if *print_last || elem_ix < cube_count - 1 {
                write!(f, "{}", cube_separator)?;
            }
        }

        Ok(())
    }
}

/// Operator symbols used when rendering terms.
#[derive(Clone, Debug)]
struct Symbols<'a> {
    negation: Cow<'a, str>,
    and: Cow<'a, str>,
    or: Cow<'a, str>,
}

impl<'a> Default for Symbols<'a> {
    fn default() -> Self {
        Self {
            negation: Cow::Borrowed("¬"),
            and: Cow::Borrowed(" & "),
            or: Cow::Borrowed(" | "),
        }
    }
}

impl<'a> Symbols<'a> {
    /// The operator joining literals inside one term.
    fn inner(&self, form: Form) -> &str {
        match form {
            Form::Dnf => self.and.as_ref(),
            Form::Cnf => self.or.as_ref(),
        }
    }

    /// The operator joining terms.
    fn outer(&self, form: Form) -> &str {
        match form {
            Form::Dnf => self.or.as_ref(),
            Form::Cnf => self.and.as_ref(),
        }
    }
}

/// Displays a single term, e.g. `a & ¬b` (DNF) or `¬a | b` (CNF).
///
/// A term without literals is displayed as the constant `1` (DNF) or `0` (CNF).
pub struct TermDisplay<'a, S> {
    cube: &'a Cube,
    variables: &'a [S],
    form: Form,
    symbols: Symbols<'a>,
}

impl<'a, S: AsRef<str>> TermDisplay<'a, S> {
    pub fn new(cube: &'a Cube, variables: &'a [S], form: Form) -> Self {
        Self {
            cube,
            variables,
            form,
            symbols: Symbols::default(),
        }
    }

    pub fn with_negation(mut self, negation: impl Into<Cow<'a, str>>) -> Self {
        self.symbols.negation = negation.into();
        self
    }

    pub fn with_and(mut self, and: impl Into<Cow<'a, str>>) -> Self {
        self.symbols.and = and.into();
        self
    }

    pub fn with_or(mut self, or: impl Into<Cow<'a, str>>) -> Self {
        self.symbols.or = or.into();
        self
    }

    fn with_symbols(mut self, symbols: Symbols<'a>) -> Self {
        self.symbols = symbols;
        self
    }
}

impl<'a, S: AsRef<str>> fmt::Display for TermDisplay<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let literals = self.cube.literals(self.variables, self.form);
        if literals.is_empty() {
            return match self.form {
                Form::Dnf => write!(f, "1"),
                Form::Cnf => write!(f, "0"),
            };
        }

        let separator = self.symbols.inner(self.form);
        for literal in literals.iter().with_position() {
            let (literal, last) = match literal {
                Position::First(l) | Position::Middle(l) => (l, false),
                Position::Last(l) | Position::Only(l) => (l, true),
            };
            if literal.negated {
                write!(f, "{}", self.symbols.negation)?;
            }
            write!(f, "{}", literal.variable)?;
            if !last {
                write!(f, "{}", separator)?;
            }
        }
        Ok(())
    }
}

/// Displays a whole cover as a normal form, e.g. `(a & b) | ¬c`.
///
/// An empty cover is displayed as the constant `0` (DNF) or `1` (CNF).
pub struct ExpressionDisplay<'a, S> {
    cover: &'a Cover,
    variables: &'a [S],
    form: Form,
    symbols: Symbols<'a>,
}

impl<'a, S: AsRef<str>> ExpressionDisplay<'a, S> {
    pub fn new(cover: &'a Cover, variables: &'a [S], form: Form) -> Self {
        Self {
            cover,
            variables,
            form,
            symbols: Symbols::default(),
        }
    }

    pub fn with_negation(mut self, negation: impl Into<Cow<'a, str>>) -> Self {
        self.symbols.negation = negation.into();
        self
    }

    pub fn with_and(mut self, and: impl Into<Cow<'a, str>>) -> Self {
        self.symbols.and = and.into();
        self
    }

    pub fn with_or(mut self, or: impl Into<Cow<'a, str>>) -> Self {
        self.symbols.or = or.into();
        self
    }
}

impl<'a, S: AsRef<str>> fmt::Display for ExpressionDisplay<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.cover.is_empty() {
            return match self.form {
                Form::Dnf => write!(f, "0"),
                Form::Cnf => write!(f, "1"),
            };
        }

        let parenthesize = self.cover.cube_count() > 1;
        let separator = self.symbols.outer(self.form);
        for elem in self.cover.iter().with_position() {
            let (cube, last) = match elem {
                Position::First(c) | Position::Middle(c) => (c, false),
                Position::Last(c) | Position::Only(c) => (c, true),
            };
            let term = TermDisplay::new(cube, self.variables, self.form)
                .with_symbols(self.symbols.clone());
            if parenthesize && cube.literal_count() > 1 {
                write!(f, "({})", term)?;
            } else {
                write!(f, "{}", term)?;
            }
            if !last {
                write!(f, "{}", separator)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_display() {
        let variables = ["a", "b", "c"];
        let cube = Cube::from_numeric([1, 1, 2]).unwrap();
        assert_eq!(cube.term_display(&variables, Form::Dnf).to_string(), "a & b");
        assert_eq!(
            cube.term_display(&variables, Form::Cnf).to_string(),
            "¬a | ¬b"
        );
        assert_eq!(
            cube.term_display(&variables, Form::Dnf)
                .with_negation("!")
                .with_and("&")
                .to_string(),
            "a&b"
        );

        let universe = Cube::universe(3).unwrap();
        assert_eq!(universe.term_display(&variables, Form::Dnf).to_string(), "1");
        assert_eq!(universe.term_display(&variables, Form::Cnf).to_string(), "0");
    }

    #[test]
    fn test_expression_display() {
        let variables = ["a", "b", "c"];
        let cover = Cover::from_numeric([[0, 0, 0], [1, 1, 1]]).unwrap();
        assert_eq!(
            cover.expression_display(&variables, Form::Cnf).to_string(),
            "(a | b | c) & (¬a | ¬b | ¬c)"
        );

        let cover = Cover::from_numeric([[1, 1, 2], [2, 2, 0]]).unwrap();
        assert_eq!(
            cover
                .expression_display(&variables, Form::Dnf)
                .with_negation("!")
                .with_or(" v ")
                .to_string(),
            "!c v (a & b)"
        );

        let empty = Cover::default();
        assert_eq!(empty.expression_display(&variables, Form::Dnf).to_string(), "0");
        assert_eq!(empty.expression_display(&variables, Form::Cnf).to_string(), "1");
    }

    #[test]
    fn test_matrix_display() {
        let cover = Cover::from_numeric([[1, 2], [0, 0]]).unwrap();
        assert_eq!(cover.matrix_display().to_string(), "00\n1X\n");
        assert_eq!(format!("{:?}", cover), "Cover(00, 1X)");
        assert_eq!(
            cover
                .matrix_display()
                .with_format(MatrixDisplayFormat::Dashes)
                .with_internal_separator(" ")
                .with_cube_separator(", ", false)
                .to_string(),
            "0 0, 1 -"
        );
    }
}
