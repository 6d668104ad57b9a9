// Copyright (c) The logic-reduce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::{ArgEnum, Parser};
use color_eyre::{eyre::eyre, Result};
use fixture_details::AllFixtures;
use logic_reduce::{Form, LogicFunction, Method, Minimizer};

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Check the reference fixtures against their expected minimal forms.
    Check,

    /// Minimize random functions and check that every result is equivalent to its function.
    CheckRandom {
        #[clap(long, short, default_value_t = 64)]
        count: usize,
        #[clap(long, default_value = "logic-reduce")]
        seed: String,
        /// Number of variables; varies between functions if unset.
        #[clap(long)]
        variables: Option<usize>,
        #[clap(long, arg_enum, default_value = "algebraic")]
        method: MethodArg,
    },

    /// List the reference fixtures.
    List,

    /// Show the minimized forms of a reference fixture.
    Show { name: String },

    /// Minimize the function that is 1 on the given rows.
    Minimize {
        /// Comma-separated variable names; variable 0 is the most significant bit.
        #[clap(long, default_value = "a,b,c,d")]
        variables: String,
        #[clap(long, arg_enum, default_value = "algebraic")]
        method: MethodArg,
        #[clap(long, arg_enum, default_value = "both")]
        form: FormArg,
        minterms: Vec<usize>,
    },

    /// Write the rendered reference fixtures to the data directory.
    GenerateOutputs,
}

#[derive(Copy, Clone, Debug, ArgEnum)]
pub enum MethodArg {
    Algebraic,
    Karnaugh,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Algebraic => Method::Algebraic,
            MethodArg::Karnaugh => Method::Karnaugh,
        }
    }
}

#[derive(Copy, Clone, Debug, ArgEnum)]
pub enum FormArg {
    Dnf,
    Cnf,
    Both,
}

impl FormArg {
    fn forms(self) -> &'static [Form] {
        match self {
            Self::Dnf => &[Form::Dnf],
            Self::Cnf => &[Form::Cnf],
            Self::Both => &[Form::Dnf, Form::Cnf],
        }
    }
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::Check => AllFixtures::get().check_all(),
            Self::CheckRandom {
                count,
                seed,
                variables,
                method,
            } => {
                let summary = AllFixtures::check_random(count, variables, &seed, method.into())?;
                println!(
                    "{} functions ok: {} DNF literals, {} CNF literals",
                    summary.functions, summary.dnf_literals, summary.cnf_literals
                );
                Ok(())
            }
            Self::List => {
                for fixture in AllFixtures::get().fixtures() {
                    println!("{:<16} {}", fixture.name, fixture.description);
                }
                Ok(())
            }
            Self::Show { name } => {
                let fixture = AllFixtures::get()
                    .fixture(&name)
                    .ok_or_else(|| eyre!("unknown fixture: {}", name))?;
                print!("{}", fixture.render()?);
                Ok(())
            }
            Self::Minimize {
                variables,
                method,
                form,
                minterms,
            } => {
                let function = LogicFunction::new(variables.split(','), minterms)?;
                let minimizer = Minimizer::new().with_method(method.into());
                for &form in form.forms() {
                    let minimized = minimizer.minimize(&function, form)?;
                    println!("{}: {}", form, minimized);
                    log::info!("{}", minimized.cost());
                    if form == Form::Dnf {
                        if let Some(map) = minimized.karnaugh_map() {
                            print!("{}", map.display(function.variables()));
                        }
                    }
                }
                Ok(())
            }
            Self::GenerateOutputs => AllFixtures::get().write_outputs(),
        }
    }
}
