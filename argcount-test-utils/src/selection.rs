//! Choosing which fixture cases to run

use crate::fixture::FixtureCase;

/// Filter over fixture case names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
  #[default]
  All,
  /// Run everything except these cases
  Skip(Vec<String>),
  /// Run only these cases
  Run(Vec<String>),
  /// Show [`HELP_TEXT`] instead of running anything
  Help,
}

/// Usage shown for `-h`/`-help`
pub const HELP_TEXT: &str = "Fixture runner: set ARGCOUNT_FIXTURES to `--skip <case>...` or `--run <case>...` to filter cases.";

impl Selection {
  /// Parse `--skip`/`-s` or `--run`/`-r` followed by case names, or
  /// `-h`/`-help` for usage. Anything else selects every case.
  pub fn from_args<I, S>(args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut args = args.into_iter();
    let Some(mode) = args.next() else {
      return Selection::All;
    };
    let names = || -> Vec<String> { args.map(|name| name.as_ref().to_string()).collect() };

    match mode.as_ref() {
      "--skip" | "-s" => Selection::Skip(names()),
      "--run" | "-r" => Selection::Run(names()),
      "-h" | "-help" => Selection::Help,
      _ => Selection::All,
    }
  }

  pub fn includes(&self, name: &str) -> bool {
    match self {
      Selection::All => true,
      Selection::Skip(names) => !names.iter().any(|skipped| skipped == name),
      Selection::Run(names) => names.iter().any(|wanted| wanted == name),
      Selection::Help => false,
    }
  }

  /// Keep the cases this selection includes, preserving order
  pub fn apply(&self, cases: Vec<FixtureCase>) -> Vec<FixtureCase> {
    cases.into_iter().filter(|case| self.includes(&case.name)).collect()
  }
}
