use std::io::{self, Write};

use crate::currency;
use crate::data::error::DatasetError;
use crate::data::model::Category;
use crate::input::Prompt;
use crate::state::AppState;
use crate::ui::menu::{self, MenuChoice};
use crate::ui::table;

const FILTER_PROMPT: &str =
    "Select an item number to toggle, 'a' for all, 'n' for none, or a blank line when finished: ";

// ---------------------------------------------------------------------------
// Interactive session
// ---------------------------------------------------------------------------

/// The console front end: prompts, menu dispatch and error reporting around
/// an [`AppState`].
pub struct RentApp<P: Prompt, W: Write> {
    pub state: AppState,
    prompt: P,
    out: W,
}

impl<P: Prompt, W: Write> RentApp<P, W> {
    pub fn new(state: AppState, prompt: P, out: W) -> Self {
        Self { state, prompt, out }
    }

    /// Hand back the input and output of a scripted session.
    #[cfg(test)]
    pub fn into_parts(self) -> (AppState, P, W) {
        (self.state, self.prompt, self.out)
    }

    fn read(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.out.flush()?;
        Ok(self.prompt.read_line(prompt))
    }

    /// Run the whole session. Returns when the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        let Some(name) = self.read("Please enter your name: ")? else {
            return Ok(());
        };
        writeln!(
            self.out,
            "Hi {}, welcome to the rental listings database.",
            name.trim()
        )?;

        while self.state.home_currency().is_none() {
            let Some(code) = self.read("What is your home currency? ")? else {
                return Ok(());
            };
            if let Err(e) = self.state.set_home_currency(&code) {
                log::debug!("{e}");
            }
        }
        self.print_currency_options()?;

        while self.state.dataset.header().is_empty() {
            let Some(text) = self.read("Enter a header for the menu: ")? else {
                return Ok(());
            };
            if let Err(e) = self.state.dataset.set_header(text.trim()) {
                self.report(&e)?;
            }
        }

        self.main_loop()
    }

    fn print_currency_options(&mut self) -> io::Result<()> {
        let Some(home) = self.state.home_currency() else {
            return Ok(());
        };
        match currency::options_table(home) {
            Ok(text) => write!(self.out, "{text}"),
            Err(e) => writeln!(self.out, "Error: {e}"),
        }
    }

    /// Render a recoverable error for the user.
    fn report(&mut self, err: &DatasetError) -> io::Result<()> {
        match err {
            DatasetError::EmptyDataset => {
                writeln!(self.out, "Please load data first (menu option 8).")
            }
            DatasetError::InvalidHeader { .. } => {
                writeln!(self.out, "Error: {err}.")?;
                writeln!(self.out, "Header must be a string less than 30 characters long.")
            }
            DatasetError::UnknownLabel { .. } => writeln!(self.out, "Error: {err}."),
        }
    }

    fn main_loop(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.out)?;
            writeln!(self.out, "{}", self.state.dataset.header())?;
            write!(self.out, "{}", menu::main_menu())?;

            let Some(line) = self.read("What is your choice? ")? else {
                return Ok(());
            };
            let number: i64 = match line.trim().parse() {
                Ok(n) => n,
                Err(_) => {
                    writeln!(self.out, "Please enter a number only")?;
                    continue;
                }
            };
            let Some(choice) = MenuChoice::from_number(number) else {
                writeln!(
                    self.out,
                    "Please enter a number between 1 and {}",
                    MenuChoice::ALL.len()
                )?;
                continue;
            };

            if choice == MenuChoice::Quit {
                writeln!(self.out, "Goodbye! Thank you for using the database")?;
                return Ok(());
            }
            self.dispatch(choice)?;
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<()> {
        let rendered = match choice {
            MenuChoice::CrossTable(stat) => table::cross_table(&self.state.dataset, stat),
            MenuChoice::Summary(category) => table::summary_table(&self.state.dataset, category),
            MenuChoice::AdjustFilters(category) => return self.adjust_filters(category),
            MenuChoice::LoadData => return self.load_data(),
            MenuChoice::Quit => return Ok(()),
        };
        match rendered {
            Ok(text) => write!(self.out, "{text}"),
            Err(e) => self.report(&e),
        }
    }

    fn load_data(&mut self) -> io::Result<()> {
        match self.state.load() {
            Ok(summary) => {
                writeln!(
                    self.out,
                    "Loaded {} listings from {}.",
                    summary.loaded,
                    self.state.data_path.display()
                )?;
                if summary.skipped > 0 {
                    writeln!(self.out, "Skipped {} malformed rows:", summary.skipped)?;
                    for (row, reason) in &summary.first_skips {
                        writeln!(self.out, "  row {row}: {reason}")?;
                    }
                }
                Ok(())
            }
            Err(e) => {
                log::warn!("Failed to load data: {e:#}");
                writeln!(self.out, "Could not load data: {e:#}")
            }
        }
    }

    /// Filter sub-menu: list labels, toggle until a blank line.
    fn adjust_filters(&mut self, category: Category) -> io::Result<()> {
        loop {
            let listing = match menu::filter_listing(&self.state.dataset, category) {
                Ok(listing) => listing,
                Err(e) => return self.report(&e),
            };
            write!(self.out, "{listing}")?;

            let Some(line) = self.read(FILTER_PROMPT)? else {
                return Ok(());
            };
            let result = match line.trim() {
                "" => return Ok(()),
                "a" | "A" => self.state.select_all(category),
                "n" | "N" => self.state.select_none(category),
                entry => match entry.parse::<usize>() {
                    Ok(number) => match self.state.toggle_nth(category, number) {
                        Ok(Some(_)) => Ok(()),
                        Ok(None) => {
                            let count = self.state.dataset.labels(category).map_or(0, |l| l.len());
                            writeln!(self.out, "Please enter a number between 1 and {count}")?;
                            Ok(())
                        }
                        Err(e) => Err(e),
                    },
                    Err(_) => {
                        writeln!(self.out, "Please enter a number, 'a', 'n' or a blank line")?;
                        Ok(())
                    }
                },
            };
            if let Err(e) = result {
                self.report(&e)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::{Builder, NamedTempFile};

    use super::*;
    use crate::data::loader::LoadOptions;
    use crate::input::ScriptedPrompt;

    fn listings() -> NamedTempFile {
        let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            tmp,
            "id,neighbourhood_group,room_type,price\n\
             1,Queens,Shared room,30\n\
             2,Brooklyn,Private room,80\n\
             3,Brooklyn,Private room,120\n\
             4,Brooklyn,Entire home/apt,200\n\
             5,Brooklyn,Entire home/apt,oops\n"
        )
        .unwrap();
        tmp
    }

    fn session(data: &NamedTempFile, answers: &[&str]) -> (AppState, ScriptedPrompt, String) {
        let state = AppState::new(data.path(), LoadOptions::default());
        let mut app = RentApp::new(state, ScriptedPrompt::new(answers.iter().copied()), Vec::new());
        app.run().unwrap();
        let (state, prompt, out) = app.into_parts();
        (state, prompt, String::from_utf8(out).unwrap())
    }

    const SETUP: [&str; 3] = ["Ada", "GBP", "NYC Rentals"];

    #[test]
    fn setup_reprompts_for_currency_and_header() {
        let data = listings();
        let long_header = "This header is far too long to be used";
        let (state, prompt, out) = session(&data, &["Ada", "MON", "GBP", long_header, "NYC", "9"]);

        assert!(out.starts_with("Hi Ada, welcome to the rental listings database.\n"));
        assert!(out.contains("Options for converting from GBP:\n"));
        assert!(out.contains("Header must be a string less than 30 characters long."));
        assert!(out.contains("\nNYC\nMain Menu\n"));
        assert!(out.ends_with("Goodbye! Thank you for using the database\n"));
        assert_eq!(state.dataset.header(), "NYC");
        assert_eq!(
            prompt
                .prompts
                .iter()
                .filter(|p| p.starts_with("What is your home currency"))
                .count(),
            2
        );
    }

    #[test]
    fn menu_reprompts_on_bad_input_and_needs_data() {
        let data = listings();
        let answers = [&SETUP[..], &["abc", "12", "1", "9"]].concat();
        let (state, _, out) = session(&data, &answers);

        assert!(out.contains("Please enter a number only\n"));
        assert!(out.contains("Please enter a number between 1 and 9\n"));
        assert!(out.contains("Please load data first (menu option 8).\n"));
        assert!(!state.dataset.is_loaded());
    }

    #[test]
    fn load_then_print_tables() {
        let data = listings();
        let answers = [&SETUP[..], &["8", "1", "3", "4"]].concat();
        let (state, _, out) = session(&data, &answers);

        assert!(out.contains("Loaded 4 listings from "));
        assert!(out.contains("Skipped 1 malformed rows:\n  row 5: price 'oops' is not a non-negative number\n"));
        assert!(out.contains(&format!("{:20}{:16}{:16}N/A\n", "Brooklyn", "$ 200.00", "$ 100.00")));
        assert!(out.contains(&format!("{:20}{:16}{:16}$ 30.00\n", "Queens", "N/A", "N/A")));
        assert!(out.contains(&format!(
            "{:20}{:16}{:16}$ 200.00\n",
            "Brooklyn", "$ 80.00", "$ 133.33"
        )));
        assert_eq!(state.dataset.records().unwrap().len(), 4);
    }

    #[test]
    fn filter_menu_toggles_and_changes_summaries() {
        let data = listings();
        // Property types sort as: Entire home/apt, Private room, Shared room.
        let answers = [&SETUP[..], &["8", "7", "1", "x", "7", "", "4"]].concat();
        let (state, _, out) = session(&data, &answers);

        let active = state.dataset.active_labels(Category::PropertyType).unwrap();
        assert_eq!(active.iter().collect::<Vec<_>>(), ["Private room", "Shared room"]);
        assert!(out.contains(&format!("1: {:20}INACTIVE\n", "Entire home/apt")));
        assert!(out.contains("Please enter a number, 'a', 'n' or a blank line\n"));
        assert!(out.contains("Please enter a number between 1 and 3\n"));
        assert!(out.contains(&format!(
            "{:20}{:16}{:16}$ 120.00\n",
            "Brooklyn", "$ 80.00", "$ 100.00"
        )));
    }

    #[test]
    fn filter_menu_all_and_none() {
        let data = listings();
        let answers = [&SETUP[..], &["8", "6", "n", "", "5", "6", "a", ""]].concat();
        let (state, _, out) = session(&data, &answers);

        assert!(out.contains(&format!("{:20}{:16}{:16}N/A\n", "Private room", "N/A", "N/A")));
        assert_eq!(
            state.dataset.active_labels(Category::Location),
            state.dataset.labels(Category::Location)
        );
    }

    #[test]
    fn failed_load_is_reported() {
        let data = listings();
        let state = AppState::new(data.path().with_extension("gone.csv"), LoadOptions::default());
        let answers = [&SETUP[..], &["8", "9"]].concat();
        let mut app = RentApp::new(state, ScriptedPrompt::new(answers), Vec::new());
        app.run().unwrap();
        let (state, _, out) = app.into_parts();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Could not load data: loading "));
        assert!(!state.dataset.is_loaded());
    }

    #[test]
    fn home_currency_from_config_skips_the_prompt() {
        let data = listings();
        let mut state = AppState::new(data.path(), LoadOptions::default());
        state.set_home_currency("JPY").unwrap();
        let mut app = RentApp::new(state, ScriptedPrompt::new(["Ada", "Header"]), Vec::new());
        app.run().unwrap();
        let (_, prompt, out) = app.into_parts();
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("Options for converting from JPY:"));
        assert!(!prompt.prompts.iter().any(|p| p.contains("currency")));
    }
}
